//! Game data as served to the front end, independent of the upstream payload

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub name: String,
    pub abbreviation: String,
    pub display_name: String,
    pub score: u32,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub period: u32,
    pub clock: String,
    /// "pre", "in" or "post"
    pub state: String,
    pub completed: bool,
    pub detail: String,
}

impl GameStatus {
    pub fn is_in_progress(&self) -> bool {
        self.state == "in"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub id: String,
    pub date: String,
    pub home_team: TeamScore,
    pub away_team: TeamScore,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameListResponse {
    pub games: Vec<GameData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub game: GameData,
}
