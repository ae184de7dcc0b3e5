//! Game-data gateway seam
//!
//! Handlers and the display view depend on this trait rather than on ESPN
//! directly. Implementations never fail: an unreachable or malformed
//! upstream yields an empty list or `None`, which callers treat as
//! "unknown".

use async_trait::async_trait;

use crate::models::game::GameData;

#[async_trait]
pub trait GameDataSource: Send + Sync {
    /// Games over the upcoming window, in date order
    async fn upcoming_games(&self) -> Vec<GameData>;

    /// Current state of one game, always fetched fresh
    async fn game(&self, game_id: &str) -> Option<GameData>;
}
