//! ESPN scoreboard client
//!
//! Uses the public site API. Per-date scoreboards are cached for a short TTL;
//! single-game summaries are fetched on every call since the kiosk polls
//! them for live scores.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Utc};
use futures_util::stream::{self, StreamExt};
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::game::{GameData, GameStatus, TeamScore};
use crate::services::games::GameDataSource;

/// Scoreboard days fetched at once while building the upcoming window
const SCOREBOARD_CONCURRENCY: usize = 4;

#[derive(Debug, Deserialize)]
struct ScoreboardResponse {
    #[serde(default)]
    events: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    id: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    header: Option<EspnHeader>,
}

#[derive(Debug, Deserialize)]
struct EspnHeader {
    id: String,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnCompetitor {
    home_away: String,
    team: EspnTeam,
    #[serde(default)]
    score: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnTeam {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    abbreviation: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    logos: Vec<EspnLogo>,
}

#[derive(Debug, Deserialize)]
struct EspnLogo {
    href: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnStatus {
    #[serde(default)]
    period: Option<u32>,
    #[serde(default)]
    display_clock: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    detail: Option<String>,
}

/// Scores arrive as strings ("21") on most payloads; anything unreadable is 0
fn parse_score(score: Option<&Value>) -> u32 {
    match score {
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        }
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        _ => 0,
    }
}

fn team_score(competitor: EspnCompetitor) -> TeamScore {
    let score = parse_score(competitor.score.as_ref());
    let team = competitor.team;
    let logo = team
        .logo
        .or_else(|| team.logos.into_iter().next().map(|l| l.href));
    let name = team.name.unwrap_or_default();

    TeamScore {
        abbreviation: team.abbreviation.unwrap_or_default(),
        display_name: team.display_name.unwrap_or_else(|| name.clone()),
        name,
        score,
        logo,
    }
}

fn parse_competition(
    id: String,
    fallback_date: Option<String>,
    competition: EspnCompetition,
) -> Option<GameData> {
    let mut home = None;
    let mut away = None;
    for competitor in competition.competitors {
        match competitor.home_away.as_str() {
            "home" => home = Some(competitor),
            "away" => away = Some(competitor),
            _ => {}
        }
    }
    let (home, away) = match (home, away) {
        (Some(home), Some(away)) => (home, away),
        _ => {
            tracing::debug!("Game {} is missing a home or away competitor", id);
            return None;
        }
    };

    let status = competition.status;
    let status_type = status.as_ref().and_then(|s| s.kind.as_ref());

    Some(GameData {
        id,
        date: competition.date.or(fallback_date).unwrap_or_default(),
        home_team: team_score(home),
        away_team: team_score(away),
        status: GameStatus {
            period: status.as_ref().and_then(|s| s.period).unwrap_or(0),
            clock: status
                .as_ref()
                .and_then(|s| s.display_clock.clone())
                .unwrap_or_else(|| "0:00".to_string()),
            state: status_type
                .and_then(|t| t.state.clone())
                .unwrap_or_else(|| "pre".to_string()),
            completed: status_type.and_then(|t| t.completed).unwrap_or(false),
            detail: status_type
                .and_then(|t| t.detail.clone())
                .unwrap_or_else(|| "Scheduled".to_string()),
        },
    })
}

/// Games from a scoreboard payload. Events that do not parse are skipped.
fn parse_scoreboard(body: Value) -> Vec<GameData> {
    let response: ScoreboardResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Malformed ESPN scoreboard payload: {}", e);
            return Vec::new();
        }
    };

    response
        .events
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<EspnEvent>(raw).ok())
        .filter_map(|event| {
            let competition = event.competitions.into_iter().next()?;
            parse_competition(event.id, event.date, competition)
        })
        .collect()
}

/// Game from a summary payload (`header.competitions[0]`)
fn parse_summary(body: Value) -> Option<GameData> {
    let response: SummaryResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Malformed ESPN summary payload: {}", e);
            return None;
        }
    };

    let header = response.header?;
    let competition = header.competitions.into_iter().next()?;
    parse_competition(header.id, None, competition)
}

#[derive(Clone)]
pub struct EspnService {
    client: Client,
    base_url: String,
    upcoming_days: u32,
    scoreboard_cache: Arc<Cache<String, Vec<GameData>>>,
}

impl EspnService {
    pub fn new(
        base_url: String,
        cache_ttl: Duration,
        upcoming_days: u32,
        timeout: Duration,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(64) // a couple of upcoming windows' worth of days
            .time_to_live(cache_ttl)
            .build();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            upcoming_days,
            scoreboard_cache: Arc::new(cache),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.espn_base_url.clone(),
            Duration::from_secs(config.scoreboard_cache_ttl_secs),
            config.upcoming_games_days,
            Duration::from_secs(config.espn_timeout_secs),
        )
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(format!("ESPN API error {}", status).into());
        }

        Ok(response.json().await?)
    }

    /// Games on one day (`YYYYMMDD`). Failures are logged and not cached.
    pub async fn scoreboard(&self, date: &str) -> Vec<GameData> {
        if let Some(cached) = self.scoreboard_cache.get(date).await {
            tracing::debug!("Cache hit for scoreboard {}", date);
            return cached;
        }

        let url = format!("{}/scoreboard", self.base_url);
        match self.get_json(&url, &[("dates", date)]).await {
            Ok(body) => {
                let games = parse_scoreboard(body);
                tracing::debug!("Fetched {} games for {}", games.len(), date);
                self.scoreboard_cache
                    .insert(date.to_string(), games.clone())
                    .await;
                games
            }
            Err(e) => {
                tracing::warn!("Error fetching ESPN scoreboard for {}: {}", date, e);
                Vec::new()
            }
        }
    }

    fn upcoming_dates(&self) -> Vec<String> {
        let today = Utc::now().date_naive();
        (0..self.upcoming_days)
            .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
            .map(|date| date.format("%Y%m%d").to_string())
            .collect()
    }
}

#[async_trait]
impl GameDataSource for EspnService {
    async fn upcoming_games(&self) -> Vec<GameData> {
        let dates = self.upcoming_dates();
        tracing::info!("Fetching upcoming games for {} days", dates.len());

        // `buffered` keeps day order while a few requests run at once
        let days: Vec<Vec<GameData>> = stream::iter(dates)
            .map(|date| async move { self.scoreboard(&date).await })
            .buffered(SCOREBOARD_CONCURRENCY)
            .collect()
            .await;

        days.into_iter().flatten().collect()
    }

    async fn game(&self, game_id: &str) -> Option<GameData> {
        let url = format!("{}/summary", self.base_url);
        match self.get_json(&url, &[("event", game_id)]).await {
            Ok(body) => {
                let game = parse_summary(body);
                if game.is_none() {
                    tracing::warn!("ESPN summary for game {} could not be parsed", game_id);
                }
                game
            }
            Err(e) => {
                tracing::warn!("Error fetching ESPN game {}: {}", game_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn competition(state: &str) -> Value {
        json!({
            "date": "2026-10-18T17:00Z",
            "competitors": [
                {
                    "homeAway": "home",
                    "score": "24",
                    "team": {
                        "name": "Chiefs",
                        "abbreviation": "KC",
                        "displayName": "Kansas City Chiefs",
                        "logo": "https://a.espncdn.com/kc.png"
                    }
                },
                {
                    "homeAway": "away",
                    "score": "17",
                    "team": {
                        "name": "Bills",
                        "abbreviation": "BUF",
                        "displayName": "Buffalo Bills",
                        "logos": [{ "href": "https://a.espncdn.com/buf.png" }]
                    }
                }
            ],
            "status": {
                "period": 3,
                "displayClock": "7:42",
                "type": { "state": state, "completed": false, "detail": "7:42 - 3rd Quarter" }
            }
        })
    }

    #[test]
    fn test_parse_scoreboard() {
        let body = json!({
            "events": [
                { "id": "401", "date": "2026-10-18T17:00Z", "competitions": [competition("in")] },
                { "id": "402", "competitions": [] },
                { "unexpected": true }
            ]
        });

        let games = parse_scoreboard(body);
        assert_eq!(games.len(), 1);

        let game = &games[0];
        assert_eq!(game.id, "401");
        assert_eq!(game.home_team.abbreviation, "KC");
        assert_eq!(game.home_team.score, 24);
        assert_eq!(game.away_team.score, 17);
        assert_eq!(game.away_team.logo.as_deref(), Some("https://a.espncdn.com/buf.png"));
        assert_eq!(game.status.period, 3);
        assert!(game.status.is_in_progress());
    }

    #[test]
    fn test_parse_summary_uses_header() {
        let body = json!({ "header": { "id": "401", "competitions": [competition("post")] } });
        let game = parse_summary(body).unwrap();
        assert_eq!(game.id, "401");
        assert_eq!(game.status.state, "post");
    }

    #[test]
    fn test_parse_summary_without_header_is_none() {
        assert!(parse_summary(json!({ "boxscore": {} })).is_none());
        assert!(parse_summary(json!("not an object")).is_none());
    }

    #[test]
    fn test_status_defaults_when_missing() {
        let body = json!({
            "header": {
                "id": "9",
                "competitions": [{
                    "competitors": [
                        { "homeAway": "home", "team": { "name": "Lions" } },
                        { "homeAway": "away", "score": "abc", "team": { "name": "Bears" } }
                    ]
                }]
            }
        });

        let game = parse_summary(body).unwrap();
        assert_eq!(game.home_team.score, 0);
        assert_eq!(game.away_team.score, 0);
        assert_eq!(game.home_team.display_name, "Lions");
        assert_eq!(game.status.clock, "0:00");
        assert_eq!(game.status.state, "pre");
        assert_eq!(game.status.detail, "Scheduled");
        assert!(!game.status.completed);
    }

    #[test]
    fn test_parse_score_variants() {
        assert_eq!(parse_score(Some(&json!("21"))), 21);
        assert_eq!(parse_score(Some(&json!(" 7"))), 7);
        assert_eq!(parse_score(Some(&json!(35))), 35);
        assert_eq!(parse_score(Some(&json!(null))), 0);
        assert_eq!(parse_score(None), 0);
    }

    #[test]
    fn test_upcoming_dates_window() {
        let service = EspnService::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(30),
            3,
            Duration::from_secs(1),
        );
        let dates = service.upcoming_dates();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], Utc::now().date_naive().format("%Y%m%d").to_string());
        assert!(dates.iter().all(|d| d.len() == 8));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_yields_empty_results() {
        // Port 9 (discard) is closed on test hosts; the request fails fast
        let service = EspnService::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(30),
            2,
            Duration::from_secs(2),
        );

        assert!(service.upcoming_games().await.is_empty());
        assert!(service.game("401").await.is_none());
    }
}
