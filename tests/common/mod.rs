#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use squares_pool::models::game::{GameData, GameStatus, TeamScore};
use squares_pool::routes::app_router;
use squares_pool::services::games::GameDataSource;
use squares_pool::AppState;

/// Fresh in-memory SQLite database with every migration applied.
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Canned game data in place of the live scoreboard
#[derive(Default)]
pub struct StubGames {
    pub upcoming: Vec<GameData>,
    pub by_id: HashMap<String, GameData>,
}

impl StubGames {
    pub fn with_game(game: GameData) -> Self {
        let mut by_id = HashMap::new();
        by_id.insert(game.id.clone(), game.clone());
        Self {
            upcoming: vec![game],
            by_id,
        }
    }
}

#[async_trait]
impl GameDataSource for StubGames {
    async fn upcoming_games(&self) -> Vec<GameData> {
        self.upcoming.clone()
    }

    async fn game(&self, game_id: &str) -> Option<GameData> {
        self.by_id.get(game_id).cloned()
    }
}

fn team(name: &str, abbreviation: &str, score: u32) -> TeamScore {
    TeamScore {
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        display_name: name.to_string(),
        score,
        logo: None,
    }
}

pub fn sample_game(id: &str, state: &str, home_score: u32, away_score: u32) -> GameData {
    GameData {
        id: id.to_string(),
        date: "2026-10-18T17:00Z".to_string(),
        home_team: team("Chiefs", "KC", home_score),
        away_team: team("Bills", "BUF", away_score),
        status: GameStatus {
            period: if state == "in" { 2 } else { 0 },
            clock: "7:42".to_string(),
            state: state.to_string(),
            completed: state == "post",
            detail: "2nd Quarter".to_string(),
        },
    }
}

pub struct TestApp {
    pub db: DatabaseConnection,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_games(StubGames::default()).await
    }

    pub async fn with_games(games: StubGames) -> Self {
        let db = setup_test_db().await;
        let state = AppState {
            db: db.clone(),
            games: Arc::new(games),
        };
        Self {
            db,
            router: app_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a board and return its id
    pub async fn create_board(&self, overrides: Value) -> String {
        let mut body = board_payload();
        if let (Some(body), Some(overrides)) = (body.as_object_mut(), overrides.as_object()) {
            for (key, value) in overrides {
                body.insert(key.clone(), value.clone());
            }
        }

        let (status, response) = self.post("/boards", body).await;
        assert_eq!(status, StatusCode::OK, "create board failed: {}", response);
        response["board"]["id"]
            .as_str()
            .expect("board id missing")
            .to_string()
    }

    pub async fn claim(
        &self,
        board_id: &str,
        row: i64,
        col: i64,
        player: &str,
    ) -> (StatusCode, Value) {
        self.post(
            "/squares",
            json!({
                "boardId": board_id,
                "row": row,
                "col": col,
                "playerName": player,
                "paymentMethod": "venmo",
            }),
        )
        .await
    }
}

pub fn board_payload() -> Value {
    json!({
        "name": "Sunday Pool",
        "teamHome": "Chiefs",
        "teamAway": "Bills",
        "costPerSquare": 1,
        "payoutQ1": 25,
        "payoutQ2": 25,
        "payoutQ3": 25,
        "payoutQ4": 25,
    })
}

/// Parse a stored number permutation (`rowNumbers`/`colNumbers`)
pub fn digits(value: &Value) -> Vec<u8> {
    let raw = value.as_str().expect("numbers are not assigned");
    serde_json::from_str(raw).expect("numbers are not a JSON array")
}
