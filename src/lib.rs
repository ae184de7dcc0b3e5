// src/lib.rs

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use services::games::GameDataSource;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub games: Arc<dyn GameDataSource>,
}

pub mod entities {
    pub mod prelude;
    pub mod admin_settings;
    pub mod boards;
    pub mod payment_configs;
    pub mod squares;
    pub mod winners;
}

pub mod services {
    pub mod error;
    pub mod numbers;
    pub mod boards;
    pub mod squares;
    pub mod winners;
    pub mod admin_auth;
    pub mod backup;
    pub mod games;
    pub mod espn;
    pub mod display;
}

pub mod config;
pub mod models;
pub mod handlers;
pub mod routes;
