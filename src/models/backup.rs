//! Full data export/import document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{admin_settings, boards, payment_configs, squares, winners};

pub const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    #[serde(default)]
    pub admin_settings: Vec<admin_settings::Model>,
    #[serde(default)]
    pub boards: Vec<boards::Model>,
    #[serde(default)]
    pub squares: Vec<squares::Model>,
    #[serde(default)]
    pub winners: Vec<winners::Model>,
    #[serde(default)]
    pub payment_configs: Vec<payment_configs::Model>,
}

/// GET /backup response and POST /backup body. `data` is optional on input
/// so a document without it is rejected with a readable error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<BackupData>,
}
