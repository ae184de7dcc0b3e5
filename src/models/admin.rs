use serde::{Deserialize, Serialize};

/// POST /admin/setup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupRequest {
    #[serde(default)]
    pub pin: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatusResponse {
    pub setup_complete: bool,
}

/// POST /admin/verify-pin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyPinRequest {
    #[serde(default)]
    pub pin: Option<String>,
}

/// POST /admin/reset-pin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPinRequest {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub new_pin: Option<String>,
}
