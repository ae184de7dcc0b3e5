//! Runtime configuration from environment variables (`.env` honoured)

use std::env;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ESPN_BASE_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl";
pub const DEFAULT_SCOREBOARD_CACHE_TTL_SECS: u64 = 30;
pub const DEFAULT_UPCOMING_GAMES_DAYS: u32 = 30;
pub const DEFAULT_ESPN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub espn_base_url: String,
    pub scoreboard_cache_ttl_secs: u64,
    pub upcoming_games_days: u32,
    pub espn_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = move |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            espn_base_url: lookup("ESPN_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ESPN_BASE_URL.to_string()),
            scoreboard_cache_ttl_secs: parse_or(
                &lookup,
                "SCOREBOARD_CACHE_TTL_SECS",
                DEFAULT_SCOREBOARD_CACHE_TTL_SECS,
            )?,
            upcoming_games_days: parse_or(
                &lookup,
                "UPCOMING_GAMES_DAYS",
                DEFAULT_UPCOMING_GAMES_DAYS,
            )?,
            espn_timeout_secs: parse_or(&lookup, "ESPN_TIMEOUT_SECS", DEFAULT_ESPN_TIMEOUT_SECS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.espn_base_url, DEFAULT_ESPN_BASE_URL);
        assert_eq!(config.scoreboard_cache_ttl_secs, 30);
        assert_eq!(config.upcoming_games_days, 30);
        assert_eq!(config.espn_timeout_secs, 10);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/squares"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("UPCOMING_GAMES_DAYS", "7"),
            ("SCOREBOARD_CACHE_TTL_SECS", " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.upcoming_games_days, 7);
        assert_eq!(config.scoreboard_cache_ttl_secs, 5);
    }

    #[test]
    fn test_missing_database_url() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_number() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("UPCOMING_GAMES_DAYS", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "UPCOMING_GAMES_DAYS", .. }));
    }
}
