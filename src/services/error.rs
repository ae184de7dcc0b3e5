//! Error type shared by the pool services
//!
//! Handlers translate each variant to an HTTP status in `handlers::error`.

use sea_orm::{DbErr, SqlErr};

#[derive(Debug)]
pub enum PoolError {
    /// Bad input shape or range
    Validation(String),
    NotFound(String),
    /// Storage-level uniqueness violation (square already claimed)
    Conflict(String),
    /// Operation not allowed in the entity's current state
    StateConflict(String),
    Unauthorized(String),
    Database(DbErr),
    Internal(String),
}

impl PoolError {
    /// True when the storage layer rejected a write on a unique index or key
    pub fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::Validation(msg) => write!(f, "Validation error: {}", msg),
            PoolError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PoolError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            PoolError::StateConflict(msg) => write!(f, "State conflict: {}", msg),
            PoolError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            PoolError::Database(err) => write!(f, "Database error: {}", err),
            PoolError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for PoolError {
    fn from(err: DbErr) -> Self {
        PoolError::Database(err)
    }
}
