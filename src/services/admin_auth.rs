//! Admin PIN and recovery password
//!
//! Both credentials are stored as salted Argon2id hashes in the singleton
//! `admin_settings` row. Hashing runs on the blocking pool.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use tracing::{info, warn};

use crate::entities::admin_settings::{self, SINGLETON_ID};
use crate::entities::prelude::AdminSettings;
use crate::services::error::PoolError;

lazy_static! {
    // Exactly 4 or exactly 6 digits
    static ref PIN_REGEX: Regex = Regex::new(r"^(\d{4}|\d{6})$").unwrap();
}

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn is_valid_pin(pin: &str) -> bool {
    PIN_REGEX.is_match(pin)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

fn hash_blocking(credential: &str) -> Result<String, PoolError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(credential.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PoolError::Internal(format!("Failed to hash credential: {}", e)))
}

fn verify_blocking(credential: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(credential.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "Stored credential hash is unreadable");
            false
        }
    }
}

pub async fn hash_credential(credential: &str) -> Result<String, PoolError> {
    let credential = credential.to_string();
    tokio::task::spawn_blocking(move || hash_blocking(&credential))
        .await
        .map_err(|e| PoolError::Internal(format!("Hashing task failed: {}", e)))?
}

pub async fn verify_credential(credential: &str, hash: &str) -> Result<bool, PoolError> {
    let credential = credential.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || verify_blocking(&credential, &hash))
        .await
        .map_err(|e| PoolError::Internal(format!("Verification task failed: {}", e)))
}

async fn load_settings(
    db: &DatabaseConnection,
) -> Result<Option<admin_settings::Model>, PoolError> {
    Ok(AdminSettings::find_by_id(SINGLETON_ID).one(db).await?)
}

async fn require_settings(db: &DatabaseConnection) -> Result<admin_settings::Model, PoolError> {
    load_settings(db)
        .await?
        .ok_or_else(|| PoolError::StateConflict("Admin not configured".to_string()))
}

pub async fn is_setup_complete(db: &DatabaseConnection) -> Result<bool, PoolError> {
    Ok(load_settings(db).await?.is_some())
}

/// First-run setup. A second setup (including a concurrent one that loses
/// the primary-key race) is rejected.
pub async fn complete_setup(
    db: &DatabaseConnection,
    pin: &str,
    password: &str,
) -> Result<(), PoolError> {
    if !is_valid_pin(pin) {
        return Err(PoolError::Validation("PIN must be 4 or 6 digits".to_string()));
    }
    if !is_valid_password(password) {
        return Err(PoolError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if is_setup_complete(db).await? {
        return Err(PoolError::StateConflict("Setup already complete".to_string()));
    }

    let pin_hash = hash_credential(pin).await?;
    let password_hash = hash_credential(password).await?;
    let now = Utc::now().fixed_offset();

    let settings = admin_settings::ActiveModel {
        id: Set(SINGLETON_ID),
        pin: Set(pin_hash),
        password: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match AdminSettings::insert(settings).exec_without_returning(db).await {
        Ok(_) => {
            info!("Admin setup completed");
            Ok(())
        }
        Err(e) if PoolError::is_unique_violation(&e) => {
            Err(PoolError::StateConflict("Setup already complete".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn verify_pin(db: &DatabaseConnection, pin: &str) -> Result<(), PoolError> {
    if pin.is_empty() {
        return Err(PoolError::Validation("PIN is required".to_string()));
    }

    let settings = require_settings(db).await?;
    if !verify_credential(pin, &settings.pin).await? {
        warn!("Admin PIN verification failed");
        return Err(PoolError::Unauthorized("Invalid PIN".to_string()));
    }

    Ok(())
}

/// Replace the PIN after proving knowledge of the recovery password
pub async fn reset_pin(
    db: &DatabaseConnection,
    password: &str,
    new_pin: &str,
) -> Result<(), PoolError> {
    if password.is_empty() || new_pin.is_empty() {
        return Err(PoolError::Validation(
            "Password and new PIN are required".to_string(),
        ));
    }
    if !is_valid_pin(new_pin) {
        return Err(PoolError::Validation("PIN must be 4 or 6 digits".to_string()));
    }

    let settings = require_settings(db).await?;
    if !verify_credential(password, &settings.password).await? {
        warn!("Admin PIN reset rejected: wrong password");
        return Err(PoolError::Unauthorized("Invalid password".to_string()));
    }

    let pin_hash = hash_credential(new_pin).await?;
    let mut active = settings.into_active_model();
    active.pin = Set(pin_hash);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await?;

    info!("Admin PIN reset");
    Ok(())
}
