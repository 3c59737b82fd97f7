//! Unified application error type.
//! All modules (cloud, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Local cloud store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Collaborator errors
    // ---------------------------
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Subscription error: {0}")]
    Subscription(String),

    #[error("Not signed in")]
    NotSignedIn,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid preference field: {0} (expected format24h, seconds or date)")]
    InvalidField(String),

    #[error("Invalid toggle value: {0} (expected on or off)")]
    InvalidToggle(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,
}

pub type AppResult<T> = Result<T, AppError>;
