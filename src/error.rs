//! Error types for Parkit server

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::VehicleCategory;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Out time provided is incorrect: {}", display_out_time(.out_time))]
    InvalidInterval { out_time: Option<DateTime<Utc>> },

    #[error("Unsupported vehicle category: {0}")]
    UnsupportedCategory(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No parking spot available for {0}")]
    CapacityExhausted(VehicleCategory),

    #[error("Fare of a {0} stay is too large to represent")]
    FareOverflow(VehicleCategory),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Expected absences (no open ticket, facility full) abort a workflow
    /// gracefully; everything else is a failure of that invocation.
    pub fn is_expected(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::CapacityExhausted(_))
    }
}

fn display_out_time(out_time: &Option<DateTime<Utc>>) -> String {
    match out_time {
        Some(t) => t.to_rfc3339(),
        None => "none".to_string(),
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
