//! Report error types.

use thiserror::Error;

use crate::config::SettingsError;
use crate::reminder::ReminderError;
use crate::store::StoreError;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while building the appointment sheet.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Appointment, project or hierarchy lookup failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The sales person filter names no known sales person.
    #[error("unknown sales person: {0}")]
    UnknownSalesPerson(String),

    /// The reminder schedule could not be computed.
    #[error("reminder error: {0}")]
    Reminder(#[from] ReminderError),

    /// Filters could not be parsed, or output could not be written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Settings(#[from] SettingsError),
}
