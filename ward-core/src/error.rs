use crate::dates::MalformedDateTimeError;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WardError {
    #[error(transparent)]
    MalformedDateTime(#[from] MalformedDateTimeError),

    #[error("Appointment date cannot be in the past ({requested})")]
    InPast { requested: NaiveDateTime },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: u64 },

    #[error("{kind} {id} cannot go from {from} to {to}")]
    InvalidTransition {
        kind: &'static str,
        id: u64,
        from: String,
        to: String,
    },

    #[error("{kind} {id} is still in use: {reason}")]
    InUse {
        kind: &'static str,
        id: u64,
        reason: String,
    },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read table {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WardError {
    /// A date-time the person at the keyboard can fix by entering it again.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            WardError::MalformedDateTime(_) | WardError::InPast { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WardError>;

/// Rejects empty or whitespace-only text fields.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WardError::Validation {
            field,
            reason: "cannot be empty".to_string(),
        });
    }
    Ok(())
}
