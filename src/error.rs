//! Error type for the fallible edges of the planner (loading, storage, input validation)
//!
//! The calculation core never returns errors; only record I/O and parsing do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {field} ({reason})")]
    InvalidRecord { field: String, reason: String },

    #[error("Unknown payment frequency: {0}")]
    UnknownFrequency(String),

    #[error("No record with id {0}")]
    RecordNotFound(u64),
}

impl PlannerError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PlannerError::InvalidRecord {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
