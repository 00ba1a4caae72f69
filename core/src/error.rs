use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Roster source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
}

/// A string that names no variant of one of the subscriber enums.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind:  &'static str,
    pub value: String,
}

pub type DeskResult<T> = Result<T, DeskError>;
