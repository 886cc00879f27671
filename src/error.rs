use thiserror::Error;

#[derive(Error, Debug)]
pub enum CIRecordError {
    #[error("Invalid event snapshot: {0}")]
    EventError(String),

    #[error("Invalid naming convention: {0}")]
    ConventionError(String),

    #[error("Invalid reference time: {0}")]
    TimeError(#[from] chrono::ParseError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CIRecordError>;
