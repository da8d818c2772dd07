use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TripsortError {
    #[error("Malformed rule file {path}: {message}")]
    ConfigMalformed { path: PathBuf, message: String },

    #[error("Invalid pattern '{pattern}' in {list} ({path}): {message}")]
    InvalidPattern {
        path: PathBuf,
        list: String,
        pattern: String,
        message: String,
    },

    #[error("Failed to parse settings {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid record input {path}: {message}")]
    InvalidInput { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TripsortError>;

impl TripsortError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigMalformed { .. } => 2,
            Self::InvalidPattern { .. } => 3,
            Self::ConfigParse { .. } => 4,
            Self::InvalidInput { .. } => 5,
            _ => 1,
        }
    }
}
