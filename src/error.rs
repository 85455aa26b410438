#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Unknown mood: {0}")]
    InvalidMood(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupt snapshot: {0}")]
    CorruptState(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
