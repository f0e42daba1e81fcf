use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("confidence {0} is outside [0, 1]")]
    InvalidConfidence(f64),

    #[error("missing required field: {0}")]
    MissingField(String),
}
