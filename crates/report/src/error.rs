use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read snapshot: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Engine error: {0}")]
    EngineError(#[from] standings::EngineError),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
