use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error(
        "Prize split for ranks {first_rank}-{last_rank} drifts by {drift} (tolerance {tolerance})"
    )]
    RoundingTolerance {
        first_rank: u32,
        last_rank: u32,
        drift: Decimal,
        tolerance: Decimal,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Errors that must block applying a carry-over or prize list until the
    /// administrator fixes the configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::Configuration(_) | EngineError::Validation(_))
    }

    pub fn is_rounding_tolerance(&self) -> bool {
        matches!(self, EngineError::RoundingTolerance { .. })
    }
}
