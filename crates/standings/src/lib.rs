pub mod calculator;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod rounding;
pub mod services;

pub use calculator::StandingsCalculator;
pub use config::{StandingsConfig, TieDepth};
pub use error::{EngineError, Result};
pub use services::Aggregation;
