pub mod config;
pub mod error;
pub mod render;
pub mod schema;
pub mod snapshot;

pub use config::Config;
pub use error::{ReportError, Result};
pub use schema::EngineSchema;
pub use snapshot::{SnapshotValidator, TournamentSnapshot, ValidationReport};
