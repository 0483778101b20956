pub mod models;
pub mod validator;

pub use models::{FORMAT_VERSION, TournamentInfo, TournamentSnapshot};
pub use validator::{SnapshotValidator, ValidationReport};
