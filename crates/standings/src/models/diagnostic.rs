use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

/// A result row that was skipped instead of failing the whole computation.
/// Meant for administrators, not the public standings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    UnknownPlayer { round: u32, player_id: Uuid },
    InvalidRound { player_id: Uuid },
    SelfPairing { round: u32, player_id: Uuid },
    DuplicateResult { round: u32, player_id: Uuid },
    RoundOutOfRange { round: u32, total_rounds: u32 },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPlayer { round, player_id } => write!(
                f,
                "round {}: result references player {} who is not on the roster",
                round, player_id
            ),
            Self::InvalidRound { player_id } => {
                write!(f, "result for player {} has round 0", player_id)
            }
            Self::SelfPairing { round, player_id } => {
                write!(f, "round {}: player {} is paired with themselves", round, player_id)
            }
            Self::DuplicateResult { round, player_id } => write!(
                f,
                "round {}: player {} already has a result in this round",
                round, player_id
            ),
            Self::RoundOutOfRange {
                round,
                total_rounds,
            } => write!(
                f,
                "round {} is beyond the configured {} rounds",
                round, total_rounds
            ),
        }
    }
}

pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!("Skipped result: {}", diagnostic);
    }
}
