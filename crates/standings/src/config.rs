use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{EngineError, Result};

/// How deep down the tie-break ladder two adjacent rows must agree before
/// they count as a statistical tie (shared display rank, split prizes).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TieDepth {
    Points,
    #[default]
    Spread,
    HeadToHead,
    OpponentWinPercentage,
}

impl TieDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Spread => "spread",
            Self::HeadToHead => "head_to_head",
            Self::OpponentWinPercentage => "opponent_win_percentage",
        }
    }
}

impl FromStr for TieDepth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "points" | "wins" => Ok(Self::Points),
            "spread" => Ok(Self::Spread),
            "head_to_head" | "h2h" => Ok(Self::HeadToHead),
            "opponent_win_percentage" | "owp" => Ok(Self::OpponentWinPercentage),
            _ => Err(EngineError::Configuration(format!(
                "Unknown tie depth: '{}'. Expected points, spread, head_to_head or opponent_win_percentage",
                s
            ))),
        }
    }
}

impl std::fmt::Display for TieDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upper bound on round numbers, configured or inferred. Rows past it are
/// skipped as out of range.
pub const MAX_ROUNDS: u32 = 1000;

/// Tournament-scoped settings shared by every view of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StandingsConfig {
    /// Added to the win counter of each side of a tied game.
    pub tie_value: Decimal,
    pub tie_depth: TieDepth,
    /// Maximum drift, in whole units, allowed per split prize group.
    pub prize_tolerance: Decimal,
    /// Configured round count; inferred from the results when absent.
    pub total_rounds: Option<u32>,
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            tie_value: Decimal::new(5, 1),
            tie_depth: TieDepth::default(),
            prize_tolerance: Decimal::ONE,
            total_rounds: None,
        }
    }
}

impl StandingsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tie_value.is_sign_negative() || self.tie_value > Decimal::ONE {
            return Err(EngineError::Configuration(format!(
                "tie_value must be between 0 and 1, got {}",
                self.tie_value
            )));
        }
        if self.prize_tolerance.is_sign_negative() {
            return Err(EngineError::Configuration(format!(
                "prize_tolerance must be >= 0, got {}",
                self.prize_tolerance
            )));
        }
        if let Some(total) = self.total_rounds
            && (total == 0 || total > MAX_ROUNDS)
        {
            return Err(EngineError::Configuration(format!(
                "total_rounds must be between 1 and {} when set, got {}",
                MAX_ROUNDS, total
            )));
        }
        Ok(())
    }
}
