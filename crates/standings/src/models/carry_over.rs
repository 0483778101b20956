use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// Policy applied when a player is promoted or demoted mid-event.
///
/// Parameters are optional at the type level because they come straight from
/// administrator input; a missing one is a configuration error at compute time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CarryOverPolicy {
    #[serde(rename = "none")]
    NoCarry,
    Full,
    Partial {
        #[serde(default)]
        percentage: Option<Decimal>,
    },
    Capped {
        #[serde(default)]
        spread_cap_per_game: Option<Decimal>,
    },
    SeedingOnly,
}

impl CarryOverPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCarry => "none",
            Self::Full => "full",
            Self::Partial { .. } => "partial",
            Self::Capped { .. } => "capped",
            Self::SeedingOnly => "seeding_only",
        }
    }

    pub fn partial(percentage: Decimal) -> Self {
        Self::Partial {
            percentage: Some(percentage),
        }
    }

    pub fn capped(spread_cap_per_game: Decimal) -> Self {
        Self::Capped {
            spread_cap_per_game: Some(spread_cap_per_game),
        }
    }

    /// Builds a policy from a policy name and its optional parameters.
    pub fn from_parts(
        name: &str,
        percentage: Option<Decimal>,
        spread_cap_per_game: Option<Decimal>,
    ) -> Result<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        let policy = match normalized.as_str() {
            "none" => Self::NoCarry,
            "full" => Self::Full,
            "partial" => Self::Partial { percentage },
            "capped" => Self::Capped {
                spread_cap_per_game,
            },
            "seeding_only" | "seedingonly" => Self::SeedingOnly,
            _ => {
                return Err(EngineError::Configuration(format!(
                    "Unknown carry-over policy: '{}'. Available: none, full, partial, capped, seeding_only",
                    name
                )));
            }
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Partial { percentage: None } => Err(EngineError::Configuration(
                "partial carry-over requires a percentage".to_string(),
            )),
            Self::Partial {
                percentage: Some(p),
            } if p.is_sign_negative() || *p > Decimal::ONE_HUNDRED => {
                Err(EngineError::Configuration(format!(
                    "partial carry-over percentage must be between 0 and 100, got {}",
                    p
                )))
            }
            Self::Capped {
                spread_cap_per_game: None,
            } => Err(EngineError::Configuration(
                "capped carry-over requires a spread cap per game".to_string(),
            )),
            Self::Capped {
                spread_cap_per_game: Some(cap),
            } if cap.is_sign_negative() => Err(EngineError::Configuration(format!(
                "capped carry-over spread cap must be >= 0, got {}",
                cap
            ))),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for CarryOverPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Partial {
                percentage: Some(p),
            } => write!(f, "partial({}%)", p),
            Self::Capped {
                spread_cap_per_game: Some(cap),
            } => write!(f, "capped({}/game)", cap),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Values seeded into the destination division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarryOverResult {
    pub wins: Decimal,
    pub spread: Decimal,
    /// False for seeding-only carry-overs: they order the new division's
    /// initial ranking but never reach official totals.
    pub counts_toward_totals: bool,
}

impl CarryOverResult {
    pub fn zero() -> Self {
        Self {
            wins: Decimal::ZERO,
            spread: Decimal::ZERO,
            counts_toward_totals: true,
        }
    }
}

/// Carry-overs applied to a division, keyed by player.
pub type CarryOvers = BTreeMap<Uuid, CarryOverResult>;
