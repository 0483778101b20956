use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    Active,
    Withdrawn,
    Removed,
    Inactive,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Withdrawn => "withdrawn",
            Self::Removed => "removed",
            Self::Inactive => "inactive",
        }
    }

    /// Removed players keep their games on record for their opponents but no
    /// longer hold a place in the standings.
    pub fn is_ranked(&self) -> bool {
        !matches!(self, Self::Removed)
    }
}

/// A tournament-scoped registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    /// Tiebreak of last resort, lower is better.
    #[validate(range(min = 1))]
    pub seed: u32,
    #[serde(default)]
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(player_id: Uuid, display_name: impl Into<String>, seed: u32) -> Self {
        Self {
            player_id,
            display_name: display_name.into(),
            rating: None,
            division: None,
            seed,
            status: PlayerStatus::Active,
        }
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_status(mut self, status: PlayerStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_in_division(&self, division: &str) -> bool {
        self.division.as_deref() == Some(division)
    }
}

/// Roster restricted to one division, in the original registration order.
pub fn players_in_division(players: &[Player], division: &str) -> Vec<Player> {
    players
        .iter()
        .filter(|p| p.is_in_division(division))
        .cloned()
        .collect()
}
