use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Diagnostic, GameOutcome};

/// One player's state after one round, as drawn on the wall chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundSnapshot {
    pub round: u32,
    pub opponent_id: Option<Uuid>,
    pub opponent_name: Option<String>,
    pub outcome: GameOutcome,
    pub is_forfeit: bool,
    pub own_score: u32,
    pub opponent_score: u32,
    pub game_spread: i64,
    pub wins: Decimal,
    pub losses: u32,
    pub ties: u32,
    pub spread: Decimal,
    /// Ranks in the standings recomputed over the whole field after this round.
    pub rank: Option<u32>,
    pub opponent_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerHistory {
    pub player_id: Uuid,
    pub display_name: String,
    /// Exactly `total_rounds` entries; `None` where the player has no result.
    pub rounds: Vec<Option<RoundSnapshot>>,
}

impl PlayerHistory {
    pub fn played(&self) -> impl Iterator<Item = &RoundSnapshot> {
        self.rounds.iter().flatten()
    }

    pub fn latest(&self) -> Option<&RoundSnapshot> {
        self.rounds.iter().rev().flatten().next()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundHistory {
    pub total_rounds: u32,
    pub through_round: Option<u32>,
    pub players: Vec<PlayerHistory>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundHistory {
    pub fn for_player(&self, player_id: Uuid) -> Option<&PlayerHistory> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}
