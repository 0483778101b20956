use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeAssignment {
    pub rank: u32,
    pub player_id: Uuid,
    pub display_name: String,
    /// `None` for players past the last configured prize or for a
    /// description-only prize.
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub is_split: bool,
    /// Sum of the prize amounts shared by the tie block, kept for display.
    pub original_amount: Option<Decimal>,
    /// Number of players sharing the prize, 1 when unsplit.
    pub shared_with: u32,
}

impl PrizeAssignment {
    pub fn has_prize(&self) -> bool {
        self.amount.is_some() || self.description.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeSplitGroup {
    pub first_rank: u32,
    pub last_rank: u32,
    pub players: u32,
    pub total: Decimal,
    pub share: Decimal,
    /// `total - share * players`, negative when rounding paid out more.
    pub remainder: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeDistribution {
    pub assignments: Vec<PrizeAssignment>,
    pub split_groups: Vec<PrizeSplitGroup>,
    /// Ranks of prizes with no player to receive them.
    pub unassigned_ranks: Vec<u32>,
}

impl PrizeDistribution {
    pub fn total_awarded(&self) -> Decimal {
        self.assignments.iter().filter_map(|a| a.amount).sum()
    }

    pub fn for_player(&self, player_id: Uuid) -> Option<&PrizeAssignment> {
        self.assignments.iter().find(|a| a.player_id == player_id)
    }
}
