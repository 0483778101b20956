use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AggregateRecord, GameOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CrossTableCell {
    pub round: u32,
    pub opponent_id: Option<Uuid>,
    /// Opponent's rank in the standings the table was built from.
    pub opponent_rank: Option<u32>,
    pub outcome: GameOutcome,
    pub own_score: u32,
    pub opponent_score: u32,
    pub game_spread: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CrossTableRow {
    pub rank: u32,
    pub display_rank: u32,
    pub player_id: Uuid,
    pub display_name: String,
    pub record: AggregateRecord,
    pub cells: Vec<Option<CrossTableCell>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CrossTable {
    pub total_rounds: u32,
    pub through_round: Option<u32>,
    pub rows: Vec<CrossTableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LastGame {
    pub round: u32,
    pub opponent_id: Option<Uuid>,
    pub opponent_name: Option<String>,
    pub outcome: GameOutcome,
    pub own_score: u32,
    pub opponent_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreboardRow {
    pub rank: u32,
    pub display_rank: u32,
    pub player_id: Uuid,
    pub display_name: String,
    pub wins: Decimal,
    pub losses: u32,
    pub ties: u32,
    pub spread: Decimal,
    pub average_score: Option<Decimal>,
    pub high_score: Option<u32>,
    pub last_game: Option<LastGame>,
}
