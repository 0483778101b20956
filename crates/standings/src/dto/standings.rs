use std::ops::Range;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AggregateRecord, Diagnostic, PlayerStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StandingsRow {
    /// Positional rank, unique across the field.
    pub rank: u32,
    /// Rank of the first row in this row's statistical tie block.
    pub display_rank: u32,
    pub player_id: Uuid,
    pub display_name: String,
    pub seed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    pub status: PlayerStatus,
    pub record: AggregateRecord,
    /// Points against the rest of the tied subset, when that subset played a
    /// complete round robin.
    pub head_to_head: Option<Decimal>,
    pub opponent_win_percentage: Option<Decimal>,
    /// Same comparator values as the previous row through the configured
    /// tie depth.
    pub tied_with_previous: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Standings {
    pub through_round: Option<u32>,
    pub rows: Vec<StandingsRow>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Standings {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, player_id: Uuid) -> Option<&StandingsRow> {
        self.rows.iter().find(|row| row.player_id == player_id)
    }

    pub fn rank_of(&self, player_id: Uuid) -> Option<u32> {
        self.row(player_id).map(|row| row.rank)
    }

    /// Contiguous index ranges of statistically tied rows. Untied rows form
    /// single-element blocks, so the blocks cover every row exactly once.
    pub fn tie_blocks(&self) -> Vec<Range<usize>> {
        let mut blocks = Vec::new();
        let mut start = 0;

        for (idx, row) in self.rows.iter().enumerate().skip(1) {
            if !row.tied_with_previous {
                blocks.push(start..idx);
                start = idx;
            }
        }
        if !self.rows.is_empty() {
            blocks.push(start..self.rows.len());
        }

        blocks
    }
}
