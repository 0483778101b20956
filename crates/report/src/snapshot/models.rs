use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use standings::models::{CarryOverResult, MatchResult, Player, Prize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::Result;

pub const FORMAT_VERSION: &str = "1.0.0";

/// Everything the engine needs for one tournament, as exported by the
/// pairing software.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TournamentSnapshot {
    pub format_version: String,
    pub tournament: TournamentInfo,
    pub players: Vec<Player>,
    #[serde(default)]
    pub results: Vec<MatchResult>,
    #[serde(default)]
    pub prizes: Vec<Prize>,
    /// Keyed by player id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub carry_overs: BTreeMap<Uuid, CarryOverResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TournamentInfo {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl TournamentSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Keeps one division: its players, the results between them and their
    /// carry-overs.
    pub fn for_division(&self, division: &str) -> Self {
        let players: Vec<Player> = standings::models::players_in_division(&self.players, division);
        let in_division = |id: Uuid| players.iter().any(|p| p.player_id == id);

        let results = self
            .results
            .iter()
            .filter(|r| r.participants().into_iter().all(in_division))
            .cloned()
            .collect();
        let carry_overs = self
            .carry_overs
            .iter()
            .filter(|(id, _)| in_division(**id))
            .map(|(id, carry_over)| (*id, carry_over.clone()))
            .collect();

        Self {
            format_version: self.format_version.clone(),
            tournament: self.tournament.clone(),
            players,
            results,
            prizes: self.prizes.clone(),
            carry_overs,
        }
    }
}
