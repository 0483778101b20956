use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::StandingsConfig;
use crate::models::{AggregateRecord, CarryOvers, Diagnostic, MatchResult, Player};
use crate::services::screening::screen_results;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    pub records: BTreeMap<Uuid, AggregateRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Aggregation {
    pub fn record(&self, player_id: Uuid) -> Option<&AggregateRecord> {
        self.records.get(&player_id)
    }
}

/// Zeroed records for every registered player, seeded with official
/// carry-overs where present.
pub fn initial_records(
    players: &[Player],
    carry_overs: Option<&CarryOvers>,
) -> BTreeMap<Uuid, AggregateRecord> {
    players
        .iter()
        .map(|player| {
            let record = carry_overs
                .and_then(|c| c.get(&player.player_id))
                .map(|carry_over| AggregateRecord::from_carry_over(player.player_id, carry_over))
                .unwrap_or_else(|| AggregateRecord::new(player.player_id));
            (player.player_id, record)
        })
        .collect()
}

/// Folds one screened row into the running records. Sides missing from the
/// map are left alone.
pub fn fold_result(
    records: &mut BTreeMap<Uuid, AggregateRecord>,
    result: &MatchResult,
    tie_value: Decimal,
) {
    for side in result.sides() {
        if let Some(record) = records.get_mut(&side.player_id) {
            record.apply(&side, tie_value);
        }
    }
}

pub fn fold_results<'a>(
    players: &[Player],
    results: impl IntoIterator<Item = &'a MatchResult>,
    carry_overs: Option<&CarryOvers>,
    tie_value: Decimal,
) -> BTreeMap<Uuid, AggregateRecord> {
    let mut records = initial_records(players, carry_overs);
    for result in results {
        fold_result(&mut records, result, tie_value);
    }
    records
}

/// Aggregates every row up to and including `through_round`.
pub fn aggregate_results(
    players: &[Player],
    results: &[MatchResult],
    carry_overs: Option<&CarryOvers>,
    through_round: Option<u32>,
    config: &StandingsConfig,
) -> Aggregation {
    let screened = screen_results(players, results, through_round, config.total_rounds);
    let records = fold_results(
        players,
        screened.accepted.iter().copied(),
        carry_overs,
        config.tie_value,
    );

    debug!(
        "Aggregated {} results for {} players",
        screened.accepted.len(),
        records.len()
    );

    Aggregation {
        records,
        diagnostics: screened.diagnostics,
    }
}
