use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use uuid::Uuid;

use crate::config::StandingsConfig;
use crate::dto::{PlayerHistory, RoundHistory, RoundSnapshot};
use crate::models::{AggregateRecord, CarryOvers, MatchResult, Player, SideView};
use crate::services::aggregation::{fold_result, initial_records};
use crate::services::ranking::rank_field;
use crate::services::screening::screen_results;

fn snapshot(
    round: u32,
    result: &MatchResult,
    side: &SideView,
    record: &AggregateRecord,
    names: &HashMap<Uuid, &str>,
    ranks: &HashMap<Uuid, u32>,
) -> RoundSnapshot {
    RoundSnapshot {
        round,
        opponent_id: side.opponent_id,
        opponent_name: side
            .opponent_id
            .and_then(|id| names.get(&id))
            .map(|name| name.to_string()),
        outcome: side.outcome(),
        is_forfeit: result.is_forfeit,
        own_score: side.own_score,
        opponent_score: side.opponent_score,
        game_spread: side.game_spread(),
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        spread: record.spread,
        rank: ranks.get(&side.player_id).copied(),
        opponent_rank: side.opponent_id.and_then(|id| ranks.get(&id).copied()),
    }
}

/// Replays results round by round into a wall chart.
///
/// After every round that has results the whole field is re-ranked, so each
/// snapshot carries the rank both sides held at that point. Every player gets
/// exactly `total_rounds` entries, `None` for rounds without a result.
pub fn build_round_history(
    players: &[Player],
    results: &[MatchResult],
    carry_overs: Option<&CarryOvers>,
    through_round: Option<u32>,
    config: &StandingsConfig,
) -> RoundHistory {
    let screened = screen_results(players, results, through_round, config.total_rounds);
    let total_rounds = config.total_rounds.unwrap_or_else(|| screened.max_round());

    let mut by_round: BTreeMap<u32, Vec<&MatchResult>> = BTreeMap::new();
    for result in &screened.accepted {
        by_round.entry(result.round).or_default().push(*result);
    }

    let names: HashMap<Uuid, &str> = players
        .iter()
        .map(|p| (p.player_id, p.display_name.as_str()))
        .collect();
    let mut rounds: HashMap<Uuid, Vec<Option<RoundSnapshot>>> = players
        .iter()
        .map(|p| (p.player_id, vec![None; total_rounds as usize]))
        .collect();

    let mut records = initial_records(players, carry_overs);
    let mut played: Vec<&MatchResult> = Vec::with_capacity(screened.accepted.len());

    for (round, round_results) in by_round {
        for result in &round_results {
            fold_result(&mut records, result, config.tie_value);
        }
        played.extend(round_results.iter().copied());

        let standings = rank_field(players, &records, &played, config);
        let ranks: HashMap<Uuid, u32> = standings
            .rows
            .iter()
            .map(|row| (row.player_id, row.rank))
            .collect();

        for result in &round_results {
            for side in result.sides() {
                let (Some(record), Some(entries)) =
                    (records.get(&side.player_id), rounds.get_mut(&side.player_id))
                else {
                    continue;
                };
                if let Some(slot) = entries.get_mut(round as usize - 1) {
                    *slot = Some(snapshot(round, result, &side, record, &names, &ranks));
                }
            }
        }
    }

    let players: Vec<PlayerHistory> = players
        .iter()
        .map(|player| PlayerHistory {
            player_id: player.player_id,
            display_name: player.display_name.clone(),
            rounds: rounds.remove(&player.player_id).unwrap_or_default(),
        })
        .collect();

    debug!(
        "Built {}-round history for {} players",
        total_rounds,
        players.len()
    );

    RoundHistory {
        total_rounds,
        through_round,
        players,
        diagnostics: screened.diagnostics,
    }
}
