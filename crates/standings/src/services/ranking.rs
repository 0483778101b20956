use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::{StandingsConfig, TieDepth};
use crate::dto::{Standings, StandingsRow};
use crate::models::{AggregateRecord, MatchResult, Player};
use crate::services::head_to_head::HeadToHead;
use crate::services::strength::opponent_win_percentages;

/// Optional lookups for criteria 3 and 4 of the ladder. A missing lookup
/// makes its criterion a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieBreakData<'a> {
    pub head_to_head: Option<&'a HeadToHead>,
    pub opponent_win_percentages: Option<&'a BTreeMap<Uuid, Decimal>>,
}

struct Candidate<'a> {
    player: &'a Player,
    record: AggregateRecord,
    head_to_head: Option<Decimal>,
    opponent_win_percentage: Option<Decimal>,
}

fn by_points_and_spread(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.record
        .points()
        .cmp(&a.record.points())
        .then_with(|| b.record.spread.cmp(&a.record.spread))
}

/// Full ladder: points, spread, head-to-head, opponents' win percentage
/// (all descending), then seed and player id ascending.
fn by_ladder(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    by_points_and_spread(a, b)
        .then_with(|| b.head_to_head.cmp(&a.head_to_head))
        .then_with(|| b.opponent_win_percentage.cmp(&a.opponent_win_percentage))
        .then_with(|| a.player.seed.cmp(&b.player.seed))
        .then_with(|| a.player.player_id.cmp(&b.player.player_id))
}

fn is_statistical_tie(a: &Candidate<'_>, b: &Candidate<'_>, depth: TieDepth) -> bool {
    let mut tied = a.record.points() == b.record.points();
    if depth >= TieDepth::Spread {
        tied &= a.record.spread == b.record.spread;
    }
    if depth >= TieDepth::HeadToHead {
        tied &= a.head_to_head == b.head_to_head;
    }
    if depth >= TieDepth::OpponentWinPercentage {
        tied &= a.opponent_win_percentage == b.opponent_win_percentage;
    }
    tied
}

/// Orders every ranked player into standings with unique positional ranks.
///
/// Players without a record rank as 0-0. Head-to-head applies only inside a
/// group sharing points and spread, and only when that group played a complete
/// round robin.
pub fn rank_players(
    players: &[Player],
    records: &BTreeMap<Uuid, AggregateRecord>,
    tiebreaks: TieBreakData<'_>,
    tie_depth: TieDepth,
) -> Standings {
    let mut candidates: Vec<Candidate<'_>> = players
        .iter()
        .filter(|player| player.status.is_ranked())
        .map(|player| Candidate {
            player,
            record: records
                .get(&player.player_id)
                .cloned()
                .unwrap_or_else(|| AggregateRecord::new(player.player_id)),
            head_to_head: None,
            opponent_win_percentage: tiebreaks
                .opponent_win_percentages
                .map(|owp| owp.get(&player.player_id).copied().unwrap_or(Decimal::ZERO)),
        })
        .collect();

    candidates.sort_by(by_points_and_spread);

    if let Some(head_to_head) = tiebreaks.head_to_head {
        let mut start = 0;
        while start < candidates.len() {
            let mut end = start + 1;
            while end < candidates.len()
                && by_points_and_spread(&candidates[start], &candidates[end]) == Ordering::Equal
            {
                end += 1;
            }

            if end - start > 1 {
                let group: Vec<Uuid> = candidates[start..end]
                    .iter()
                    .map(|c| c.player.player_id)
                    .collect();
                if head_to_head.is_complete(&group) {
                    for candidate in &mut candidates[start..end] {
                        candidate.head_to_head =
                            Some(head_to_head.group_points(candidate.player.player_id, &group));
                    }
                }
            }

            start = end;
        }
    }

    candidates.sort_by(by_ladder);

    let mut rows: Vec<StandingsRow> = Vec::with_capacity(candidates.len());
    for (idx, candidate) in candidates.iter().enumerate() {
        let rank = idx as u32 + 1;
        let tied_with_previous =
            idx > 0 && is_statistical_tie(&candidates[idx - 1], candidate, tie_depth);
        let display_rank = match rows.last() {
            Some(previous) if tied_with_previous => previous.display_rank,
            _ => rank,
        };

        rows.push(StandingsRow {
            rank,
            display_rank,
            player_id: candidate.player.player_id,
            display_name: candidate.player.display_name.clone(),
            seed: candidate.player.seed,
            division: candidate.player.division.clone(),
            status: candidate.player.status,
            record: candidate.record.clone(),
            head_to_head: candidate.head_to_head,
            opponent_win_percentage: candidate.opponent_win_percentage,
            tied_with_previous,
        });
    }

    debug!("Ranked {} players", rows.len());

    Standings {
        through_round: None,
        rows,
        diagnostics: Vec::new(),
    }
}

/// Ranks the field with head-to-head and opponents' win percentage derived
/// from the rows folded into `records`.
pub fn rank_field(
    players: &[Player],
    records: &BTreeMap<Uuid, AggregateRecord>,
    results: &[&MatchResult],
    config: &StandingsConfig,
) -> Standings {
    let head_to_head = HeadToHead::from_results(results.iter().copied(), config.tie_value);
    let opponent_win_percentages = opponent_win_percentages(records, results.iter().copied());
    rank_players(
        players,
        records,
        TieBreakData {
            head_to_head: Some(&head_to_head),
            opponent_win_percentages: Some(&opponent_win_percentages),
        },
        config.tie_depth,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchResult, PlayerStatus};
    use crate::services::aggregation::fold_results;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn tie() -> Decimal {
        Decimal::new(5, 1)
    }

    fn roster(n: u128) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(id(i), format!("P{}", i), i as u32))
            .collect()
    }

    fn order(standings: &Standings) -> Vec<Uuid> {
        standings.rows.iter().map(|r| r.player_id).collect()
    }

    #[test]
    fn test_points_then_spread() {
        let players = roster(4);
        let results = vec![
            MatchResult::game(id(100), 1, id(1), id(2), 450, 300),
            MatchResult::game(id(100), 1, id(3), id(4), 400, 350),
            MatchResult::game(id(100), 2, id(1), id(3), 380, 400),
            MatchResult::game(id(100), 2, id(4), id(2), 0, 0),
        ];
        let records = fold_results(&players, &results, None, tie());
        let standings = rank_players(&players, &records, TieBreakData::default(), TieDepth::Spread);

        // C 2-0, A 1-1 +130, D 0.5 -50, B 0.5 -150
        assert_eq!(order(&standings), vec![id(3), id(1), id(4), id(2)]);
        assert_eq!(
            standings.rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_seed_breaks_full_tie_but_tie_is_flagged() {
        let players = roster(2);
        let standings = rank_players(
            &players,
            &BTreeMap::new(),
            TieBreakData::default(),
            TieDepth::Spread,
        );
        assert_eq!(order(&standings), vec![id(1), id(2)]);
        assert!(standings.rows[1].tied_with_previous);
        assert_eq!(standings.rows[1].display_rank, 1);
        assert_eq!(standings.rows[1].rank, 2);
        assert_eq!(standings.tie_blocks(), vec![0..2]);
    }

    #[test]
    fn test_duplicate_seeds_fall_back_to_player_id() {
        let players = vec![
            Player::new(id(9), "Late", 1),
            Player::new(id(3), "Early", 1),
        ];
        let standings = rank_players(
            &players,
            &BTreeMap::new(),
            TieBreakData::default(),
            TieDepth::Spread,
        );
        assert_eq!(order(&standings), vec![id(3), id(9)]);
    }

    #[test]
    fn test_head_to_head_within_tied_pair() {
        let players = roster(4);
        // P1 and P2 end 1-1 with equal spread, P2 beat P1 directly.
        let results = vec![
            MatchResult::game(id(100), 1, id(2), id(1), 400, 350),
            MatchResult::game(id(100), 2, id(1), id(3), 400, 350),
            MatchResult::game(id(100), 2, id(2), id(4), 350, 400),
        ];
        let records = fold_results(&players, &results, None, tie());
        assert_eq!(records[&id(1)].spread, records[&id(2)].spread);

        let h2h = HeadToHead::from_results(&results, tie());
        let with_h2h = rank_players(
            &players,
            &records,
            TieBreakData {
                head_to_head: Some(&h2h),
                opponent_win_percentages: None,
            },
            TieDepth::Spread,
        );
        let p1 = with_h2h.rank_of(id(1)).unwrap();
        let p2 = with_h2h.rank_of(id(2)).unwrap();
        assert!(p2 < p1);
        assert_eq!(with_h2h.row(id(2)).unwrap().head_to_head, Some(Decimal::ONE));

        let without = rank_players(&players, &records, TieBreakData::default(), TieDepth::Spread);
        assert!(without.rank_of(id(1)).unwrap() < without.rank_of(id(2)).unwrap());
    }

    #[test]
    fn test_incomplete_head_to_head_is_skipped() {
        let players = roster(3);
        let h2h = HeadToHead::from_results(
            &[MatchResult::game(id(100), 1, id(3), id(2), 400, 300)],
            tie(),
        );
        // Three-way tie at 0-0, only one pair has met.
        let standings = rank_players(
            &players,
            &BTreeMap::new(),
            TieBreakData {
                head_to_head: Some(&h2h),
                opponent_win_percentages: None,
            },
            TieDepth::HeadToHead,
        );
        assert_eq!(order(&standings), vec![id(1), id(2), id(3)]);
        assert!(standings.rows.iter().all(|r| r.head_to_head.is_none()));
        assert_eq!(standings.tie_blocks(), vec![0..3]);
    }

    #[test]
    fn test_opponent_win_percentage_before_seed() {
        let players = roster(2);
        let mut owp = BTreeMap::new();
        owp.insert(id(1), Decimal::new(25, 2));
        owp.insert(id(2), Decimal::new(75, 2));
        let standings = rank_players(
            &players,
            &BTreeMap::new(),
            TieBreakData {
                head_to_head: None,
                opponent_win_percentages: Some(&owp),
            },
            TieDepth::OpponentWinPercentage,
        );
        assert_eq!(order(&standings), vec![id(2), id(1)]);
        assert!(!standings.rows[1].tied_with_previous);
    }

    #[test]
    fn test_removed_players_are_left_out() {
        let mut players = roster(3);
        players[0].status = PlayerStatus::Removed;
        let standings = rank_players(
            &players,
            &BTreeMap::new(),
            TieBreakData::default(),
            TieDepth::Spread,
        );
        assert_eq!(standings.len(), 2);
        assert_eq!(standings.rank_of(id(1)), None);
        assert_eq!(standings.rank_of(id(2)), Some(1));
    }

    #[test]
    fn test_points_depth_ignores_spread_for_ties() {
        let players = roster(2);
        let results = vec![
            MatchResult::bye(id(100), 1, id(1), 100),
            MatchResult::bye(id(100), 1, id(2), 50),
        ];
        let records = fold_results(&players, &results, None, tie());
        let by_points = rank_players(&players, &records, TieBreakData::default(), TieDepth::Points);
        assert!(by_points.rows[1].tied_with_previous);

        let by_spread = rank_players(&players, &records, TieBreakData::default(), TieDepth::Spread);
        assert!(!by_spread.rows[1].tied_with_previous);
        assert_eq!(by_spread.rows[1].display_rank, 2);
    }
}
