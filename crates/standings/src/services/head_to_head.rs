use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{GameOutcome, MatchResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairRecord {
    pub games: u32,
    /// Points earned by the first player of the pair against the second.
    pub points: Decimal,
}

/// Directed pairwise records, keyed by (player, opponent).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadToHead {
    pairs: BTreeMap<(Uuid, Uuid), PairRecord>,
}

impl HeadToHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results<'a>(
        results: impl IntoIterator<Item = &'a MatchResult>,
        tie_value: Decimal,
    ) -> Self {
        let mut head_to_head = Self::new();
        for result in results {
            head_to_head.record(result, tie_value);
        }
        head_to_head
    }

    pub fn record(&mut self, result: &MatchResult, tie_value: Decimal) {
        for side in result.sides() {
            let Some(opponent_id) = side.opponent_id else {
                continue;
            };
            let pair = self.pairs.entry((side.player_id, opponent_id)).or_default();
            pair.games += 1;
            pair.points += match side.outcome() {
                GameOutcome::Win => Decimal::ONE,
                GameOutcome::Tie => tie_value,
                GameOutcome::Loss | GameOutcome::Bye => Decimal::ZERO,
            };
        }
    }

    pub fn between(&self, player_id: Uuid, opponent_id: Uuid) -> Option<PairRecord> {
        self.pairs.get(&(player_id, opponent_id)).copied()
    }

    /// True when every pair inside the group has met at least once.
    pub fn is_complete(&self, group: &[Uuid]) -> bool {
        group.iter().enumerate().all(|(i, player_id)| {
            group[i + 1..].iter().all(|opponent_id| {
                self.between(*player_id, *opponent_id)
                    .is_some_and(|pair| pair.games > 0)
            })
        })
    }

    /// Points the player earned against the other members of the group.
    pub fn group_points(&self, player_id: Uuid, group: &[Uuid]) -> Decimal {
        group
            .iter()
            .filter(|opponent_id| **opponent_id != player_id)
            .filter_map(|opponent_id| self.between(player_id, *opponent_id))
            .map(|pair| pair.points)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_records_both_directions() {
        let h2h = HeadToHead::from_results(
            &[MatchResult::game(id(100), 1, id(1), id(2), 400, 300)],
            Decimal::new(5, 1),
        );
        assert_eq!(h2h.between(id(1), id(2)).unwrap().points, Decimal::ONE);
        assert_eq!(h2h.between(id(2), id(1)).unwrap().points, Decimal::ZERO);
        assert_eq!(h2h.between(id(2), id(1)).unwrap().games, 1);
    }

    #[test]
    fn test_byes_are_not_pairings() {
        let h2h = HeadToHead::from_results(
            &[MatchResult::bye(id(100), 1, id(1), 50)],
            Decimal::new(5, 1),
        );
        assert_eq!(h2h, HeadToHead::new());
    }

    #[test]
    fn test_incomplete_group_detected() {
        let results = vec![
            MatchResult::game(id(100), 1, id(1), id(2), 400, 300),
            MatchResult::game(id(100), 2, id(2), id(3), 400, 300),
        ];
        let h2h = HeadToHead::from_results(&results, Decimal::new(5, 1));
        assert!(h2h.is_complete(&[id(1), id(2)]));
        assert!(!h2h.is_complete(&[id(1), id(2), id(3)]));
    }

    #[test]
    fn test_group_points_across_round_robin() {
        let results = vec![
            MatchResult::game(id(100), 1, id(1), id(2), 400, 300),
            MatchResult::game(id(100), 2, id(2), id(3), 400, 300),
            MatchResult::game(id(100), 3, id(3), id(1), 350, 350),
        ];
        let h2h = HeadToHead::from_results(&results, Decimal::new(5, 1));
        let group = [id(1), id(2), id(3)];
        assert!(h2h.is_complete(&group));
        assert_eq!(h2h.group_points(id(1), &group), Decimal::new(15, 1));
        assert_eq!(h2h.group_points(id(2), &group), Decimal::ONE);
        assert_eq!(h2h.group_points(id(3), &group), Decimal::new(5, 1));
    }
}
