use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AggregateRecord, MatchResult};
use crate::rounding::round_half_up;

/// Opponents' win percentage (strength of schedule) per player: the mean of
/// each faced opponent's `wins / games_played`, one sample per non-bye game,
/// rounded half-up to four places. Players without a non-bye game are absent.
pub fn opponent_win_percentages<'a>(
    records: &BTreeMap<Uuid, AggregateRecord>,
    results: impl IntoIterator<Item = &'a MatchResult>,
) -> BTreeMap<Uuid, Decimal> {
    let mut samples: BTreeMap<Uuid, (Decimal, u32)> = BTreeMap::new();

    for result in results {
        for side in result.sides() {
            let Some(opponent_id) = side.opponent_id else {
                continue;
            };
            let Some(opponent_pct) = records.get(&opponent_id).and_then(|r| r.win_percentage())
            else {
                continue;
            };
            let entry = samples
                .entry(side.player_id)
                .or_insert((Decimal::ZERO, 0));
            entry.0 += opponent_pct;
            entry.1 += 1;
        }
    }

    samples
        .into_iter()
        .map(|(player_id, (sum, count))| {
            (player_id, round_half_up(sum / Decimal::from(count), 4))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use crate::services::aggregation::fold_results;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_mean_of_opponent_win_percentages() {
        let players: Vec<Player> = (1..=3)
            .map(|n| Player::new(id(n), format!("P{}", n), n as u32))
            .collect();
        let results = vec![
            MatchResult::game(id(100), 1, id(1), id(2), 400, 300),
            MatchResult::game(id(100), 2, id(1), id(3), 300, 400),
            MatchResult::game(id(100), 2, id(2), id(3), 400, 300),
        ];
        let records = fold_results(&players, &results, None, Decimal::new(5, 1));
        let owp = opponent_win_percentages(&records, &results);

        // P1 faced P2 (1/2) and P3 (1/2).
        assert_eq!(owp[&id(1)].to_string(), "0.5000");
        assert_eq!(owp[&id(2)], owp[&id(1)]);
    }

    #[test]
    fn test_bye_only_player_has_no_entry() {
        let players = vec![Player::new(id(1), "Ada", 1)];
        let results = vec![MatchResult::bye(id(100), 1, id(1), 50)];
        let records = fold_results(&players, &results, None, Decimal::new(5, 1));
        assert!(opponent_win_percentages(&records, &results).is_empty());
    }
}
