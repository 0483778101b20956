use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{AggregateRecord, CarryOverPolicy, CarryOverResult, CarryOvers, Player};
use crate::rounding::round_cents;

/// Values to seed into the destination division when a player moves.
///
/// Every output is rounded half-up to two places. The source record is never
/// modified; applying the result is up to the caller.
pub fn compute_carry_over(
    record: &AggregateRecord,
    policy: &CarryOverPolicy,
) -> Result<CarryOverResult> {
    let (wins, spread, counts_toward_totals) = match policy {
        CarryOverPolicy::NoCarry => (Decimal::ZERO, Decimal::ZERO, true),
        CarryOverPolicy::Full => (record.wins, record.spread, true),
        CarryOverPolicy::Partial { percentage } => {
            let percentage = percentage.ok_or_else(|| {
                EngineError::Configuration("partial carry-over requires a percentage".to_string())
            })?;
            policy.validate()?;
            let fraction = percentage / Decimal::ONE_HUNDRED;
            (record.wins * fraction, record.spread * fraction, true)
        }
        CarryOverPolicy::Capped {
            spread_cap_per_game,
        } => {
            let cap = spread_cap_per_game.ok_or_else(|| {
                EngineError::Configuration(
                    "capped carry-over requires a spread cap per game".to_string(),
                )
            })?;
            policy.validate()?;
            let limit = cap
                .checked_mul(Decimal::from(record.games_played))
                .ok_or_else(|| {
                    EngineError::Configuration(format!(
                        "spread cap {} over {} games is out of range",
                        cap, record.games_played
                    ))
                })?;
            (record.wins, record.spread.min(limit), true)
        }
        CarryOverPolicy::SeedingOnly => (record.wins, record.spread, false),
    };

    let result = CarryOverResult {
        wins: round_cents(wins),
        spread: round_cents(spread),
        counts_toward_totals,
    };

    debug!(
        "Carry-over for player {} under {}: wins {}, spread {}",
        record.player_id, policy, result.wins, result.spread
    );

    Ok(result)
}

/// Initial order of a destination division.
///
/// Seeding-only and official carry-overs both count here: carried wins and
/// spread descending, then existing seed and player id. Players without a
/// carry-over start from zero.
pub fn seed_division(players: &[Player], carry_overs: &CarryOvers) -> Vec<Uuid> {
    let zero = CarryOverResult::zero();
    let mut ordered: Vec<(&Player, &CarryOverResult)> = players
        .iter()
        .map(|player| {
            (
                player,
                carry_overs.get(&player.player_id).unwrap_or(&zero),
            )
        })
        .collect();

    ordered.sort_by(|(a, a_carry), (b, b_carry)| {
        b_carry
            .wins
            .cmp(&a_carry.wins)
            .then_with(|| b_carry.spread.cmp(&a_carry.spread))
            .then_with(|| a.seed.cmp(&b.seed))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    ordered.into_iter().map(|(player, _)| player.player_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(wins: i64, spread: i64, games_played: u32) -> AggregateRecord {
        AggregateRecord {
            wins: Decimal::from(wins),
            spread: Decimal::from(spread),
            games_played,
            ..AggregateRecord::new(Uuid::from_u128(1))
        }
    }

    #[test]
    fn test_partial_fifty_is_exact() {
        let result = compute_carry_over(
            &record(7, 133, 10),
            &CarryOverPolicy::partial(Decimal::from(50)),
        )
        .unwrap();
        assert_eq!(result.wins.to_string(), "3.50");
        assert_eq!(result.spread.to_string(), "66.50");
        assert!(result.counts_toward_totals);
    }

    #[test]
    fn test_partial_rounds_half_up() {
        // 0.5% of 333 = 1.665
        let result = compute_carry_over(
            &record(1, 333, 3),
            &CarryOverPolicy::partial(Decimal::new(5, 1)),
        )
        .unwrap();
        assert_eq!(result.spread.to_string(), "1.67");
        assert_eq!(result.wins.to_string(), "0.01");
    }

    #[test]
    fn test_none_and_full() {
        let source = record(7, 133, 10);
        let none = compute_carry_over(&source, &CarryOverPolicy::NoCarry).unwrap();
        assert!(none.wins.is_zero() && none.spread.is_zero());

        let full = compute_carry_over(&source, &CarryOverPolicy::Full).unwrap();
        assert_eq!(full.wins, Decimal::from(7));
        assert_eq!(full.spread, Decimal::from(133));
        assert!(full.counts_toward_totals);
    }

    #[test]
    fn test_capped_only_bounds_from_above() {
        let policy = CarryOverPolicy::capped(Decimal::from(10));

        let positive = compute_carry_over(&record(7, 133, 10), &policy).unwrap();
        assert_eq!(positive.spread, Decimal::from(100));
        assert_eq!(positive.wins, Decimal::from(7));

        let under_cap = compute_carry_over(&record(7, 60, 10), &policy).unwrap();
        assert_eq!(under_cap.spread, Decimal::from(60));

        let negative = compute_carry_over(&record(2, -240, 10), &policy).unwrap();
        assert_eq!(negative.spread, Decimal::from(-240));
    }

    #[test]
    fn test_cap_overflow_is_a_configuration_error() {
        let policy = CarryOverPolicy::capped(Decimal::MAX);
        let err = compute_carry_over(&record(7, 133, 10), &policy).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_seeding_only_matches_full_but_is_flagged() {
        let source = record(7, 133, 10);
        let full = compute_carry_over(&source, &CarryOverPolicy::Full).unwrap();
        let seeding = compute_carry_over(&source, &CarryOverPolicy::SeedingOnly).unwrap();
        assert_eq!(full.wins, seeding.wins);
        assert_eq!(full.spread, seeding.spread);
        assert!(!seeding.counts_toward_totals);
    }

    #[test]
    fn test_missing_parameters_are_configuration_errors() {
        let source = record(7, 133, 10);
        let partial = CarryOverPolicy::Partial { percentage: None };
        let capped = CarryOverPolicy::Capped {
            spread_cap_per_game: None,
        };
        assert!(
            compute_carry_over(&source, &partial)
                .unwrap_err()
                .is_configuration()
        );
        assert!(
            compute_carry_over(&source, &capped)
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn test_seed_division_orders_by_carried_record() {
        let players = vec![
            Player::new(Uuid::from_u128(1), "Ada", 1),
            Player::new(Uuid::from_u128(2), "Bo", 2),
            Player::new(Uuid::from_u128(3), "Cy", 3),
        ];
        let mut carry_overs = CarryOvers::new();
        carry_overs.insert(
            Uuid::from_u128(3),
            CarryOverResult {
                wins: Decimal::from(5),
                spread: Decimal::from(40),
                counts_toward_totals: false,
            },
        );
        carry_overs.insert(
            Uuid::from_u128(2),
            CarryOverResult {
                wins: Decimal::from(5),
                spread: Decimal::from(90),
                counts_toward_totals: false,
            },
        );

        assert_eq!(
            seed_division(&players, &carry_overs),
            vec![Uuid::from_u128(2), Uuid::from_u128(3), Uuid::from_u128(1)]
        );
    }
}
