use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;
use validator::Validate;

use crate::dto::{PrizeAssignment, PrizeDistribution, PrizeSplitGroup, Standings, StandingsRow};
use crate::error::{EngineError, Result};
use crate::models::Prize;
use crate::rounding::round_half_up;

fn validate_prizes(prizes: &[Prize]) -> Result<BTreeMap<u32, &Prize>> {
    let mut by_rank = BTreeMap::new();
    for prize in prizes {
        prize.validate()?;
        if by_rank.insert(prize.rank, prize).is_some() {
            return Err(EngineError::Configuration(format!(
                "Duplicate prize for rank {}",
                prize.rank
            )));
        }
    }
    Ok(by_rank)
}

fn assignment(row: &StandingsRow) -> PrizeAssignment {
    PrizeAssignment {
        rank: row.rank,
        player_id: row.player_id,
        display_name: row.display_name.clone(),
        amount: None,
        description: None,
        is_split: false,
        original_amount: None,
        shared_with: 1,
    }
}

fn joined_descriptions(prizes: &[&Prize]) -> Option<String> {
    let descriptions: Vec<&str> = prizes
        .iter()
        .filter_map(|p| p.description.as_deref())
        .collect();
    if descriptions.is_empty() {
        None
    } else {
        Some(descriptions.join(" / "))
    }
}

fn total_amount(prizes: &[&Prize]) -> Option<Decimal> {
    prizes
        .iter()
        .filter_map(|p| p.amount)
        .fold(None, |acc, amount| Some(acc.unwrap_or(Decimal::ZERO) + amount))
}

/// Assigns prizes to ranked standings, splitting across statistical ties.
///
/// Each tie block shares the sum of the prizes whose ranks it covers in equal
/// shares rounded half-up to whole units. A block whose shares drift from the
/// pooled total by more than `tolerance` is rejected.
pub fn split_prizes(
    standings: &Standings,
    prizes: &[Prize],
    tolerance: Decimal,
) -> Result<PrizeDistribution> {
    let by_rank = validate_prizes(prizes)?;
    let mut distribution = PrizeDistribution::default();

    for block in standings.tie_blocks() {
        let rows = &standings.rows[block.clone()];
        let first_rank = block.start as u32 + 1;
        let last_rank = block.end as u32;
        let covered: Vec<&Prize> = by_rank
            .range(first_rank..=last_rank)
            .map(|(_, prize)| *prize)
            .collect();

        if covered.is_empty() {
            distribution.assignments.extend(rows.iter().map(assignment));
            continue;
        }

        if rows.len() == 1 {
            let prize = covered[0];
            distribution.assignments.push(PrizeAssignment {
                amount: prize.amount,
                description: prize.description.clone(),
                original_amount: prize.amount,
                ..assignment(&rows[0])
            });
            continue;
        }

        let players = rows.len() as u32;
        let total = total_amount(&covered);
        let share = total.map(|t| round_half_up(t / Decimal::from(players), 0));

        if let (Some(total), Some(share)) = (total, share) {
            let remainder = total - share * Decimal::from(players);
            if remainder.abs() > tolerance {
                return Err(EngineError::RoundingTolerance {
                    first_rank,
                    last_rank,
                    drift: remainder.abs(),
                    tolerance,
                });
            }
            distribution.split_groups.push(PrizeSplitGroup {
                first_rank,
                last_rank,
                players,
                total,
                share,
                remainder,
            });
        }

        let description = joined_descriptions(&covered);
        distribution
            .assignments
            .extend(rows.iter().map(|row| PrizeAssignment {
                amount: share,
                description: description.clone(),
                is_split: true,
                original_amount: total,
                shared_with: players,
                ..assignment(row)
            }));
    }

    let field = standings.len() as u32;
    distribution.unassigned_ranks = by_rank.keys().copied().filter(|rank| *rank > field).collect();

    debug!(
        "Assigned prizes to {} players, {} split groups, {} unassigned prizes",
        distribution.assignments.iter().filter(|a| a.has_prize()).count(),
        distribution.split_groups.len(),
        distribution.unassigned_ranks.len()
    );

    Ok(distribution)
}
