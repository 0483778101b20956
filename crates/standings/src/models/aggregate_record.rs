use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::carry_over::CarryOverResult;
use super::match_result::{GameOutcome, SideView};

/// Cumulative record for one player, always rebuilt from result rows.
///
/// `wins` already contains the tie value for every tied game, so total
/// points and wins are the same number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AggregateRecord {
    pub player_id: Uuid,
    pub wins: Decimal,
    pub losses: u32,
    pub ties: u32,
    pub spread: Decimal,
    pub games_played: u32,
    pub byes: u32,
    /// Points scored in non-bye games.
    pub points_for: i64,
    pub points_against: i64,
    /// Official carried wins already inside `wins`; they have no games
    /// behind them, so win percentage leaves them out.
    #[serde(skip)]
    pub carried_wins: Decimal,
}

impl AggregateRecord {
    pub fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            wins: Decimal::ZERO,
            losses: 0,
            ties: 0,
            spread: Decimal::ZERO,
            games_played: 0,
            byes: 0,
            points_for: 0,
            points_against: 0,
            carried_wins: Decimal::ZERO,
        }
    }

    /// Starting record in a destination division. Seeding-only carry-overs
    /// never reach official totals.
    pub fn from_carry_over(player_id: Uuid, carry_over: &CarryOverResult) -> Self {
        let mut record = Self::new(player_id);
        if carry_over.counts_toward_totals {
            record.wins = carry_over.wins;
            record.carried_wins = carry_over.wins;
            record.spread = carry_over.spread;
        }
        record
    }

    pub fn apply(&mut self, side: &SideView, tie_value: Decimal) {
        match side.outcome() {
            GameOutcome::Bye => {
                self.wins += Decimal::ONE;
                self.byes += 1;
            }
            GameOutcome::Win => self.wins += Decimal::ONE,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Tie => {
                self.wins += tie_value;
                self.ties += 1;
            }
        }

        if !side.is_bye() {
            self.points_for += i64::from(side.own_score);
            self.points_against += i64::from(side.opponent_score);
        }
        self.spread += Decimal::from(side.game_spread());
        self.games_played += 1;
    }

    pub fn points(&self) -> Decimal {
        self.wins
    }

    pub fn non_bye_games(&self) -> u32 {
        self.games_played.saturating_sub(self.byes)
    }

    pub fn win_percentage(&self) -> Option<Decimal> {
        if self.games_played == 0 {
            return None;
        }
        Some((self.wins - self.carried_wins) / Decimal::from(self.games_played))
    }
}
