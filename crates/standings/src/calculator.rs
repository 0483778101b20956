use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StandingsConfig;
use crate::dto::{CrossTable, PrizeDistribution, RoundHistory, ScoreboardRow, Standings};
use crate::error::{EngineError, Result};
use crate::models::{CarryOverPolicy, CarryOverResult, CarryOvers, MatchResult, Player, Prize};
use crate::services::aggregation::{Aggregation, aggregate_results, fold_results};
use crate::services::carry_over::{compute_carry_over, seed_division};
use crate::services::history::build_round_history;
use crate::services::prizes::split_prizes;
use crate::services::ranking::rank_field;
use crate::services::screening::screen_results;
use crate::services::views::{build_cross_table, build_scoreboard};

/// Every standings view over one snapshot of a tournament.
///
/// Nothing is cached: each call recomputes from the borrowed rows, so two
/// calls with the same arguments always agree. `through_round` limits a view
/// to rounds up to and including N.
#[derive(Debug, Clone)]
pub struct StandingsCalculator<'a> {
    players: &'a [Player],
    results: &'a [MatchResult],
    carry_overs: Option<&'a CarryOvers>,
    config: StandingsConfig,
}

impl<'a> StandingsCalculator<'a> {
    pub fn new(
        players: &'a [Player],
        results: &'a [MatchResult],
        config: StandingsConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            players,
            results,
            carry_overs: None,
            config,
        })
    }

    /// Official carry-overs seed the aggregates; seeding-only entries are
    /// used by [`Self::seeded_order`] alone.
    pub fn with_carry_overs(mut self, carry_overs: &'a CarryOvers) -> Self {
        self.carry_overs = Some(carry_overs);
        self
    }

    pub fn config(&self) -> &StandingsConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        self.players
    }

    fn check_round(through_round: Option<u32>) -> Result<()> {
        if through_round == Some(0) {
            return Err(EngineError::DataIntegrity(
                "Rounds are numbered from 1; cannot compute as of round 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn aggregate(&self, through_round: Option<u32>) -> Result<Aggregation> {
        Self::check_round(through_round)?;
        Ok(aggregate_results(
            self.players,
            self.results,
            self.carry_overs,
            through_round,
            &self.config,
        ))
    }

    pub fn standings(&self, through_round: Option<u32>) -> Result<Standings> {
        Self::check_round(through_round)?;

        let screened = screen_results(
            self.players,
            self.results,
            through_round,
            self.config.total_rounds,
        );
        let records = fold_results(
            self.players,
            screened.accepted.iter().copied(),
            self.carry_overs,
            self.config.tie_value,
        );

        let mut standings = rank_field(self.players, &records, &screened.accepted, &self.config);
        standings.through_round = through_round;
        standings.diagnostics = screened.diagnostics;

        debug!(
            "Computed standings for {} players from {} results",
            standings.len(),
            screened.accepted.len()
        );

        Ok(standings)
    }

    pub fn round_history(&self, through_round: Option<u32>) -> Result<RoundHistory> {
        Self::check_round(through_round)?;
        Ok(build_round_history(
            self.players,
            self.results,
            self.carry_overs,
            through_round,
            &self.config,
        ))
    }

    pub fn prizes(&self, prizes: &[Prize], through_round: Option<u32>) -> Result<PrizeDistribution> {
        let standings = self.standings(through_round)?;
        split_prizes(&standings, prizes, self.config.prize_tolerance)
    }

    pub fn cross_table(&self, through_round: Option<u32>) -> Result<CrossTable> {
        let standings = self.standings(through_round)?;
        let history = self.round_history(through_round)?;
        Ok(build_cross_table(&standings, &history))
    }

    pub fn scoreboard(&self, through_round: Option<u32>) -> Result<Vec<ScoreboardRow>> {
        let standings = self.standings(through_round)?;
        let history = self.round_history(through_round)?;
        Ok(build_scoreboard(&standings, &history))
    }

    /// Carry-over for a player leaving this division, computed from their
    /// record as of `through_round`.
    pub fn carry_over(
        &self,
        player_id: Uuid,
        policy: &CarryOverPolicy,
        through_round: Option<u32>,
    ) -> Result<CarryOverResult> {
        let aggregation = self.aggregate(through_round)?;
        let record = aggregation.record(player_id).ok_or_else(|| {
            EngineError::DataIntegrity(format!("Player {} is not registered", player_id))
        })?;
        let result = compute_carry_over(record, policy)?;

        info!(
            "Carry-over for {} under {}: wins {}, spread {}, official: {}",
            player_id, policy, result.wins, result.spread, result.counts_toward_totals
        );

        Ok(result)
    }

    /// Initial order of the roster from the attached carry-overs.
    pub fn seeded_order(&self) -> Vec<Uuid> {
        match self.carry_overs {
            Some(carry_overs) => seed_division(self.players, carry_overs),
            None => seed_division(self.players, &CarryOvers::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn roster() -> Vec<Player> {
        vec![
            Player::new(id(1), "Ada", 1),
            Player::new(id(2), "Bo", 2),
            Player::new(id(3), "Cy", 3),
            Player::new(id(4), "Di", 4),
        ]
    }

    fn results() -> Vec<MatchResult> {
        vec![
            MatchResult::game(id(100), 1, id(1), id(2), 450, 300),
            MatchResult::game(id(100), 1, id(3), id(4), 400, 350),
            MatchResult::game(id(100), 2, id(1), id(3), 380, 400),
            MatchResult::game(id(100), 2, id(4), id(2), 300, 300),
        ]
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let players = roster();
        let results = results();
        let config = StandingsConfig {
            tie_value: Decimal::from(2),
            ..StandingsConfig::default()
        };
        let err = StandingsCalculator::new(&players, &results, config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_round_zero_is_a_data_integrity_error() {
        let players = roster();
        let results = results();
        let calculator =
            StandingsCalculator::new(&players, &results, StandingsConfig::default()).unwrap();
        assert!(matches!(
            calculator.standings(Some(0)),
            Err(EngineError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_standings_as_of_round() {
        let players = roster();
        let results = results();
        let calculator =
            StandingsCalculator::new(&players, &results, StandingsConfig::default()).unwrap();

        let after_one = calculator.standings(Some(1)).unwrap();
        assert_eq!(after_one.through_round, Some(1));
        assert_eq!(after_one.rows[0].player_id, id(1));

        let final_standings = calculator.standings(None).unwrap();
        assert_eq!(final_standings.rows[0].player_id, id(3));
        assert_eq!(final_standings.rank_of(id(4)), Some(3));
    }

    #[test]
    fn test_history_ranks_match_standings_as_of_round() {
        let players = roster();
        let results = results();
        let calculator =
            StandingsCalculator::new(&players, &results, StandingsConfig::default()).unwrap();
        let history = calculator.round_history(None).unwrap();

        for round in 1..=2 {
            let standings = calculator.standings(Some(round)).unwrap();
            for player in &history.players {
                let snapshot = player.rounds[round as usize - 1].as_ref().unwrap();
                assert_eq!(snapshot.rank, standings.rank_of(player.player_id));
            }
        }
    }

    #[test]
    fn test_carry_over_for_unknown_player() {
        let players = roster();
        let results = results();
        let calculator =
            StandingsCalculator::new(&players, &results, StandingsConfig::default()).unwrap();
        let err = calculator
            .carry_over(id(42), &CarryOverPolicy::Full, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::DataIntegrity(_)));

        let carried = calculator
            .carry_over(id(1), &CarryOverPolicy::partial(Decimal::from(50)), None)
            .unwrap();
        assert_eq!(carried.wins.to_string(), "0.50");
        assert_eq!(carried.spread.to_string(), "65.00");
    }

    #[test]
    fn test_prizes_follow_standings() {
        let players = roster();
        let results = results();
        let calculator =
            StandingsCalculator::new(&players, &results, StandingsConfig::default()).unwrap();
        let distribution = calculator
            .prizes(
                &[
                    Prize::money(1, Decimal::from(100)),
                    Prize::money(2, Decimal::from(50)),
                ],
                None,
            )
            .unwrap();
        assert_eq!(
            distribution.for_player(id(3)).unwrap().amount,
            Some(Decimal::from(100))
        );
        assert_eq!(
            distribution.for_player(id(1)).unwrap().amount,
            Some(Decimal::from(50))
        );
    }

    #[test]
    fn test_seeded_order_without_carry_overs_follows_seed() {
        let players = roster();
        let results = results();
        let calculator =
            StandingsCalculator::new(&players, &results, StandingsConfig::default()).unwrap();
        assert_eq!(
            calculator.seeded_order(),
            vec![id(1), id(2), id(3), id(4)]
        );
    }
}
