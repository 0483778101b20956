use rust_decimal::Decimal;

use crate::dto::{
    CrossTable, CrossTableCell, CrossTableRow, LastGame, RoundHistory, ScoreboardRow, Standings,
};
use crate::models::GameOutcome;
use crate::rounding::round_half_up;

/// Cross-table in final standings order. Opponent ranks are final ranks, not
/// the ranks held at the time of the game.
pub fn build_cross_table(standings: &Standings, history: &RoundHistory) -> CrossTable {
    let rows = standings
        .rows
        .iter()
        .map(|row| {
            let cells = match history.for_player(row.player_id) {
                Some(player) => player
                    .rounds
                    .iter()
                    .map(|entry| {
                        entry.as_ref().map(|snapshot| CrossTableCell {
                            round: snapshot.round,
                            opponent_id: snapshot.opponent_id,
                            opponent_rank: snapshot
                                .opponent_id
                                .and_then(|id| standings.rank_of(id)),
                            outcome: snapshot.outcome,
                            own_score: snapshot.own_score,
                            opponent_score: snapshot.opponent_score,
                            game_spread: snapshot.game_spread,
                        })
                    })
                    .collect(),
                None => vec![None; history.total_rounds as usize],
            };

            CrossTableRow {
                rank: row.rank,
                display_rank: row.display_rank,
                player_id: row.player_id,
                display_name: row.display_name.clone(),
                record: row.record.clone(),
                cells,
            }
        })
        .collect();

    CrossTable {
        total_rounds: history.total_rounds,
        through_round: standings.through_round,
        rows,
    }
}

pub fn build_scoreboard(standings: &Standings, history: &RoundHistory) -> Vec<ScoreboardRow> {
    standings
        .rows
        .iter()
        .map(|row| {
            let player = history.for_player(row.player_id);
            let non_bye_games = row.record.non_bye_games();
            let average_score = (non_bye_games > 0).then(|| {
                round_half_up(
                    Decimal::from(row.record.points_for) / Decimal::from(non_bye_games),
                    2,
                )
            });
            let high_score = player.and_then(|p| {
                p.played()
                    .filter(|s| s.outcome != GameOutcome::Bye)
                    .map(|s| s.own_score)
                    .max()
            });
            let last_game = player.and_then(|p| p.latest()).map(|s| LastGame {
                round: s.round,
                opponent_id: s.opponent_id,
                opponent_name: s.opponent_name.clone(),
                outcome: s.outcome,
                own_score: s.own_score,
                opponent_score: s.opponent_score,
            });

            ScoreboardRow {
                rank: row.rank,
                display_rank: row.display_rank,
                player_id: row.player_id,
                display_name: row.display_name.clone(),
                wins: row.record.wins,
                losses: row.record.losses,
                ties: row.record.ties,
                spread: row.record.spread,
                average_score,
                high_score,
                last_game,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StandingsConfig;
    use crate::models::{MatchResult, Player};
    use crate::services::aggregation::fold_results;
    use crate::services::history::build_round_history;
    use crate::services::ranking::rank_field;
    use uuid::Uuid;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn fixture() -> (Standings, RoundHistory) {
        let players = vec![
            Player::new(id(1), "Ada", 1),
            Player::new(id(2), "Bo", 2),
            Player::new(id(3), "Cy", 3),
        ];
        let results = vec![
            MatchResult::game(id(100), 1, id(1), id(2), 450, 300),
            MatchResult::bye(id(100), 1, id(3), 50),
            MatchResult::game(id(100), 2, id(3), id(1), 401, 400),
            MatchResult::bye(id(100), 2, id(2), 50),
        ];
        let config = StandingsConfig::default();
        let records = fold_results(&players, &results, None, config.tie_value);
        let played: Vec<&MatchResult> = results.iter().collect();
        let standings = rank_field(&players, &records, &played, &config);
        let history = build_round_history(&players, &results, None, None, &config);
        (standings, history)
    }

    #[test]
    fn test_cross_table_uses_final_ranks() {
        let (standings, history) = fixture();
        let table = build_cross_table(&standings, &history);

        // Cy 2-0 +51, Ada 1-1 +149, Bo 1-1 -100
        assert_eq!(table.rows[0].player_id, id(3));
        let ada = &table.rows[1];
        assert_eq!(ada.player_id, id(1));
        assert_eq!(ada.cells.len(), 2);
        let first = ada.cells[0].as_ref().unwrap();
        assert_eq!(first.opponent_rank, Some(3));
        assert_eq!(first.game_spread, 150);

        let bye = table.rows[0].cells[0].as_ref().unwrap();
        assert_eq!(bye.outcome, GameOutcome::Bye);
        assert_eq!(bye.opponent_rank, None);
    }

    #[test]
    fn test_scoreboard_averages_ignore_byes() {
        let (standings, history) = fixture();
        let scoreboard = build_scoreboard(&standings, &history);

        let cy = &scoreboard[0];
        assert_eq!(cy.average_score.unwrap().to_string(), "401.00");
        assert_eq!(cy.high_score, Some(401));
        let last = cy.last_game.as_ref().unwrap();
        assert_eq!(last.round, 2);
        assert_eq!(last.opponent_name.as_deref(), Some("Ada"));

        let ada = &scoreboard[1];
        assert_eq!(ada.average_score.unwrap().to_string(), "425.00");
        assert_eq!(ada.high_score, Some(450));
    }

    #[test]
    fn test_player_without_games_has_empty_scoreboard_stats() {
        let players = vec![Player::new(id(1), "Ada", 1)];
        let config = StandingsConfig::default();
        let results: Vec<MatchResult> = Vec::new();
        let records = fold_results(&players, &results, None, config.tie_value);
        let standings = rank_field(&players, &records, &[], &config);
        let history = build_round_history(&players, &results, None, None, &config);

        let scoreboard = build_scoreboard(&standings, &history);
        assert_eq!(scoreboard[0].average_score, None);
        assert_eq!(scoreboard[0].high_score, None);
        assert!(scoreboard[0].last_game.is_none());
    }
}
