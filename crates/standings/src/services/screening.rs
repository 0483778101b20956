use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::config::MAX_ROUNDS;
use crate::models::{Diagnostic, MatchResult, Player};

/// Rows accepted for folding, in processing order, plus everything skipped.
#[derive(Debug, Clone, Default)]
pub struct ScreenedResults<'a> {
    pub accepted: Vec<&'a MatchResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> ScreenedResults<'a> {
    pub fn max_round(&self) -> u32 {
        self.accepted.iter().map(|r| r.round).max().unwrap_or(0)
    }
}

/// Screens raw rows against the roster.
///
/// Rows are visited in (round, recorded_at, input position) order; when a
/// player appears twice in a round the first visited row wins. Rows past
/// `through_round` are dropped silently, rows past `total_rounds` (or
/// [`MAX_ROUNDS`] when no total is configured) are reported.
pub fn screen_results<'a>(
    players: &[Player],
    results: &'a [MatchResult],
    through_round: Option<u32>,
    total_rounds: Option<u32>,
) -> ScreenedResults<'a> {
    let roster: HashSet<Uuid> = players.iter().map(|p| p.player_id).collect();

    let mut ordered: Vec<(usize, &MatchResult)> = results.iter().enumerate().collect();
    ordered.sort_by_key(|(idx, r)| (r.round, r.recorded_at, *idx));

    let mut screened = ScreenedResults::default();
    let mut seen: HashSet<(u32, Uuid)> = HashSet::new();

    for (_, result) in ordered {
        if result.round == 0 {
            screened.diagnostics.push(Diagnostic::InvalidRound {
                player_id: result.player_a,
            });
            continue;
        }

        if through_round.is_some_and(|limit| result.round > limit) {
            continue;
        }

        let limit = total_rounds.unwrap_or(MAX_ROUNDS);
        if result.round > limit {
            screened.diagnostics.push(Diagnostic::RoundOutOfRange {
                round: result.round,
                total_rounds: limit,
            });
            continue;
        }

        let participants = result.participants();

        let unknown: Vec<Uuid> = participants
            .iter()
            .copied()
            .filter(|id| !roster.contains(id))
            .collect();
        if !unknown.is_empty() {
            screened
                .diagnostics
                .extend(unknown.into_iter().map(|player_id| Diagnostic::UnknownPlayer {
                    round: result.round,
                    player_id,
                }));
            continue;
        }

        if !result.is_bye() && result.player_b == Some(result.player_a) {
            screened.diagnostics.push(Diagnostic::SelfPairing {
                round: result.round,
                player_id: result.player_a,
            });
            continue;
        }

        if let Some(&player_id) = participants
            .iter()
            .find(|id| seen.contains(&(result.round, **id)))
        {
            screened.diagnostics.push(Diagnostic::DuplicateResult {
                round: result.round,
                player_id,
            });
            continue;
        }

        for player_id in participants {
            seen.insert((result.round, player_id));
        }
        screened.accepted.push(result);
    }

    debug!(
        "Screened {} result rows: {} accepted, {} skipped",
        results.len(),
        screened.accepted.len(),
        screened.diagnostics.len()
    );

    screened
}
