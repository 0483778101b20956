use super::models::{FORMAT_VERSION, TournamentSnapshot};
use crate::{ReportError, Result};
use standings::config::MAX_ROUNDS;
use std::collections::{HashMap, HashSet};
use tracing::warn;
use validator::Validate;

pub struct SnapshotValidator;

impl SnapshotValidator {
    /// Structural checks that must pass before the engine runs. Row-level
    /// anomalies the engine already skips are reported as warnings only.
    pub fn validate(snapshot: &TournamentSnapshot) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if snapshot.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                snapshot.format_version, FORMAT_VERSION
            ));
        }

        if snapshot.tournament.name.trim().is_empty() {
            report
                .errors
                .push("Tournament name is required".to_string());
        }
        if let Some(total) = snapshot.tournament.total_rounds
            && (total == 0 || total > MAX_ROUNDS)
        {
            report.errors.push(format!(
                "Tournament total_rounds must be between 1 and {}, got {}",
                MAX_ROUNDS, total
            ));
        }

        if snapshot.players.is_empty() {
            report
                .errors
                .push("At least one player is required".to_string());
        }

        let mut player_ids = HashSet::new();
        let mut seeds: HashMap<u32, &str> = HashMap::new();
        for player in &snapshot.players {
            if let Err(errors) = player.validate() {
                report.errors.push(format!(
                    "Player '{}' is invalid: {}",
                    player.display_name, errors
                ));
            }
            if !player_ids.insert(player.player_id) {
                report
                    .errors
                    .push(format!("Duplicate player id: {}", player.player_id));
            }
            if let Some(other) = seeds.insert(player.seed, &player.display_name) {
                report.warnings.push(format!(
                    "Players '{}' and '{}' share seed {}; player id decides their order",
                    other, player.display_name, player.seed
                ));
            }
        }

        if snapshot.results.is_empty() {
            report
                .warnings
                .push("Snapshot has no results yet".to_string());
        }

        for (idx, result) in snapshot.results.iter().enumerate() {
            let label = format!("Result #{} (round {})", idx + 1, result.round);

            if result.tournament_id != snapshot.tournament.id {
                report.errors.push(format!(
                    "{} belongs to tournament {}",
                    label, result.tournament_id
                ));
            }
            if result.round == 0 {
                report
                    .warnings
                    .push(format!("{} has round 0 and will be skipped", label));
            }
            let limit = snapshot.tournament.total_rounds.unwrap_or(MAX_ROUNDS);
            if result.round > limit {
                report.warnings.push(format!(
                    "{} is beyond the {} configured rounds and will be skipped",
                    label, limit
                ));
            }
            for participant in result.participants() {
                if !player_ids.contains(&participant) {
                    report.warnings.push(format!(
                        "{} references unknown player {} and will be skipped",
                        label, participant
                    ));
                }
            }
            if !result.is_bye() && result.score_a.is_none() && result.score_b.is_none() {
                report
                    .warnings
                    .push(format!("{} has no scores; counted as 0-0", label));
            }
        }

        let mut prize_ranks = HashSet::new();
        for prize in &snapshot.prizes {
            if let Err(errors) = prize.validate() {
                report
                    .errors
                    .push(format!("Prize for rank {} is invalid: {}", prize.rank, errors));
            }
            if !prize_ranks.insert(prize.rank) {
                report
                    .errors
                    .push(format!("Duplicate prize for rank {}", prize.rank));
            }
        }
        if let Some(highest) = prize_ranks.iter().max()
            && *highest as usize > snapshot.players.len()
        {
            report.warnings.push(format!(
                "Prizes go down to rank {} but only {} players are registered",
                highest,
                snapshot.players.len()
            ));
        }

        for player_id in snapshot.carry_overs.keys() {
            if !player_ids.contains(player_id) {
                report.warnings.push(format!(
                    "Carry-over for unknown player {} is ignored",
                    player_id
                ));
            }
        }

        if !report.errors.is_empty() {
            Err(ReportError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
