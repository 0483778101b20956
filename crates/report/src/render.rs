use rust_decimal::Decimal;
use standings::dto::{CrossTable, PrizeDistribution, RoundHistory, ScoreboardRow, Standings};
use standings::models::{CarryOverResult, Diagnostic, GameOutcome};
use uuid::Uuid;

fn number(value: Decimal) -> String {
    value.normalize().to_string()
}

fn signed(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", number(value))
    } else {
        number(value)
    }
}

fn rank_label(display_rank: u32, shared: bool) -> String {
    if shared {
        format!("={}", display_rank)
    } else {
        display_rank.to_string()
    }
}

/// Whether each row shares its display rank with a neighbour.
fn shared_ranks(tied_with_previous: &[bool]) -> Vec<bool> {
    (0..tied_with_previous.len())
        .map(|idx| {
            tied_with_previous[idx] || tied_with_previous.get(idx + 1).copied().unwrap_or(false)
        })
        .collect()
}

fn push_diagnostics(report: &mut String, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    report.push_str(&format!("\nSkipped results ({}):\n", diagnostics.len()));
    for diagnostic in diagnostics {
        report.push_str(&format!("  - {}\n", diagnostic));
    }
}

fn through_label(through_round: Option<u32>) -> String {
    match through_round {
        Some(round) => format!(" after round {}", round),
        None => String::new(),
    }
}

pub fn render_standings(title: &str, standings: &Standings) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== {}: standings{} ===\n\n",
        title,
        through_label(standings.through_round)
    ));
    report.push_str(&format!(
        "{:>5} {:<24} {:>6} {:>6} {:>4} {:>8} {:>4}\n",
        "Rank", "Player", "Wins", "Losses", "Ties", "Spread", "Seed"
    ));
    report.push_str(&"-".repeat(63));
    report.push('\n');

    let tied: Vec<bool> = standings.rows.iter().map(|r| r.tied_with_previous).collect();
    for (row, shared) in standings.rows.iter().zip(shared_ranks(&tied)) {
        report.push_str(&format!(
            "{:>5} {:<24} {:>6} {:>6} {:>4} {:>8} {:>4}\n",
            rank_label(row.display_rank, shared),
            row.display_name,
            number(row.record.wins),
            row.record.losses,
            row.record.ties,
            signed(row.record.spread),
            row.seed
        ));
    }

    push_diagnostics(&mut report, &standings.diagnostics);
    report
}

pub fn render_history(title: &str, history: &RoundHistory) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== {}: round by round{} ===\n",
        title,
        through_label(history.through_round)
    ));

    for player in &history.players {
        report.push_str(&format!("\n{}\n", player.display_name));
        report.push_str(&format!(
            "{:>5} {:<24} {:>3} {:>9} {:>7} {:>8} {:>5}\n",
            "Round", "Opponent", "", "Score", "Record", "Spread", "Rank"
        ));
        for (idx, entry) in player.rounds.iter().enumerate() {
            let Some(snapshot) = entry else {
                report.push_str(&format!("{:>5} {:<24}\n", idx + 1, "-"));
                continue;
            };
            let opponent = snapshot.opponent_name.as_deref().unwrap_or("(bye)");
            let score = if snapshot.outcome == GameOutcome::Bye {
                snapshot.own_score.to_string()
            } else {
                format!("{}-{}", snapshot.own_score, snapshot.opponent_score)
            };
            report.push_str(&format!(
                "{:>5} {:<24} {:>3} {:>9} {:>7} {:>8} {:>5}\n",
                snapshot.round,
                opponent,
                snapshot.outcome.letter(),
                score,
                format!("{}-{}", number(snapshot.wins), snapshot.losses),
                signed(snapshot.spread),
                snapshot.rank.map(|r| r.to_string()).unwrap_or_default()
            ));
        }
    }

    push_diagnostics(&mut report, &history.diagnostics);
    report
}

pub fn render_prizes(title: &str, distribution: &PrizeDistribution) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {}: prizes ===\n\n", title));
    report.push_str(&format!(
        "{:>5} {:<24} {:>10} {:<30}\n",
        "Rank", "Player", "Amount", "Prize"
    ));
    report.push_str(&"-".repeat(72));
    report.push('\n');

    for assignment in distribution.assignments.iter().filter(|a| a.has_prize()) {
        let mut prize = assignment.description.clone().unwrap_or_default();
        if assignment.is_split {
            let original = assignment
                .original_amount
                .map(|total| format!(" of {}", number(total)))
                .unwrap_or_default();
            prize.push_str(&format!(
                " (shared {} ways{})",
                assignment.shared_with, original
            ));
        }
        report.push_str(&format!(
            "{:>5} {:<24} {:>10} {:<30}\n",
            assignment.rank,
            assignment.display_name,
            assignment.amount.map(number).unwrap_or_default(),
            prize.trim()
        ));
    }

    report.push_str(&format!(
        "\nTotal awarded: {}\n",
        number(distribution.total_awarded())
    ));
    for group in &distribution.split_groups {
        if !group.remainder.is_zero() {
            report.push_str(&format!(
                "Ranks {}-{}: {} split {} ways leaves {} unassigned\n",
                group.first_rank,
                group.last_rank,
                number(group.total),
                group.players,
                number(group.remainder)
            ));
        }
    }
    if !distribution.unassigned_ranks.is_empty() {
        let ranks: Vec<String> = distribution
            .unassigned_ranks
            .iter()
            .map(|r| r.to_string())
            .collect();
        report.push_str(&format!("No player for prize ranks: {}\n", ranks.join(", ")));
    }
    report
}

pub fn render_cross_table(title: &str, table: &CrossTable) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== {}: cross-table{} ===\n\n",
        title,
        through_label(table.through_round)
    ));

    report.push_str(&format!("{:>5} {:<24}", "Rank", "Player"));
    for round in 1..=table.total_rounds {
        report.push_str(&format!(" {:>10}", format!("R{}", round)));
    }
    report.push_str(&format!(" {:>6} {:>8}\n", "Wins", "Spread"));

    let tied: Vec<bool> = (0..table.rows.len())
        .map(|idx| idx > 0 && table.rows[idx].display_rank == table.rows[idx - 1].display_rank)
        .collect();
    for (row, shared) in table.rows.iter().zip(shared_ranks(&tied)) {
        report.push_str(&format!(
            "{:>5} {:<24}",
            rank_label(row.display_rank, shared),
            row.display_name
        ));
        for cell in &row.cells {
            let text = match cell {
                Some(cell) if cell.outcome == GameOutcome::Bye => "B".to_string(),
                Some(cell) => format!(
                    "{}{} {}",
                    cell.outcome.letter(),
                    cell.opponent_rank.map(|r| r.to_string()).unwrap_or_default(),
                    signed(Decimal::from(cell.game_spread))
                ),
                None => "-".to_string(),
            };
            report.push_str(&format!(" {:>10}", text));
        }
        report.push_str(&format!(
            " {:>6} {:>8}\n",
            number(row.record.wins),
            signed(row.record.spread)
        ));
    }
    report
}

pub fn render_scoreboard(title: &str, rows: &[ScoreboardRow]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {}: scoreboard ===\n\n", title));
    report.push_str(&format!(
        "{:>5} {:<24} {:>9} {:>8} {:>7} {:>5}  {}\n",
        "Rank", "Player", "Record", "Spread", "Avg", "High", "Last game"
    ));
    report.push_str(&"-".repeat(90));
    report.push('\n');

    for row in rows {
        let last = row
            .last_game
            .as_ref()
            .map(|game| match game.outcome {
                GameOutcome::Bye => format!("R{} bye", game.round),
                outcome => format!(
                    "R{} {} {}-{} vs {}",
                    game.round,
                    outcome.letter(),
                    game.own_score,
                    game.opponent_score,
                    game.opponent_name.as_deref().unwrap_or("?")
                ),
            })
            .unwrap_or_default();
        report.push_str(&format!(
            "{:>5} {:<24} {:>9} {:>8} {:>7} {:>5}  {}\n",
            row.display_rank,
            row.display_name,
            format!("{}-{}", number(row.wins), row.losses),
            signed(row.spread),
            row.average_score.map(|a| a.to_string()).unwrap_or_default(),
            row.high_score.map(|h| h.to_string()).unwrap_or_default(),
            last
        ));
    }
    report
}

pub fn render_carry_over(player: &str, policy: &str, carry_over: &CarryOverResult) -> String {
    format!(
        "{} under {}: wins {}, spread {}{}\n",
        player,
        policy,
        carry_over.wins,
        carry_over.spread,
        if carry_over.counts_toward_totals {
            ""
        } else {
            " (seeding only)"
        }
    )
}

pub fn render_seeding(title: &str, order: &[(Uuid, String)]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {}: initial seeding ===\n\n", title));
    for (idx, (_, name)) in order.iter().enumerate() {
        report.push_str(&format!("{:>5} {}\n", idx + 1, name));
    }
    report
}
