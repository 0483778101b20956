use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use report::{Config, ReportError, SnapshotValidator, TournamentSnapshot, render, schema};
use rust_decimal::Decimal;
use serde::Serialize;
use standings::StandingsCalculator;
use standings::models::{CarryOverPolicy, log_diagnostics};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "standings-report")]
#[command(about = "Tournament standings, tie-break and prize reports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "STANDINGS_SNAPSHOT", global = true)]
    snapshot: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Only count rounds up to and including this one
    #[arg(long, global = true)]
    as_of_round: Option<u32>,

    /// Restrict the report to one division
    #[arg(long, global = true)]
    division: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommand),
    /// Print the JSON schema of every output type
    Schema,
}

/// Commands that read a snapshot.
#[derive(Subcommand)]
enum ReportCommand {
    Standings,
    History {
        #[arg(long)]
        player: Option<Uuid>,
    },
    Prizes,
    CrossTable,
    Scoreboard,
    CarryOver {
        #[arg(long)]
        player: Uuid,

        /// none, full, partial, capped or seeding_only
        #[arg(long)]
        policy: String,

        #[arg(long)]
        percentage: Option<Decimal>,

        #[arg(long)]
        cap: Option<Decimal>,
    },
    SeedDivision,
    Validate,
}

#[derive(Serialize)]
struct SeededPlayer {
    position: usize,
    player_id: Uuid,
    display_name: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "standings_report={},report={},standings={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Schema => {
            println!("{}", schema::schema_json()?);
            Ok(())
        }
        Commands::Report(command) => run(&cli, command),
    }
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

fn run(cli: &Cli, command: &ReportCommand) -> Result<()> {
    let path = cli
        .snapshot
        .as_ref()
        .context("No snapshot given; pass --snapshot or set STANDINGS_SNAPSHOT")?;

    tracing::info!("Loading snapshot from: {}", path.display());
    let mut snapshot = TournamentSnapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    tracing::info!(
        "Loaded tournament: {} (v{}, {} players, {} results)",
        snapshot.tournament.name,
        snapshot.format_version,
        snapshot.players.len(),
        snapshot.results.len()
    );

    let validation_report = SnapshotValidator::validate(&snapshot)?;
    validation_report.log_warnings();

    if let Some(division) = &cli.division {
        snapshot = snapshot.for_division(division);
        tracing::info!(
            "Division {}: {} players, {} results",
            division,
            snapshot.players.len(),
            snapshot.results.len()
        );
    }

    let config = Config::from_env()
        .context("Failed to load standings configuration")?
        .with_snapshot_rounds(snapshot.tournament.total_rounds);
    tracing::debug!("Using configuration: {:?}", config.standings);

    let calculator = StandingsCalculator::new(&snapshot.players, &snapshot.results, config.standings)?
        .with_carry_overs(&snapshot.carry_overs);
    let title = snapshot.tournament.name.as_str();
    let as_of = cli.as_of_round;

    match command {
        ReportCommand::Standings => {
            let standings = calculator.standings(as_of)?;
            log_diagnostics(&standings.diagnostics);
            emit(cli.format, &standings, || {
                render::render_standings(title, &standings)
            })?;
        }
        ReportCommand::History { player } => {
            let mut history = calculator.round_history(as_of)?;
            log_diagnostics(&history.diagnostics);
            if let Some(player_id) = player {
                history.players.retain(|p| p.player_id == *player_id);
                if history.players.is_empty() {
                    return Err(ReportError::UnknownPlayer(player_id.to_string()).into());
                }
            }
            emit(cli.format, &history, || render::render_history(title, &history))?;
        }
        ReportCommand::Prizes => {
            let distribution = calculator
                .prizes(&snapshot.prizes, as_of)
                .context("Failed to split prizes")?;
            emit(cli.format, &distribution, || {
                render::render_prizes(title, &distribution)
            })?;
        }
        ReportCommand::CrossTable => {
            let table = calculator.cross_table(as_of)?;
            emit(cli.format, &table, || render::render_cross_table(title, &table))?;
        }
        ReportCommand::Scoreboard => {
            let rows = calculator.scoreboard(as_of)?;
            emit(cli.format, &rows, || render::render_scoreboard(title, &rows))?;
        }
        ReportCommand::CarryOver {
            player,
            policy,
            percentage,
            cap,
        } => {
            let name = snapshot
                .players
                .iter()
                .find(|p| p.player_id == *player)
                .map(|p| p.display_name.clone())
                .ok_or_else(|| ReportError::UnknownPlayer(player.to_string()))?;
            let policy = CarryOverPolicy::from_parts(policy, *percentage, *cap)
                .context("Invalid carry-over policy")?;
            let carry_over = calculator.carry_over(*player, &policy, as_of)?;
            emit(cli.format, &carry_over, || {
                render::render_carry_over(&name, &policy.to_string(), &carry_over)
            })?;
        }
        ReportCommand::SeedDivision => {
            let seeded: Vec<SeededPlayer> = calculator
                .seeded_order()
                .into_iter()
                .enumerate()
                .filter_map(|(idx, player_id)| {
                    snapshot
                        .players
                        .iter()
                        .find(|p| p.player_id == player_id)
                        .map(|p| SeededPlayer {
                            position: idx + 1,
                            player_id,
                            display_name: p.display_name.clone(),
                        })
                })
                .collect();
            emit(cli.format, &seeded, || {
                let order: Vec<(Uuid, String)> = seeded
                    .iter()
                    .map(|s| (s.player_id, s.display_name.clone()))
                    .collect();
                render::render_seeding(title, &order)
            })?;
        }
        ReportCommand::Validate => {
            let standings = calculator.standings(as_of)?;
            log_diagnostics(&standings.diagnostics);
            tracing::info!(
                "✓ Snapshot is valid: {} warning(s), {} skipped result(s)",
                validation_report.warnings.len(),
                standings.diagnostics.len()
            );
        }
    }

    Ok(())
}
