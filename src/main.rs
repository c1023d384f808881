use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nrr_planner::api::{build_router, state::AppState};
use nrr_planner::config::AppConfig;
use nrr_planner::models::{RangeResult, ScenarioInput, StandingsTable, Toss};
use nrr_planner::search::compute_range;
use nrr_planner::storage::load_points_table;

#[derive(Parser)]
#[command(name = "nrr-planner")]
#[command(about = "Cricket points table planner: margins needed to reach a league position")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Points table file (.json or .jsonl)
        #[arg(long)]
        points_table: Option<PathBuf>,
    },

    /// Compute the qualifying range for one scenario
    Calculate {
        #[arg(long)]
        team: String,

        #[arg(long)]
        opponent: String,

        /// Overs quota per innings
        #[arg(long, default_value = "20")]
        overs: u32,

        /// Runs scored batting first, or runs conceded when bowling first
        #[arg(long)]
        runs: u32,

        /// "bat" or "bowl"
        #[arg(long)]
        toss: Toss,

        /// Target league position (1 = top)
        #[arg(long)]
        position: usize,

        /// Points table file (.json or .jsonl)
        #[arg(long)]
        points_table: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the current standings
    Table {
        /// Points table file (.json or .jsonl)
        #[arg(long)]
        points_table: Option<PathBuf>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_table(config: &AppConfig, override_path: Option<PathBuf>) -> Result<StandingsTable> {
    let path = override_path.unwrap_or_else(|| config.points_table.clone());
    load_points_table(&path).with_context(|| format!("loading points table {:?}", path))
}

fn print_table(table: &StandingsTable) {
    println!(
        "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>4} {:>8}",
        "Pos", "Team", "M", "W", "L", "Pts", "NRR"
    );
    for (index, entry) in table.ranked().iter().enumerate() {
        println!(
            "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>4} {:>+8.3}",
            index + 1,
            entry.name,
            entry.matches_played,
            entry.wins,
            entry.losses,
            entry.points,
            entry.net_run_rate
        );
    }
}

fn print_range(scenario: &ScenarioInput, result: &RangeResult) {
    println!(
        "\n=== {} vs {} ({} overs) ===",
        scenario.team, scenario.opponent, scenario.overs
    );

    if !result.is_reachable() {
        println!(
            "Position {} is not reachable from this match.",
            scenario.desired_position
        );
        return;
    }

    match result {
        RangeResult::Batting(range) => {
            println!(
                "Defending {}: restrict {} to {}..={} runs",
                scenario.runs, scenario.opponent, range.min_restrict_runs, range.max_restrict_runs
            );
        }
        RangeResult::Chase(range) => {
            println!(
                "Chasing {}: win in {} to {} overs",
                range.runs_to_chase, range.min_overs, range.max_overs
            );
        }
    }

    let (min, max) = result.nrr_bounds();
    println!("Revised NRR:      {:+.3} to {:+.3}", min, max);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {:?}", cli.config))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting nrr-planner v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve {
            host,
            port,
            points_table,
        } => {
            let table = load_table(&config, points_table)?;
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let app = build_router(AppState::new(table), &server);
            let addr = format!("{}:{}", server.host, server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Calculate {
            team,
            opponent,
            overs,
            runs,
            toss,
            position,
            points_table,
            json,
        } => {
            let table = load_table(&config, points_table)?;
            let scenario = ScenarioInput {
                team,
                opponent,
                overs,
                runs,
                toss,
                desired_position: position,
            };
            let result = compute_range(&scenario, &table)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_range(&scenario, &result);
            }
        }
        Commands::Table { points_table } => {
            let table = load_table(&config, points_table)?;
            print_table(&table);
        }
    }

    Ok(())
}
