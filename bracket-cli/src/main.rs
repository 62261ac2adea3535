//! Bracket CLI - Command-line interface
//!
//! Commands:
//! - repl: Interactive team menu and step-by-step tournament (default)
//! - simulate: Play one tournament from the given teams
//! - odds: Estimate title chances over many tournaments

mod odds_cmd;
mod repl;
mod report;
mod simulate_cmd;
mod teams;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use odds_cmd::OddsArgs;
use simulate_cmd::SimulateArgs;

#[derive(Parser)]
#[command(name = "bracket")]
#[command(about = "Knockout bracket tournament simulator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Repl,
    /// Run a single tournament
    Simulate(SimulateArgs),
    /// Estimate title odds by repeated simulation
    Odds(OddsArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::run(cli.seed),
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
        Commands::Odds(args) => odds_cmd::run(args, cli.seed),
    }
}

/// Log to stderr so menu output on stdout stays readable; RUST_LOG overrides
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
