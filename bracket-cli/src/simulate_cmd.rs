//! Simulate command - run one tournament from command-line teams
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_manager(), play_tournament(), report_results()
//! - Level 4: JSON formatting

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use bracket_core::{Roster, Standing};
use bracket_tournament::{TournamentConfig, TournamentEvent, TournamentManager};

use crate::report::{name_of, ConsoleObserver};
use crate::teams::{build_roster, parse_team_spec, TeamSpec};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Team as NAME=RATING (repeat 4, 8, 16 or 32 times)
    #[arg(long = "team", value_name = "NAME=RATING", value_parser = parse_team_spec, required = true)]
    pub teams: Vec<TeamSpec>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the JSON report needs once the tournament is over
#[derive(Serialize)]
struct JsonReport {
    seed: Option<u64>,
    champion: String,
    events: Vec<TournamentEvent>,
    standings: Vec<Standing>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Register the teams
/// 2. Play the tournament to the end
/// 3. Report the bracket and final table
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let mut manager = build_manager(&args.teams, seed)?;

    tracing::info!(
        "Simulating tournament: {} teams, seed={:?}",
        manager.roster().len(),
        seed
    );

    let log = Rc::new(RefCell::new(Vec::new()));
    if args.json {
        let sink = Rc::clone(&log);
        manager.subscribe(Box::new(move |event: &TournamentEvent, _: &Roster| {
            sink.borrow_mut().push(event.clone())
        }));
    } else {
        manager.subscribe(Box::new(ConsoleObserver));
    }

    let champion = play_tournament(&mut manager)?;

    let events = log.take();
    report_results(&manager, &champion, events, seed, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_manager(teams: &[TeamSpec], seed: Option<u64>) -> Result<TournamentManager> {
    let roster = build_roster(teams)?;
    let config = TournamentConfig {
        seed,
        ..Default::default()
    };
    Ok(TournamentManager::with_roster(roster, config))
}

/// Start and finish a tournament, returning the champion's name
fn play_tournament(manager: &mut TournamentManager) -> Result<String> {
    manager
        .start_tournament()
        .context("Cannot start tournament")?;
    let champion = manager.run_to_completion()?;
    Ok(name_of(manager.roster(), champion))
}

fn report_results(
    manager: &TournamentManager,
    champion: &str,
    events: Vec<TournamentEvent>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let standings = manager.list_sorted_by_rating()?;

    if json {
        let report = JsonReport {
            seed,
            champion: champion.to_string(),
            events,
            standings,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\nFinal table:");
        for (i, standing) in standings.iter().enumerate() {
            println!("{:>3}_{}", i + 1, standing);
        }
    }

    Ok(())
}
