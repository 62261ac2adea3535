//! Odds command - estimate title chances by repeated simulation
//!
//! Each run plays a full tournament on a fresh copy of the roster, so
//! rating bonuses from one run never leak into the next.

use anyhow::{bail, Result};
use clap::Args;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;

use bracket_core::{CompetitorId, Roster};
use bracket_tournament::{create_rng, TournamentConfig, TournamentManager};

use crate::teams::{build_roster, parse_team_spec, TeamSpec};

#[derive(Args)]
pub struct OddsArgs {
    /// Team as NAME=RATING (repeat 4, 8, 16 or 32 times)
    #[arg(long = "team", value_name = "NAME=RATING", value_parser = parse_team_spec, required = true)]
    pub teams: Vec<TeamSpec>,

    /// Number of tournaments to simulate
    #[arg(long, default_value = "1000")]
    pub runs: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Title share of one team over all runs
#[derive(Clone, Debug, Serialize)]
struct TitleShare {
    name: String,
    rating: f64,
    titles: u32,
    share: f64,
}

pub fn run(args: OddsArgs, seed: Option<u64>) -> Result<()> {
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }

    let roster = build_roster(&args.teams)?;
    tracing::info!("Estimating odds: {} teams, {} runs", roster.len(), args.runs);

    let shares = estimate_title_shares(&roster, args.runs, seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shares)?);
    } else {
        println!("Title odds over {} tournaments:", args.runs);
        for share in &shares {
            println!(
                "  {:<24} rating {:>7.2}  {:>6} titles  {:>5.1}%",
                share.name,
                share.rating,
                share.titles,
                share.share * 100.0
            );
        }
    }

    Ok(())
}

/// Simulate `runs` tournaments and return every team's title share,
/// best first
fn estimate_title_shares(roster: &Roster, runs: usize, seed: Option<u64>) -> Result<Vec<TitleShare>> {
    let mut master = create_rng(seed);
    // Cloned rosters keep their ids, so champions map straight back
    let mut titles: FxHashMap<CompetitorId, u32> = FxHashMap::default();

    for run in 0..runs {
        let config = TournamentConfig::default().with_seed(master.gen());
        let mut manager = TournamentManager::with_roster(roster.clone(), config);
        manager.start_tournament()?;
        let champion = manager.run_to_completion()?;

        *titles.entry(champion).or_insert(0) += 1;
        if (run + 1) % 1000 == 0 {
            tracing::debug!("Completed {} of {} runs", run + 1, runs);
        }
    }

    let mut shares: Vec<TitleShare> = roster
        .iter()
        .map(|c| {
            let won = titles.get(&c.id()).copied().unwrap_or(0);
            TitleShare {
                name: c.name().to_string(),
                rating: c.rating(),
                titles: won,
                share: won as f64 / runs as f64,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.titles.cmp(&a.titles));

    Ok(shares)
}
