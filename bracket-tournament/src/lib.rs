//! Bracket Tournament - single-elimination simulation
//!
//! This crate provides the knockout machinery on top of `bracket-core`:
//! - Rating-weighted match resolution with post-match rating bonuses
//! - Round advancement by adjacent pairing
//! - Tournament handles and a manager that drives them round by round
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: TournamentManager, TournamentHandle (orchestration)
//! - Level 2: BracketEngine::advance_round (phases)
//! - Level 3: BracketEngine::resolve_match (steps)
//! - Level 4: configuration, stage naming, events

mod config;
mod engine;
mod events;
mod manager;
mod session;
mod stage;

pub use config::{MatchConfig, TournamentConfig};
pub use engine::{win_probability, BracketEngine, MatchOutcome, RoundResult};
pub use events::{TournamentEvent, TournamentObserver};
pub use manager::{create_rng, TournamentManager};
pub use session::{Advance, TournamentHandle};
pub use stage::{is_valid_bracket_size, Stage, VALID_BRACKET_SIZES};
