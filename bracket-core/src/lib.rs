//! Bracket Core - Competitor roster
//!
//! This crate provides the data side of the bracket simulator:
//! - Competitors with stable identifiers, ratings and title counts
//! - The roster that validates and stores them
//! - Error types shared by every layer above

pub mod competitor;
pub mod error;
pub mod roster;

// Re-exports for convenient access
pub use competitor::{Competitor, CompetitorId};
pub use error::{BracketError, ErrorKind, Result};
pub use roster::{Roster, Standing, MAX_COMPETITORS, MIN_NAME_LEN};
