//! Competitor - a named entry with a strength rating

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier handed out by the roster on registration.
///
/// Ids are never reused within one roster, so a bracket holding ids can
/// always tell which stored competitor a match refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetitorId(pub u32);

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered competitor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    id: CompetitorId,
    name: String,
    rating: f64,
    titles_won: u32,
}

impl Competitor {
    pub(crate) fn new(id: CompetitorId, name: String, rating: f64) -> Self {
        Self {
            id,
            name,
            rating,
            titles_won: 0,
        }
    }

    pub fn id(&self) -> CompetitorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current strength rating
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Number of full tournaments won
    pub fn titles_won(&self) -> u32 {
        self.titles_won
    }

    /// Add a post-match bonus to the rating.
    ///
    /// Only the bracket engine calls this; ratings never go down.
    pub fn add_rating(&mut self, bonus: f64) {
        debug_assert!(bonus >= 0.0, "rating bonus must be non-negative");
        self.rating += bonus;
    }

    /// Credit one tournament victory
    pub fn award_title(&mut self) {
        self.titles_won += 1;
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Rating: {}, Titles: {}",
            self.name, self.rating, self.titles_won
        )
    }
}
