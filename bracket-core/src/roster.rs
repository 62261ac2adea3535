//! Roster - the competitor store
//!
//! Holds every registered competitor in registration order and enforces the
//! naming, rating and capacity rules. No tournament logic lives here.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::competitor::{Competitor, CompetitorId};
use crate::error::{BracketError, Result};

/// Maximum number of competitors a roster accepts
pub const MAX_COMPETITORS: usize = 32;

/// Minimum name length, in characters
pub const MIN_NAME_LEN: usize = 2;

/// One row of the rating table
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    pub name: String,
    /// Rating rounded to 2 decimals
    pub rating: f64,
    pub titles_won: u32,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2} ({})", self.name, self.rating, self.titles_won)
    }
}

/// In-memory competitor store
#[derive(Clone, Debug, Default)]
pub struct Roster {
    competitors: Vec<Competitor>,
    /// Lowercased name -> id
    by_name: FxHashMap<String, CompetitorId>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Register a new competitor.
    ///
    /// Checks run in order (name, rating, duplicate, capacity) and all of
    /// them happen before the roster is touched, so a failed call leaves it
    /// unchanged.
    pub fn register(&mut self, name: &str, rating_input: &str) -> Result<&Competitor> {
        validate_name(name)?;
        let rating = parse_rating(rating_input)?;

        let key = name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(BracketError::DuplicateName {
                name: name.to_string(),
            });
        }
        if self.competitors.len() >= MAX_COMPETITORS {
            return Err(BracketError::CapacityExceeded {
                limit: MAX_COMPETITORS,
            });
        }

        let id = CompetitorId(self.next_id);
        self.next_id += 1;
        self.by_name.insert(key, id);
        self.competitors
            .push(Competitor::new(id, name.to_string(), rating));

        let idx = self.competitors.len() - 1;
        Ok(&self.competitors[idx])
    }

    /// Remove a competitor by case-insensitive name
    pub fn remove(&mut self, name: &str) -> Result<Competitor> {
        let key = name.to_lowercase();
        let id = *self.by_name.get(&key).ok_or_else(|| BracketError::NotFound {
            name: name.to_string(),
        })?;
        let idx = self.position(id).ok_or(BracketError::UnknownCompetitor(id))?;

        self.by_name.remove(&key);
        Ok(self.competitors.remove(idx))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Case-insensitive exact-name lookup
    pub fn find(&self, name: &str) -> Option<&Competitor> {
        let id = self.by_name.get(&name.to_lowercase())?;
        self.get(*id)
    }

    pub fn get(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CompetitorId) -> Option<&mut Competitor> {
        self.competitors.iter_mut().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: CompetitorId) -> bool {
        self.position(id).is_some()
    }

    /// Competitors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.iter()
    }

    /// Ids in registration order
    pub fn ids(&self) -> Vec<CompetitorId> {
        self.competitors.iter().map(|c| c.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    /// Rating table, highest rating first.
    ///
    /// Ties keep registration order. An empty roster is reported as
    /// [`BracketError::EmptyStore`] rather than an empty table.
    pub fn list_sorted_by_rating(&self) -> Result<Vec<Standing>> {
        if self.competitors.is_empty() {
            return Err(BracketError::EmptyStore);
        }

        let mut ordered: Vec<&Competitor> = self.competitors.iter().collect();
        ordered.sort_by(|a, b| {
            b.rating()
                .partial_cmp(&a.rating())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ordered
            .into_iter()
            .map(|c| Standing {
                name: c.name().to_string(),
                rating: round2(c.rating()),
                titles_won: c.titles_won(),
            })
            .collect())
    }

    fn position(&self, id: CompetitorId) -> Option<usize> {
        self.competitors.iter().position(|c| c.id() == id)
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_name(name: &str) -> Result<()> {
    let long_enough = name.chars().count() >= MIN_NAME_LEN;
    let allowed = name
        .chars()
        .all(|ch| ch.is_alphabetic() || ch.is_whitespace());

    if long_enough && allowed {
        Ok(())
    } else {
        Err(BracketError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Parse a rating, rejecting values the weighted draw cannot use.
///
/// Stricter than plain number parsing on purpose: negative, NaN and
/// infinite ratings are refused as well as unparseable text.
fn parse_rating(input: &str) -> Result<f64> {
    let invalid = || BracketError::InvalidRating {
        input: input.to_string(),
    };

    let rating: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !rating.is_finite() || rating < 0.0 {
        return Err(invalid());
    }
    Ok(rating)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
