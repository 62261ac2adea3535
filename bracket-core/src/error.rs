//! Error types for roster and tournament operations

use crate::competitor::CompetitorId;

/// Result alias used across the bracket crates
pub type Result<T> = std::result::Result<T, BracketError>;

/// Every recoverable failure a roster or tournament operation can report
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BracketError {
    #[error("Sorry, {name} is too short or contains invalid characters.")]
    InvalidName { name: String },

    #[error("{input} is not a valid number for rating.")]
    InvalidRating { input: String },

    #[error("The name {name} already exists.")]
    DuplicateName { name: String },

    #[error("Limit reached: the roster already holds {limit} teams.")]
    CapacityExceeded { limit: usize },

    #[error("There is no team with the name {name}.")]
    NotFound { name: String },

    #[error("There are no teams.")]
    EmptyStore,

    #[error("You can only create the tournament with 4, 8, 16 or 32 teams (have {count}).")]
    InvalidBracketSize { count: usize },

    #[error("A tournament is already in progress.")]
    TournamentAlreadyInProgress,

    #[error("No tournament is in progress.")]
    NoTournamentInProgress,

    #[error("Competitor {0} is no longer on the roster.")]
    UnknownCompetitor(CompetitorId),
}

/// Discriminant of a [`BracketError`], for adapters that render `{kind, message}`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidName,
    InvalidRating,
    DuplicateName,
    CapacityExceeded,
    NotFound,
    EmptyStore,
    InvalidBracketSize,
    TournamentAlreadyInProgress,
    NoTournamentInProgress,
    UnknownCompetitor,
}

impl BracketError {
    /// The kind of this error, without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            BracketError::InvalidName { .. } => ErrorKind::InvalidName,
            BracketError::InvalidRating { .. } => ErrorKind::InvalidRating,
            BracketError::DuplicateName { .. } => ErrorKind::DuplicateName,
            BracketError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            BracketError::NotFound { .. } => ErrorKind::NotFound,
            BracketError::EmptyStore => ErrorKind::EmptyStore,
            BracketError::InvalidBracketSize { .. } => ErrorKind::InvalidBracketSize,
            BracketError::TournamentAlreadyInProgress => ErrorKind::TournamentAlreadyInProgress,
            BracketError::NoTournamentInProgress => ErrorKind::NoTournamentInProgress,
            BracketError::UnknownCompetitor(_) => ErrorKind::UnknownCompetitor,
        }
    }
}
