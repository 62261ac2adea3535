//! Tournament events and observers
//!
//! Presentation layers (console menus, bracket views) subscribe to these
//! instead of keeping tournament state of their own.

use bracket_core::{CompetitorId, Roster};
use serde::Serialize;

use crate::engine::MatchOutcome;
use crate::stage::Stage;

/// A state transition of the running tournament
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TournamentEvent {
    /// A tournament was started with this first-round order
    Started {
        stage: Option<Stage>,
        seeding: Vec<CompetitorId>,
    },
    MatchResolved(MatchOutcome),
    /// A round finished; `winners` is the next round
    RoundCompleted {
        stage: Option<Stage>,
        winners: Vec<CompetitorId>,
    },
    Champion {
        id: CompetitorId,
        name: String,
        titles_won: u32,
    },
    /// The tournament was discarded before a champion was found
    Abandoned { rounds_played: usize },
}

/// Receives tournament events as they happen.
///
/// The roster is passed along so observers can resolve ids to names and
/// current ratings.
pub trait TournamentObserver {
    fn on_event(&mut self, event: &TournamentEvent, roster: &Roster);
}

impl<F> TournamentObserver for F
where
    F: FnMut(&TournamentEvent, &Roster),
{
    fn on_event(&mut self, event: &TournamentEvent, roster: &Roster) {
        self(event, roster)
    }
}

pub(crate) fn notify(
    observers: &mut [Box<dyn TournamentObserver>],
    event: &TournamentEvent,
    roster: &Roster,
) {
    for observer in observers.iter_mut() {
        observer.on_event(event, roster);
    }
}
