//! Tournament manager - roster plus at most one running tournament
//!
//! Level 1 - Orchestration. This is the type presentation layers talk to:
//! it owns the roster, the random source and the active bracket, and
//! publishes a [`TournamentEvent`] for every transition.

use bracket_core::{BracketError, Competitor, CompetitorId, Result, Roster, Standing};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::TournamentConfig;
use crate::events::{notify, TournamentEvent, TournamentObserver};
use crate::session::{Advance, TournamentHandle};
use crate::stage::Stage;

pub struct TournamentManager {
    roster: Roster,
    config: TournamentConfig,
    rng: ChaCha8Rng,
    active: Option<TournamentHandle>,
    observers: Vec<Box<dyn TournamentObserver>>,
}

impl Default for TournamentManager {
    fn default() -> Self {
        Self::new(TournamentConfig::default())
    }
}

impl TournamentManager {
    pub fn new(config: TournamentConfig) -> Self {
        Self::with_roster(Roster::new(), config)
    }

    /// Manage an existing roster
    pub fn with_roster(roster: Roster, config: TournamentConfig) -> Self {
        let rng = create_rng(config.seed);
        Self {
            roster,
            config,
            rng,
            active: None,
            observers: Vec::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn subscribe(&mut self, observer: Box<dyn TournamentObserver>) {
        self.observers.push(observer);
    }

    // ========================================================================
    // Roster operations
    // ========================================================================

    /// Register a competitor; rejected while a tournament is running
    pub fn register(&mut self, name: &str, rating_input: &str) -> Result<&Competitor> {
        self.ensure_idle()?;
        self.roster.register(name, rating_input)
    }

    /// Remove a competitor; rejected while a tournament is running
    pub fn remove(&mut self, name: &str) -> Result<Competitor> {
        self.ensure_idle()?;
        self.roster.remove(name)
    }

    pub fn find(&self, name: &str) -> Option<&Competitor> {
        self.roster.find(name)
    }

    pub fn list_sorted_by_rating(&self) -> Result<Vec<Standing>> {
        self.roster.list_sorted_by_rating()
    }

    // ========================================================================
    // Tournament lifecycle
    // ========================================================================

    pub fn is_in_progress(&self) -> bool {
        self.active.is_some()
    }

    /// Shuffle the whole roster into a new bracket and return the first round
    pub fn start_tournament(&mut self) -> Result<&[CompetitorId]> {
        self.ensure_idle()?;

        let handle =
            TournamentHandle::start_with(&self.roster, self.config.match_config, &mut self.rng)?;
        let event = TournamentEvent::Started {
            stage: handle.stage(),
            seeding: handle.seeding().to_vec(),
        };
        notify(&mut self.observers, &event, &self.roster);

        let handle = self.active.insert(handle);
        Ok(handle.current_round())
    }

    /// Round in progress, if a tournament is running
    pub fn current_round(&self) -> Option<&[CompetitorId]> {
        self.active.as_ref().map(|h| h.current_round())
    }

    pub fn current_stage(&self) -> Option<Stage> {
        self.active.as_ref().and_then(|h| h.stage())
    }

    /// Play the current round.
    ///
    /// When the final is played the tournament ends and the manager is free
    /// to start another one.
    pub fn advance(&mut self) -> Result<Advance> {
        let handle = self
            .active
            .as_mut()
            .ok_or(BracketError::NoTournamentInProgress)?;
        let advance = handle.advance(&mut self.roster, &mut self.rng)?;

        let result = advance.result();
        for outcome in &result.outcomes {
            let event = TournamentEvent::MatchResolved(outcome.clone());
            notify(&mut self.observers, &event, &self.roster);
        }
        let event = TournamentEvent::RoundCompleted {
            stage: result.stage,
            winners: result.winners.clone(),
        };
        notify(&mut self.observers, &event, &self.roster);

        if let Some(id) = advance.champion() {
            self.active = None;
            if let Some(champion) = self.roster.get(id) {
                let event = TournamentEvent::Champion {
                    id,
                    name: champion.name().to_string(),
                    titles_won: champion.titles_won(),
                };
                notify(&mut self.observers, &event, &self.roster);
            }
        }

        Ok(advance)
    }

    /// Advance until a champion is crowned
    pub fn run_to_completion(&mut self) -> Result<CompetitorId> {
        loop {
            if let Advance::Champion { champion, .. } = self.advance()? {
                return Ok(champion);
            }
        }
    }

    /// Discard the running tournament.
    ///
    /// Rating changes from rounds already played are kept. Returns false if
    /// nothing was running.
    pub fn abandon(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                tracing::warn!(
                    "Tournament abandoned after {} rounds",
                    handle.rounds_played()
                );
                let event = TournamentEvent::Abandoned {
                    rounds_played: handle.rounds_played(),
                };
                notify(&mut self.observers, &event, &self.roster);
                true
            }
            None => false,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.active.is_some() {
            Err(BracketError::TournamentAlreadyInProgress)
        } else {
            Ok(())
        }
    }
}

/// Create RNG from optional seed
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
