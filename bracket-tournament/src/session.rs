//! Tournament handle - one knockout run over a roster snapshot
//!
//! Level 1 - Orchestration

use bracket_core::{BracketError, CompetitorId, Result, Roster};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::MatchConfig;
use crate::engine::{BracketEngine, RoundResult};
use crate::stage::{is_valid_bracket_size, Stage};

/// What a call to [`TournamentHandle::advance`] produced
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// The round was played; its winners are the new current round
    NextRound(RoundResult),
    /// The final was played and the tournament is over
    Champion {
        champion: CompetitorId,
        result: RoundResult,
    },
}

impl Advance {
    /// The round that was just played
    pub fn result(&self) -> &RoundResult {
        match self {
            Advance::NextRound(result) => result,
            Advance::Champion { result, .. } => result,
        }
    }

    pub fn champion(&self) -> Option<CompetitorId> {
        match self {
            Advance::NextRound(_) => None,
            Advance::Champion { champion, .. } => Some(*champion),
        }
    }
}

/// An in-progress (or finished) knockout tournament.
///
/// Holds only competitor ids; ratings and titles live in the roster passed
/// to [`advance`](Self::advance). Dropping the handle abandons the
/// tournament without undoing rating changes from rounds already played.
#[derive(Clone, Debug)]
pub struct TournamentHandle {
    engine: BracketEngine,
    seeding: Vec<CompetitorId>,
    round: Vec<CompetitorId>,
    champion: Option<CompetitorId>,
    rounds_played: usize,
}

impl TournamentHandle {
    /// Start a tournament with the default match bonuses
    pub fn start<R: Rng>(roster: &Roster, rng: &mut R) -> Result<Self> {
        Self::start_with(roster, MatchConfig::default(), rng)
    }

    /// Snapshot every competitor on the roster and shuffle them into a bracket.
    ///
    /// Fails with [`BracketError::InvalidBracketSize`] unless the roster holds
    /// exactly 4, 8, 16 or 32 competitors. The roster order is left alone.
    pub fn start_with<R: Rng>(roster: &Roster, config: MatchConfig, rng: &mut R) -> Result<Self> {
        let count = roster.len();
        if !is_valid_bracket_size(count) {
            return Err(BracketError::InvalidBracketSize { count });
        }

        let mut seeding = roster.ids();
        seeding.shuffle(rng);

        tracing::info!("Starting tournament with {} competitors", count);

        Ok(Self {
            engine: BracketEngine::new(config),
            round: seeding.clone(),
            seeding,
            champion: None,
            rounds_played: 0,
        })
    }

    /// Competitors of the round in progress, in pairing order.
    ///
    /// Once the tournament is over this is the champion alone.
    pub fn current_round(&self) -> &[CompetitorId] {
        &self.round
    }

    /// Name of the round in progress; None once a champion is crowned
    pub fn stage(&self) -> Option<Stage> {
        if self.is_finished() {
            None
        } else {
            Stage::from_size(self.round.len())
        }
    }

    /// First-round order produced by the shuffle
    pub fn seeding(&self) -> &[CompetitorId] {
        &self.seeding
    }

    pub fn champion(&self) -> Option<CompetitorId> {
        self.champion
    }

    pub fn is_finished(&self) -> bool {
        self.champion.is_some()
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Play the current round.
    ///
    /// A failed round leaves the handle on the same round.
    pub fn advance<R: Rng>(&mut self, roster: &mut Roster, rng: &mut R) -> Result<Advance> {
        if self.is_finished() {
            return Err(BracketError::NoTournamentInProgress);
        }

        let result = self.engine.advance_round(roster, &self.round, rng)?;
        self.rounds_played += 1;
        self.round = result.winners.clone();

        match result.champion() {
            Some(champion) => {
                self.champion = Some(champion);
                Ok(Advance::Champion { champion, result })
            }
            None => Ok(Advance::NextRound(result)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::ErrorKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const NAMES: [&str; 8] = ["Aa", "Bb", "Cc", "Dd", "Ee", "Ff", "Gg", "Hh"];

    fn roster_of(count: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..count {
            let name = format!("{} {}", NAMES[i % 8], NAMES[i / 8]);
            roster.register(&name, "5").unwrap();
        }
        roster
    }

    #[test]
    fn test_start_rejects_invalid_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for count in [0, 2, 3, 5, 17] {
            let roster = roster_of(count);
            let err = TournamentHandle::start(&roster, &mut rng).unwrap_err();
            assert_eq!(err, BracketError::InvalidBracketSize { count });
        }
    }

    #[test]
    fn test_start_snapshots_whole_roster() {
        let roster = roster_of(16);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let handle = TournamentHandle::start(&roster, &mut rng).unwrap();

        let mut seeded = handle.current_round().to_vec();
        seeded.sort();
        assert_eq!(seeded, roster.ids());
        assert_eq!(handle.stage(), Some(Stage::RoundOf16));
        assert_eq!(handle.seeding(), handle.current_round());
        assert!(!handle.is_finished());
    }

    #[test]
    fn test_start_leaves_roster_order_alone() {
        let roster = roster_of(8);
        let before = roster.ids();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let _handle = TournamentHandle::start(&roster, &mut rng).unwrap();
        assert_eq!(roster.ids(), before);
    }

    #[test]
    fn test_shuffle_varies_with_seed() {
        let roster = roster_of(32);
        let a = TournamentHandle::start(&roster, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        let b = TournamentHandle::start(&roster, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        assert_ne!(a.current_round(), b.current_round());
    }

    #[test]
    fn test_bracket_of_eight_takes_three_rounds() {
        let mut roster = roster_of(8);
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut handle = TournamentHandle::start(&roster, &mut rng).unwrap();

        let mut sizes = vec![handle.current_round().len()];
        let champion = loop {
            match handle.advance(&mut roster, &mut rng).unwrap() {
                Advance::NextRound(result) => {
                    assert_eq!(result.winners, handle.current_round());
                    sizes.push(result.winners.len());
                }
                Advance::Champion { champion, .. } => break champion,
            }
        };

        assert_eq!(sizes, vec![8, 4, 2]);
        assert_eq!(handle.rounds_played(), 3);
        assert_eq!(handle.champion(), Some(champion));
        assert_eq!(handle.current_round(), &[champion]);
        assert_eq!(handle.stage(), None);
        assert_eq!(roster.get(champion).unwrap().titles_won(), 1);
        let total_titles: u32 = roster.iter().map(|c| c.titles_won()).sum();
        assert_eq!(total_titles, 1);
        assert_eq!(roster.len(), 8);
    }

    #[test]
    fn test_advance_after_finish_fails() {
        let mut roster = roster_of(4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut handle = TournamentHandle::start(&roster, &mut rng).unwrap();
        handle.advance(&mut roster, &mut rng).unwrap();
        assert!(handle.advance(&mut roster, &mut rng).unwrap().champion().is_some());

        let err = handle.advance(&mut roster, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoTournamentInProgress);
    }

    #[test]
    fn test_removed_competitor_fails_round_without_advancing() {
        let mut roster = roster_of(4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut handle = TournamentHandle::start(&roster, &mut rng).unwrap();
        let round_before = handle.current_round().to_vec();

        let victim = roster.get(round_before[3]).unwrap().name().to_string();
        roster.remove(&victim).unwrap();

        let err = handle.advance(&mut roster, &mut rng).unwrap_err();
        assert_eq!(err, BracketError::UnknownCompetitor(round_before[3]));
        assert_eq!(handle.current_round(), round_before.as_slice());
        assert_eq!(handle.rounds_played(), 0);
    }
}
