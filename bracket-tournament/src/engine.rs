//! Bracket engine - match resolution and round advancement
//!
//! Level 2 - Phases (advance_round) and Level 3 - Steps (resolve_match)

use bracket_core::{BracketError, CompetitorId, Result, Roster};
use rand::Rng;
use serde::Serialize;

use crate::config::MatchConfig;
use crate::stage::Stage;

/// Result of a single match
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub winner: CompetitorId,
    pub loser: CompetitorId,
    /// Probability the winner had of winning, before the match
    pub winner_odds: f64,
    /// Winner's rating after the bonus
    pub winner_rating: f64,
    /// Loser's rating after the bonus
    pub loser_rating: f64,
}

/// Result of one bracket round
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundResult {
    /// Stage the round was played as
    pub stage: Option<Stage>,
    /// Winners in match order; this is the next round
    pub winners: Vec<CompetitorId>,
    /// Every match of the round, in bracket order
    pub outcomes: Vec<MatchOutcome>,
}

impl RoundResult {
    /// The champion, if this round was the final
    pub fn champion(&self) -> Option<CompetitorId> {
        match self.winners.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Resolves matches and rounds against a roster.
///
/// The engine never reorders competitors: it pairs whatever order it is
/// given. Seeding belongs to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BracketEngine {
    config: MatchConfig,
}

impl BracketEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// Play one round, pairing positions (0,1), (2,3), ...
    ///
    /// When the round produces a single winner, that competitor is credited
    /// with a title.
    ///
    /// # Panics
    /// Panics if `round` has an odd number of competitors.
    pub fn advance_round<R: Rng>(
        &self,
        roster: &mut Roster,
        round: &[CompetitorId],
        rng: &mut R,
    ) -> Result<RoundResult> {
        assert!(
            round.len() % 2 == 0,
            "bracket round must have an even number of competitors, got {}",
            round.len()
        );

        let stage = Stage::from_size(round.len());
        let outcomes = round
            .chunks_exact(2)
            .map(|pair| self.resolve_match(roster, pair[0], pair[1], rng))
            .collect::<Result<Vec<_>>>()?;
        let winners: Vec<CompetitorId> = outcomes.iter().map(|o| o.winner).collect();

        if let [champion] = winners.as_slice() {
            let entry = roster
                .get_mut(*champion)
                .ok_or(BracketError::UnknownCompetitor(*champion))?;
            entry.award_title();
            tracing::info!("{} wins the tournament ({} titles)", entry.name(), entry.titles_won());
        } else if let Some(stage) = stage {
            tracing::info!("{} complete: {} advance", stage, winners.len());
        }

        Ok(RoundResult {
            stage,
            winners,
            outcomes,
        })
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Resolve a match with a rating-weighted draw and apply the bonuses.
    ///
    /// `a` wins with probability `rating(a) / (rating(a) + rating(b))`.
    /// Both competitors stay on the roster with their bonus applied.
    pub fn resolve_match<R: Rng>(
        &self,
        roster: &mut Roster,
        a: CompetitorId,
        b: CompetitorId,
        rng: &mut R,
    ) -> Result<MatchOutcome> {
        debug_assert_ne!(a, b, "a competitor cannot play itself");

        let rating_a = rating_of(roster, a)?;
        let rating_b = rating_of(roster, b)?;
        let odds_a = win_probability(rating_a, rating_b);

        let (winner, loser, winner_odds) = if rng.gen_bool(odds_a) {
            (a, b, odds_a)
        } else {
            (b, a, 1.0 - odds_a)
        };

        let winner_rating = credit(roster, winner, self.config.winner_bonus)?;
        let loser_rating = credit(roster, loser, self.config.loser_bonus)?;

        tracing::debug!(
            "{} beat {} (odds {:.3}), ratings now {:.2} / {:.2}",
            display_name(roster, winner),
            display_name(roster, loser),
            winner_odds,
            winner_rating,
            loser_rating
        );

        Ok(MatchOutcome {
            winner,
            loser,
            winner_odds,
            winner_rating,
            loser_rating,
        })
    }
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

/// Probability that a competitor rated `rating` beats one rated `opponent`.
///
/// Two zero ratings are an even match. The ratings are never summed, so
/// huge finite ratings still give `rating / (rating + opponent)`.
pub fn win_probability(rating: f64, opponent: f64) -> f64 {
    if rating == 0.0 && opponent == 0.0 {
        0.5
    } else if rating >= opponent {
        (1.0 / (1.0 + opponent / rating)).clamp(0.0, 1.0)
    } else {
        (1.0 - 1.0 / (1.0 + rating / opponent)).clamp(0.0, 1.0)
    }
}

fn rating_of(roster: &Roster, id: CompetitorId) -> Result<f64> {
    roster
        .get(id)
        .map(|c| c.rating())
        .ok_or(BracketError::UnknownCompetitor(id))
}

/// Add `bonus` to a competitor's rating, returning the new rating
fn credit(roster: &mut Roster, id: CompetitorId, bonus: f64) -> Result<f64> {
    let competitor = roster
        .get_mut(id)
        .ok_or(BracketError::UnknownCompetitor(id))?;
    competitor.add_rating(bonus);
    Ok(competitor.rating())
}

fn display_name(roster: &Roster, id: CompetitorId) -> String {
    roster
        .get(id)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster_of(teams: &[(&str, &str)]) -> (Roster, Vec<CompetitorId>) {
        let mut roster = Roster::new();
        let ids = teams
            .iter()
            .map(|(name, rating)| roster.register(name, rating).unwrap().id())
            .collect();
        (roster, ids)
    }

    #[test]
    fn test_win_probability() {
        assert!((win_probability(10.0, 1.0) - 10.0 / 11.0).abs() < 1e-12);
        assert_eq!(win_probability(5.0, 5.0), 0.5);
        assert_eq!(win_probability(0.0, 0.0), 0.5);
        assert_eq!(win_probability(0.0, 3.0), 0.0);
        assert_eq!(win_probability(3.0, 0.0), 1.0);
        assert!((win_probability(1.0, 10.0) - 1.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_win_probability_huge_ratings() {
        assert_eq!(win_probability(1e308, 1e308), 0.5);
        assert_eq!(win_probability(f64::MAX, f64::MAX), 0.5);
        assert!((win_probability(1e308, 1e307) - 10.0 / 11.0).abs() < 1e-12);
        assert!((win_probability(1e307, 1e308) - 1.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_match_huge_equal_ratings_is_even() {
        let (mut roster, ids) = roster_of(&[("Alpha", "1e308"), ("Bravo", "1e308")]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let engine = BracketEngine::default();

        let mut alpha_wins = 0;
        for _ in 0..1000 {
            let outcome = engine.resolve_match(&mut roster, ids[0], ids[1], &mut rng).unwrap();
            assert_eq!(outcome.winner_odds, 0.5);
            if outcome.winner == ids[0] {
                alpha_wins += 1;
            }
        }
        assert!((400..600).contains(&alpha_wins), "Alpha won {} of 1000", alpha_wins);
    }

    #[test]
    fn test_resolve_match_applies_bonuses() {
        let (mut roster, ids) = roster_of(&[("Alpha", "10"), ("Beta", "1")]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let engine = BracketEngine::default();

        let outcome = engine.resolve_match(&mut roster, ids[0], ids[1], &mut rng).unwrap();

        let winner = roster.get(outcome.winner).unwrap();
        let loser = roster.get(outcome.loser).unwrap();
        assert_eq!(winner.rating(), outcome.winner_rating);
        assert_eq!(loser.rating(), outcome.loser_rating);

        let before = if outcome.winner == ids[0] { (10.0, 1.0) } else { (1.0, 10.0) };
        assert!((outcome.winner_rating - before.0 - 0.7).abs() < 1e-9);
        assert!((outcome.loser_rating - before.1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_match_total_increment() {
        let (mut roster, ids) = roster_of(&[("Alpha", "3.3"), ("Beta", "4.4")]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let engine = BracketEngine::default();

        for _ in 0..50 {
            let before: f64 = roster.iter().map(|c| c.rating()).sum();
            engine.resolve_match(&mut roster, ids[0], ids[1], &mut rng).unwrap();
            let after: f64 = roster.iter().map(|c| c.rating()).sum();
            assert!((after - before - 1.2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_resolve_match_weighted_odds() {
        let engine = BracketEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 20_000;
        let mut strong_wins = 0;

        for _ in 0..trials {
            // Fresh roster each time so the bonuses don't drift the odds
            let (mut roster, ids) = roster_of(&[("Strong", "10"), ("Weak", "1")]);
            let outcome = engine.resolve_match(&mut roster, ids[0], ids[1], &mut rng).unwrap();
            assert!((outcome.winner_odds
                - if outcome.winner == ids[0] { 10.0 / 11.0 } else { 1.0 / 11.0 })
                .abs()
                < 1e-12);
            if outcome.winner == ids[0] {
                strong_wins += 1;
            }
        }

        let rate = strong_wins as f64 / trials as f64;
        assert!((rate - 10.0 / 11.0).abs() < 0.015, "empirical rate {}", rate);
    }

    #[test]
    fn test_resolve_match_zero_rating_never_wins() {
        let (mut roster, ids) = roster_of(&[("Ghost", "0"), ("Solid", "2")]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let engine = BracketEngine::default();
        let outcome = engine.resolve_match(&mut roster, ids[0], ids[1], &mut rng).unwrap();
        assert_eq!(outcome.winner, ids[1]);
        assert_eq!(roster.get(ids[0]).unwrap().rating(), 0.5);
    }

    #[test]
    fn test_resolve_match_unknown_competitor() {
        let (mut roster, ids) = roster_of(&[("Alpha", "1"), ("Beta", "1")]);
        roster.remove("Beta").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = BracketEngine::default()
            .resolve_match(&mut roster, ids[0], ids[1], &mut rng)
            .unwrap_err();
        assert_eq!(err, BracketError::UnknownCompetitor(ids[1]));
        assert_eq!(roster.get(ids[0]).unwrap().rating(), 1.0);
    }

    #[test]
    fn test_custom_bonuses() {
        let (mut roster, ids) = roster_of(&[("Alpha", "1"), ("Beta", "1")]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let engine = BracketEngine::new(MatchConfig {
            winner_bonus: 2.0,
            loser_bonus: 0.0,
        });
        let outcome = engine.resolve_match(&mut roster, ids[0], ids[1], &mut rng).unwrap();
        assert_eq!(outcome.winner_rating, 3.0);
        assert_eq!(outcome.loser_rating, 1.0);
    }

    #[test]
    fn test_advance_round_halves_and_preserves_order() {
        let (mut roster, ids) = roster_of(&[
            ("Aa", "5"),
            ("Bb", "5"),
            ("Cc", "5"),
            ("Dd", "5"),
            ("Ee", "5"),
            ("Ff", "5"),
            ("Gg", "5"),
            ("Hh", "5"),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = BracketEngine::default()
            .advance_round(&mut roster, &ids, &mut rng)
            .unwrap();

        assert_eq!(result.stage, Some(Stage::Quarterfinal));
        assert_eq!(result.winners.len(), 4);
        assert_eq!(result.outcomes.len(), 4);
        for (i, winner) in result.winners.iter().enumerate() {
            // Match i is between positions 2i and 2i+1
            assert!(*winner == ids[2 * i] || *winner == ids[2 * i + 1]);
        }
        assert_eq!(result.champion(), None);
        assert!(roster.iter().all(|c| c.titles_won() == 0));
    }

    #[test]
    fn test_advance_round_final_awards_title() {
        let (mut roster, ids) = roster_of(&[("Aa", "5"), ("Bb", "5")]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = BracketEngine::default()
            .advance_round(&mut roster, &ids, &mut rng)
            .unwrap();

        let champion = result.champion().unwrap();
        assert_eq!(result.stage, Some(Stage::Final));
        assert_eq!(roster.get(champion).unwrap().titles_won(), 1);
        let loser = result.outcomes[0].loser;
        assert_eq!(roster.get(loser).unwrap().titles_won(), 0);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    #[should_panic(expected = "even number of competitors")]
    fn test_advance_round_odd_length_panics() {
        let (mut roster, ids) = roster_of(&[("Aa", "5"), ("Bb", "5"), ("Cc", "5")]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let _ = BracketEngine::default().advance_round(&mut roster, &ids, &mut rng);
    }
}
