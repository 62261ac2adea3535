//! Console rendering shared by the commands

use bracket_core::{CompetitorId, Roster};
use bracket_tournament::{Stage, TournamentEvent, TournamentObserver};

/// Name for display, falling back to the id if the competitor is gone
pub fn name_of(roster: &Roster, id: CompetitorId) -> String {
    roster
        .get(id)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// "A vs B" for every pairing of a round
pub fn format_pairings(roster: &Roster, round: &[CompetitorId]) -> Vec<String> {
    round
        .chunks(2)
        .map(|pair| match pair {
            [a, b] => format!("{} vs {}", name_of(roster, *a), name_of(roster, *b)),
            [a] => name_of(roster, *a),
            _ => String::new(),
        })
        .collect()
}

pub fn stage_label(stage: Option<Stage>) -> &'static str {
    stage.map(Stage::name).unwrap_or("Round")
}

/// Prints the bracket to stdout as events arrive
pub struct ConsoleObserver;

impl TournamentObserver for ConsoleObserver {
    fn on_event(&mut self, event: &TournamentEvent, roster: &Roster) {
        match event {
            TournamentEvent::Started { stage, seeding } => {
                print_round_header(*stage, roster, seeding);
            }
            TournamentEvent::MatchResolved(outcome) => {
                println!(
                    "  {} beat {} (odds {:.1}%)",
                    name_of(roster, outcome.winner),
                    name_of(roster, outcome.loser),
                    outcome.winner_odds * 100.0
                );
            }
            TournamentEvent::RoundCompleted { winners, .. } => {
                if winners.len() > 1 {
                    print_round_header(Stage::from_size(winners.len()), roster, winners);
                }
            }
            TournamentEvent::Champion { name, titles_won, .. } => {
                println!("\nChampions: {} ({} titles)", name, titles_won);
            }
            TournamentEvent::Abandoned { rounds_played } => {
                println!("Tournament abandoned after {} rounds", rounds_played);
            }
        }
    }
}

fn print_round_header(stage: Option<Stage>, roster: &Roster, round: &[CompetitorId]) {
    println!("\n=== {} ===", stage_label(stage));
    for line in format_pairings(roster, round) {
        println!("  {}", line);
    }
    println!("Results:");
}
