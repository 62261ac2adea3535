//! Interactive menu
//!
//! Reads numbered menu choices from any `BufRead` and writes to any `Write`,
//! so the whole loop can be driven from tests. Core errors are printed and
//! the menu comes back; only I/O failures end the session early.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use bracket_tournament::{Advance, TournamentConfig, TournamentManager};

use crate::report::{format_pairings, name_of, stage_label};

const MENU: &str = "
1_Create Team
2_Show Teams
3_Show Single Team
4_Delete Team
5_Generate Tournament
6_Exit
";

/// Run the menu on stdin/stdout
pub fn run(seed: Option<u64>) -> Result<()> {
    let config = TournamentConfig {
        seed,
        ..Default::default()
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(TournamentManager::new(config), stdin.lock(), stdout.lock());
    repl.run()
}

pub struct Repl<R, W> {
    manager: TournamentManager,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(manager: TournamentManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    /// Loop until the user picks Exit or input runs out
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}\n> ", MENU)?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else {
                break;
            };
            match choice.trim() {
                "1" => self.create_team()?,
                "2" => self.show_teams()?,
                "3" => self.show_single_team()?,
                "4" => self.delete_team()?,
                "5" => self.play_tournament()?,
                "6" => {
                    writeln!(self.output, "Exiting the game.")?;
                    break;
                }
                _ => writeln!(self.output, "Choose a valid option.")?,
            }
        }
        Ok(())
    }

    fn create_team(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Give the name for new team: ")? else {
            return Ok(());
        };
        let Some(rating) = self.prompt("Give the rating for new team: ")? else {
            return Ok(());
        };

        match self.manager.register(&name, &rating) {
            Ok(team) => {
                let line = format!("Team created: {}", team);
                writeln!(self.output, "{}", line)?;
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn show_teams(&mut self) -> Result<()> {
        match self.manager.list_sorted_by_rating() {
            Ok(table) => {
                for (i, standing) in table.iter().enumerate() {
                    writeln!(self.output, "{}_{}", i + 1, standing)?;
                }
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn show_single_team(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Give the name of the team for info: ")? else {
            return Ok(());
        };
        match self.manager.find(&name) {
            Some(team) => writeln!(self.output, "{}", team)?,
            None => writeln!(self.output, "There is no team with that name")?,
        }
        Ok(())
    }

    fn delete_team(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Give the name of the team for delete: ")? else {
            return Ok(());
        };
        match self.manager.remove(&name) {
            Ok(_) => writeln!(self.output, "Team deleted.")?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    /// Step through a tournament one round per Enter press.
    ///
    /// Typing `q` abandons the tournament; ratings from finished rounds stay.
    fn play_tournament(&mut self) -> Result<()> {
        if let Err(e) = self.manager.start_tournament() {
            writeln!(self.output, "{}", e)?;
            return Ok(());
        }

        while let Some(round) = self.manager.current_round() {
            let header = stage_label(self.manager.current_stage());
            let pairings = format_pairings(self.manager.roster(), round);

            writeln!(self.output, "\n=== {} ===", header)?;
            for line in &pairings {
                writeln!(self.output, "  {}", line)?;
            }

            let answer = self.prompt("Press Enter to simulate (q to quit): ")?;
            if answer.as_deref().map_or(true, |a| a.trim().eq_ignore_ascii_case("q")) {
                self.manager.abandon();
                writeln!(self.output, "Tournament abandoned.")?;
                return Ok(());
            }

            match self.manager.advance() {
                Ok(Advance::Champion { champion, .. }) => {
                    let name = name_of(self.manager.roster(), champion);
                    writeln!(self.output, "\nChampions: {}", name)?;
                }
                Ok(Advance::NextRound(result)) => {
                    for outcome in &result.outcomes {
                        let line = format!(
                            "  {} advances",
                            name_of(self.manager.roster(), outcome.winner)
                        );
                        writeln!(self.output, "{}", line)?;
                    }
                }
                Err(e) => {
                    self.manager.abandon();
                    writeln!(self.output, "{}", e)?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without its line ending; None at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(trimmed))
    }
}
