//! Team specs given on the command line (`--team "Name=Rating"`)

use anyhow::{Context, Result};

use bracket_core::Roster;

/// One `NAME=RATING` argument, not yet validated by the roster
#[derive(Clone, Debug, PartialEq)]
pub struct TeamSpec {
    pub name: String,
    pub rating: String,
}

/// clap value parser for `NAME=RATING`.
///
/// Splits on the last `=`, so only the rating side is constrained here;
/// name and rating rules are enforced on registration.
pub fn parse_team_spec(raw: &str) -> std::result::Result<TeamSpec, String> {
    let (name, rating) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=RATING, got '{}'", raw))?;
    Ok(TeamSpec {
        name: name.trim().to_string(),
        rating: rating.to_string(),
    })
}

/// Register every spec on a fresh roster, failing on the first bad one
pub fn build_roster(specs: &[TeamSpec]) -> Result<Roster> {
    let mut roster = Roster::new();
    for spec in specs {
        roster
            .register(&spec.name, &spec.rating)
            .with_context(|| format!("Failed to register team '{}'", spec.name))?;
    }
    tracing::debug!("Registered {} teams", roster.len());
    Ok(roster)
}
