//! Round naming and bracket sizes

use std::fmt;

use serde::Serialize;

/// Competitor counts a tournament may start with
pub const VALID_BRACKET_SIZES: [usize; 4] = [4, 8, 16, 32];

/// Whether `count` competitors form a full bracket
pub fn is_valid_bracket_size(count: usize) -> bool {
    VALID_BRACKET_SIZES.contains(&count)
}

/// Named stage of a single-elimination bracket, keyed by competitors left
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    RoundOf32,
    RoundOf16,
    Quarterfinal,
    Semifinal,
    Final,
}

impl Stage {
    /// Stage for a round with `size` competitors; None for any other size
    pub fn from_size(size: usize) -> Option<Stage> {
        match size {
            32 => Some(Stage::RoundOf32),
            16 => Some(Stage::RoundOf16),
            8 => Some(Stage::Quarterfinal),
            4 => Some(Stage::Semifinal),
            2 => Some(Stage::Final),
            _ => None,
        }
    }

    /// Competitors taking part in this stage
    pub fn size(self) -> usize {
        match self {
            Stage::RoundOf32 => 32,
            Stage::RoundOf16 => 16,
            Stage::Quarterfinal => 8,
            Stage::Semifinal => 4,
            Stage::Final => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::RoundOf32 => "Round of 32",
            Stage::RoundOf16 => "Round of 16",
            Stage::Quarterfinal => "Quarterfinal",
            Stage::Semifinal => "Semifinal",
            Stage::Final => "Final",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::from_size(32).unwrap().name(), "Round of 32");
        assert_eq!(Stage::from_size(16).unwrap().name(), "Round of 16");
        assert_eq!(Stage::from_size(8).unwrap().name(), "Quarterfinal");
        assert_eq!(Stage::from_size(4).unwrap().name(), "Semifinal");
        assert_eq!(Stage::from_size(2).unwrap().to_string(), "Final");
    }

    #[test]
    fn test_stage_illegal_sizes() {
        for size in [0, 1, 3, 6, 12, 64] {
            assert_eq!(Stage::from_size(size), None);
        }
    }

    #[test]
    fn test_stage_size_roundtrip() {
        for size in [2, 4, 8, 16, 32] {
            assert_eq!(Stage::from_size(size).unwrap().size(), size);
        }
    }

    #[test]
    fn test_valid_bracket_sizes() {
        for ok in [4, 8, 16, 32] {
            assert!(is_valid_bracket_size(ok));
        }
        for bad in [0, 2, 3, 5, 17, 33, 64] {
            assert!(!is_valid_bracket_size(bad));
        }
    }
}
