//! The three closed-set dimensions of a turtle soup riddle.
//!
//! Every riddle is described by a category, an era, and a difficulty.
//! All three are small fixed enumerations; content tables elsewhere in
//! this crate are total over their cross product.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for parsing a dimension from its string key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseDimensionError {
    kind: &'static str,
    value: String,
}

/// What kind of mystery the riddle revolves around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleCategory {
    Death,
    Identity,
    Behavior,
    Mystery,
    Logic,
}

impl PuzzleCategory {
    /// All categories, in presentation order.
    pub const ALL: [PuzzleCategory; 5] = [
        PuzzleCategory::Death,
        PuzzleCategory::Identity,
        PuzzleCategory::Behavior,
        PuzzleCategory::Mystery,
        PuzzleCategory::Logic,
    ];

    /// Stable key fragment used in template keys and CLI flags.
    pub fn key(&self) -> &'static str {
        match self {
            PuzzleCategory::Death => "death",
            PuzzleCategory::Identity => "identity",
            PuzzleCategory::Behavior => "behavior",
            PuzzleCategory::Mystery => "mystery",
            PuzzleCategory::Logic => "logic",
        }
    }

    /// Display label, as shown to players and embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            PuzzleCategory::Death => "死亡之谜",
            PuzzleCategory::Identity => "身份之谜",
            PuzzleCategory::Behavior => "行为之谜",
            PuzzleCategory::Mystery => "悬疑事件",
            PuzzleCategory::Logic => "逻辑悖论",
        }
    }
}

impl fmt::Display for PuzzleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PuzzleCategory {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ParseDimensionError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// The historical setting of the riddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    Ancient,
    Modern,
}

impl Era {
    /// Both eras, in presentation order.
    pub const ALL: [Era; 2] = [Era::Ancient, Era::Modern];

    /// Stable key fragment used in template keys and CLI flags.
    pub fn key(&self) -> &'static str {
        match self {
            Era::Ancient => "ancient",
            Era::Modern => "modern",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Era::Ancient => "古代",
            Era::Modern => "现代",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Era {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.key() == s)
            .ok_or_else(|| ParseDimensionError {
                kind: "era",
                value: s.to_string(),
            })
    }
}

/// How hard the riddle is meant to be.
///
/// Difficulty also fixes the clue count: easier riddles hand the player
/// more clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulty tiers, in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stable key fragment used in template keys and CLI flags.
    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }

    /// Number of clues a riddle of this difficulty carries.
    pub fn clue_count(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 3,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.key() == s)
            .ok_or_else(|| ParseDimensionError {
                kind: "difficulty",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for category in PuzzleCategory::ALL {
            assert_eq!(category.key().parse::<PuzzleCategory>(), Ok(category));
        }
        for era in Era::ALL {
            assert_eq!(era.key().parse::<Era>(), Ok(era));
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.key().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!("murder".parse::<PuzzleCategory>().is_err());
        assert!("medieval".parse::<Era>().is_err());
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels: Vec<_> = PuzzleCategory::ALL.iter().map(|c| c.label()).collect();
        for (i, label) in labels.iter().enumerate() {
            assert!(!labels[i + 1..].contains(label));
        }
    }

    #[test]
    fn test_clue_counts() {
        assert_eq!(Difficulty::Easy.clue_count(), 4);
        assert_eq!(Difficulty::Medium.clue_count(), 3);
        assert_eq!(Difficulty::Hard.clue_count(), 2);
    }
}
