use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attained or required skill level. Ordering always goes through [`ProficiencyLevel::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Raised when a label outside the four-level scale reaches a comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid proficiency level '{label}' (expected Beginner, Intermediate, Advanced or Expert)")]
pub struct InvalidLevel {
    pub label: String,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 4] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Expert,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            ProficiencyLevel::Beginner => 1,
            ProficiencyLevel::Intermediate => 2,
            ProficiencyLevel::Advanced => 3,
            ProficiencyLevel::Expert => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
            ProficiencyLevel::Expert => "Expert",
        }
    }

    /// Rank of a raw stored label. Unknown labels are an integrity error, never clamped.
    pub fn rank_label(label: &str) -> Result<u8, InvalidLevel> {
        label.parse::<ProficiencyLevel>().map(ProficiencyLevel::rank)
    }

    pub fn meets_or_exceeds(self, required: ProficiencyLevel) -> bool {
        self.rank() >= required.rank()
    }

    /// Signed distance between an attained level and a required one.
    pub fn surplus_over(self, required: ProficiencyLevel) -> i32 {
        i32::from(self.rank()) - i32::from(required.rank())
    }
}

impl Ord for ProficiencyLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for ProficiencyLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = InvalidLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ProficiencyLevel::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidLevel {
                label: value.to_string(),
            })
    }
}

impl TryFrom<String> for ProficiencyLevel {
    type Error = InvalidLevel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
