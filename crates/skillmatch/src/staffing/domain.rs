use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::proficiency::ProficiencyLevel;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a catalog skill.
    SkillId
);
record_id!(
    /// Identifier of a person on the agency roster.
    PersonId
);
record_id!(
    /// Identifier of a client project.
    ProjectId
);
record_id!(
    /// Identifier of a time-boxed project assignment.
    AssignmentId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Seniority tier recorded on every person; orthogonal to per-skill proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "junior" => Some(Self::Junior),
            "mid-level" | "mid" | "midlevel" => Some(Self::MidLevel),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }
}

/// A skill a person holds. At most one entry per skill per person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub skill_id: SkillId,
    pub level: ProficiencyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub skills: Vec<CandidateSkill>,
}

impl Person {
    /// Insert or overwrite the attained level for a skill.
    pub fn upsert_skill(&mut self, skill_id: SkillId, level: ProficiencyLevel) {
        match self.skills.iter_mut().find(|entry| entry.skill_id == skill_id) {
            Some(entry) => entry.level = level,
            None => self.skills.push(CandidateSkill { skill_id, level }),
        }
    }

    pub fn level_for(&self, skill_id: SkillId) -> Option<ProficiencyLevel> {
        self.skills
            .iter()
            .find(|entry| entry.skill_id == skill_id)
            .map(|entry| entry.level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
}

/// Minimum level a project demands for one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill_id: SkillId,
    pub min_level: ProficiencyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub requirements: Vec<SkillRequirement>,
}

/// Write payload for a new catalog skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSkill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Write payload for a new person. Skills are attached afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
}

/// Write payload for a new project together with its initial requirement set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub requirements: Vec<SkillRequirement>,
}
