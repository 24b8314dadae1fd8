use std::collections::BTreeMap;

use serde::Serialize;

use super::super::domain::{Person, PersonId, Project, SkillId, SkillRequirement};
use super::super::proficiency::ProficiencyLevel;

/// Ordered requirement list attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    requirements: Vec<SkillRequirement>,
}

impl RequirementSet {
    pub fn new(requirements: Vec<SkillRequirement>) -> Self {
        Self { requirements }
    }

    pub fn from_project(project: &Project) -> Self {
        Self::new(project.requirements.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillRequirement> {
        self.requirements.iter()
    }
}

impl FromIterator<SkillRequirement> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = SkillRequirement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Per-request projection of a person and the levels they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    pub id: PersonId,
    pub name: String,
    pub role: Option<String>,
    pub email: String,
    #[serde(skip)]
    pub skills: BTreeMap<SkillId, ProficiencyLevel>,
}

impl CandidateProfile {
    pub fn from_person(person: &Person) -> Self {
        // Later entries win if a store ever hands back duplicates.
        let skills = person
            .skills
            .iter()
            .map(|entry| (entry.skill_id, entry.level))
            .collect();

        Self {
            id: person.id,
            name: person.name.clone(),
            role: person.role.clone(),
            email: person.email.clone(),
            skills,
        }
    }

    pub fn level(&self, skill_id: SkillId) -> Option<ProficiencyLevel> {
        self.skills.get(&skill_id).copied()
    }
}
