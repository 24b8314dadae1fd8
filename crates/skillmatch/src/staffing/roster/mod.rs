//! CSV roster import used to seed a directory for offline matching and demos.
//!
//! Expected header: `name,email,role,experience_level,skill,category,level`. Rows sharing an
//! email (case-insensitive) describe the same person; each row contributes at most one skill.

mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::domain::{CandidateSkill, NewPerson, NewSkill, SkillId};
use super::proficiency::InvalidLevel;
use super::repository::{AssignmentRepository, DirectoryRepository};
use super::service::{StaffingError, StaffingService};
use parser::RosterRecord;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingLevel { line: u64 },
    Level { line: u64, source: InvalidLevel },
    Experience { line: u64, label: String },
    Staffing(StaffingError),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingLevel { line } => {
                write!(f, "roster line {} names a skill without a level", line)
            }
            RosterImportError::Level { line, source } => {
                write!(f, "roster line {}: {}", line, source)
            }
            RosterImportError::Experience { line, label } => write!(
                f,
                "roster line {}: unknown experience level '{}' (expected Junior, Mid-Level or Senior)",
                line, label
            ),
            RosterImportError::Staffing(err) => {
                write!(f, "could not store roster entry: {}", err)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingLevel { .. } | RosterImportError::Experience { .. } => None,
            RosterImportError::Level { source, .. } => Some(source),
            RosterImportError::Staffing(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<StaffingError> for RosterImportError {
    fn from(err: StaffingError) -> Self {
        Self::Staffing(err)
    }
}

/// Parsed roster, ready to be written into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    records: Vec<RosterRecord>,
}

/// Counts of what a roster load created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterSummary {
    pub people: usize,
    pub skills: usize,
    pub skill_links: usize,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Roster, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Roster, RosterImportError> {
        let records = parser::parse_records(reader)?;
        Ok(Roster { records })
    }
}

impl Roster {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write people, skills and their links through the service. Skills already in the
    /// catalog are reused by case-insensitive name.
    pub fn load_into<D, A>(
        &self,
        service: &StaffingService<D, A>,
    ) -> Result<RosterSummary, RosterImportError>
    where
        D: DirectoryRepository + 'static,
        A: AssignmentRepository + 'static,
    {
        let mut summary = RosterSummary::default();
        let mut skill_ids: HashMap<String, SkillId> = service
            .skills()?
            .into_iter()
            .map(|skill| (skill.name.to_lowercase(), skill.id))
            .collect();
        let mut people = HashMap::new();

        for record in &self.records {
            let email_key = record.email.to_lowercase();
            let person_id = match people.get(&email_key) {
                Some(id) => *id,
                None => {
                    let person = service.create_person(NewPerson {
                        name: Some(record.name.clone()),
                        email: Some(record.email.clone()),
                        role: record.role.clone(),
                        experience_level: record.experience_level,
                    })?;
                    summary.people += 1;
                    people.insert(email_key, person.id);
                    person.id
                }
            };

            let Some(skill) = &record.skill else {
                continue;
            };

            let skill_key = skill.name.to_lowercase();
            let skill_id = match skill_ids.get(&skill_key) {
                Some(id) => *id,
                None => {
                    let created = service.create_skill(NewSkill {
                        name: Some(skill.name.clone()),
                        category: skill.category.clone(),
                    })?;
                    summary.skills += 1;
                    skill_ids.insert(skill_key, created.id);
                    created.id
                }
            };

            service.assign_skill(
                person_id,
                CandidateSkill {
                    skill_id,
                    level: skill.level,
                },
            )?;
            summary.skill_links += 1;
        }

        info!(
            people = summary.people,
            skills = summary.skills,
            links = summary.skill_links,
            "roster loaded"
        );
        Ok(summary)
    }
}
