use serde::Deserialize;
use std::io::Read;

use super::RosterImportError;
use crate::staffing::domain::ExperienceLevel;
use crate::staffing::proficiency::ProficiencyLevel;
use crate::staffing::text::empty_string_as_none;

/// One CSV line: a person, optionally paired with one skill they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterRecord {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: Option<String>,
    pub(crate) experience_level: Option<ExperienceLevel>,
    pub(crate) skill: Option<RosterSkill>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterSkill {
    pub(crate) name: String,
    pub(crate) category: Option<String>,
    pub(crate) level: ProficiencyLevel,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        let line = index as u64 + 2;

        let experience_level = match row.experience_level {
            Some(label) => Some(
                ExperienceLevel::parse(&label)
                    .ok_or(RosterImportError::Experience { line, label })?,
            ),
            None => None,
        };

        let skill = match row.skill {
            Some(name) => {
                let raw_level = row
                    .level
                    .ok_or(RosterImportError::MissingLevel { line })?;
                let level = raw_level
                    .parse::<ProficiencyLevel>()
                    .map_err(|source| RosterImportError::Level { line, source })?;
                Some(RosterSkill {
                    name,
                    category: row.category,
                    level,
                })
            }
            None => None,
        };

        records.push(RosterRecord {
            name: row.name,
            email: row.email,
            role: row.role,
            experience_level,
            skill,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skill: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    level: Option<String>,
}
