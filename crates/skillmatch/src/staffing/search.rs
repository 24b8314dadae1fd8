use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{ExperienceLevel, Person, PersonId, Skill, SkillId};
use super::proficiency::ProficiencyLevel;
use super::service::StaffingError;
use super::text::empty_string_as_none;

/// Search parameters as they arrive on the query string. Empty values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub experience_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub skill: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_proficiency: Option<String>,
}

/// Advanced search filters. `min_proficiency` only applies together with `skill`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonnelSearch {
    pub experience_level: Option<ExperienceLevel>,
    pub skill: Option<String>,
    pub min_proficiency: Option<ProficiencyLevel>,
}

impl TryFrom<SearchQuery> for PersonnelSearch {
    type Error = StaffingError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        let experience_level = match query.experience_level {
            Some(label) => Some(
                ExperienceLevel::parse(&label).ok_or(StaffingError::InvalidExperience(label))?,
            ),
            None => None,
        };
        let min_proficiency = query
            .min_proficiency
            .map(|label| label.parse::<ProficiencyLevel>())
            .transpose()?;

        Ok(Self {
            experience_level,
            skill: query.skill,
            min_proficiency,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLabel {
    pub name: String,
    pub level: ProficiencyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub experience_level: ExperienceLevel,
    pub skills: Vec<SkillLabel>,
}

impl PersonnelSearch {
    fn skill_needle(&self) -> Option<String> {
        self.skill
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, person: &Person, catalog: &HashMap<SkillId, Skill>) -> bool {
        if let Some(level) = self.experience_level {
            if person.experience_level != level {
                return false;
            }
        }

        let Some(needle) = self.skill_needle() else {
            return true;
        };

        person.skills.iter().any(|held| {
            let name_matches = catalog
                .get(&held.skill_id)
                .map(|skill| skill.name.to_lowercase().contains(&needle))
                .unwrap_or(false);
            let level_ok = self
                .min_proficiency
                .map(|floor| held.level.meets_or_exceeds(floor))
                .unwrap_or(true);
            name_matches && level_ok
        })
    }

    /// Filter a roster in store order.
    pub fn run(&self, personnel: Vec<Person>, skills: Vec<Skill>) -> Vec<SearchHit> {
        let catalog: HashMap<SkillId, Skill> =
            skills.into_iter().map(|skill| (skill.id, skill)).collect();

        personnel
            .into_iter()
            .filter(|person| self.matches(person, &catalog))
            .map(|person| {
                let skills = person
                    .skills
                    .iter()
                    .filter_map(|held| {
                        catalog.get(&held.skill_id).map(|skill| SkillLabel {
                            name: skill.name.clone(),
                            level: held.level,
                        })
                    })
                    .collect();
                SearchHit {
                    id: person.id,
                    name: person.name,
                    email: person.email,
                    role: person.role,
                    experience_level: person.experience_level,
                    skills,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staffing::domain::CandidateSkill;

    fn catalog() -> Vec<Skill> {
        vec![
            Skill {
                id: SkillId(1),
                name: "React".to_string(),
                category: Some("Frontend".to_string()),
            },
            Skill {
                id: SkillId(2),
                name: "React Native".to_string(),
                category: Some("Mobile".to_string()),
            },
            Skill {
                id: SkillId(3),
                name: "Rust".to_string(),
                category: Some("Backend".to_string()),
            },
        ]
    }

    fn person(id: u64, level: ExperienceLevel, skills: &[(u64, ProficiencyLevel)]) -> Person {
        Person {
            id: PersonId(id),
            name: format!("person-{id}"),
            email: format!("person-{id}@example.com"),
            role: None,
            experience_level: level,
            skills: skills
                .iter()
                .map(|(skill, level)| CandidateSkill {
                    skill_id: SkillId(*skill),
                    level: *level,
                })
                .collect(),
        }
    }

    fn roster() -> Vec<Person> {
        vec![
            person(1, ExperienceLevel::Senior, &[(1, ProficiencyLevel::Expert)]),
            person(2, ExperienceLevel::Junior, &[(1, ProficiencyLevel::Beginner)]),
            person(
                3,
                ExperienceLevel::MidLevel,
                &[(2, ProficiencyLevel::Advanced), (3, ProficiencyLevel::Beginner)],
            ),
            person(4, ExperienceLevel::Senior, &[(3, ProficiencyLevel::Expert)]),
        ]
    }

    fn hit_ids(hits: &[SearchHit]) -> Vec<u64> {
        hits.iter().map(|hit| hit.id.0).collect()
    }

    #[test]
    fn no_filters_returns_everyone() {
        let hits = PersonnelSearch::default().run(roster(), catalog());
        assert_eq!(hit_ids(&hits), vec![1, 2, 3, 4]);
        assert_eq!(hits[2].skills.len(), 2);
        assert_eq!(hits[2].skills[0].name, "React Native");
    }

    #[test]
    fn skill_substring_with_floor_uses_proficiency_rank() {
        let search = PersonnelSearch {
            skill: Some("react".to_string()),
            min_proficiency: Some(ProficiencyLevel::Advanced),
            ..PersonnelSearch::default()
        };
        let hits = search.run(roster(), catalog());
        assert_eq!(hit_ids(&hits), vec![1, 3]);
    }

    #[test]
    fn min_proficiency_alone_is_ignored() {
        let search = PersonnelSearch {
            min_proficiency: Some(ProficiencyLevel::Expert),
            ..PersonnelSearch::default()
        };
        assert_eq!(hit_ids(&search.run(roster(), catalog())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn blank_query_values_mean_no_filter() {
        let raw = r#"{"experience_level": "", "skill": "react", "min_proficiency": " "}"#;
        let query: SearchQuery = serde_json::from_str(raw).expect("query parses");
        let search = PersonnelSearch::try_from(query).expect("blank filters resolve");
        assert_eq!(search.experience_level, None);
        assert_eq!(search.min_proficiency, None);
        assert_eq!(hit_ids(&search.run(roster(), catalog())), vec![1, 2, 3]);
    }

    #[test]
    fn unknown_labels_in_query_are_rejected() {
        let bad_level = SearchQuery {
            skill: Some("react".to_string()),
            min_proficiency: Some("Guru".to_string()),
            ..SearchQuery::default()
        };
        match PersonnelSearch::try_from(bad_level) {
            Err(StaffingError::InvalidLevel(err)) => assert_eq!(err.label, "Guru"),
            other => panic!("expected invalid level, got {other:?}"),
        }

        let bad_experience = SearchQuery {
            experience_level: Some("Principal".to_string()),
            ..SearchQuery::default()
        };
        assert!(matches!(
            PersonnelSearch::try_from(bad_experience),
            Err(StaffingError::InvalidExperience(label)) if label == "Principal"
        ));
    }

    #[test]
    fn experience_and_skill_filters_combine() {
        let search = PersonnelSearch {
            experience_level: Some(ExperienceLevel::Senior),
            skill: Some("RUST".to_string()),
            min_proficiency: None,
        };
        assert_eq!(hit_ids(&search.run(roster(), catalog())), vec![4]);
    }
}
