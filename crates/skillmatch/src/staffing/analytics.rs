use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::domain::{
    ExperienceLevel, Person, PersonId, Project, ProjectStatus, Skill, SkillId, SkillRequirement,
};

const TOP_LIMIT: usize = 5;

/// Which slice of the roster the experience distribution covers. Any label other than
/// `Market Ready` (including the dashboard's `All Personnel`) selects everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PopulationFilter {
    #[default]
    All,
    #[serde(rename = "Market Ready")]
    MarketReady,
}

impl From<String> for PopulationFilter {
    fn from(label: String) -> Self {
        if label.trim() == "Market Ready" {
            PopulationFilter::MarketReady
        } else {
            PopulationFilter::All
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub skill_category: Option<String>,
    #[serde(default, rename = "pop_filter")]
    pub population: PopulationFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub personnel: usize,
    pub skills: usize,
    pub projects: usize,
    pub active_projects: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillPopularity {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceBucket {
    pub experience_level: ExperienceLevel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPerson {
    pub id: PersonId,
    pub name: String,
    pub role: Option<String>,
    pub total_skills: usize,
    pub skill_names: Vec<String>,
    pub active_projects: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardAnalytics {
    pub counts: DashboardCounts,
    pub top_skills: Vec<SkillPopularity>,
    pub experience_levels: Vec<ExperienceBucket>,
    pub categories: Vec<String>,
    pub top_personnel: Vec<TopPerson>,
}

/// Holds at least one skill an Active project requires, at or above the required level.
pub fn is_market_ready(person: &Person, active_requirements: &[SkillRequirement]) -> bool {
    person.skills.iter().any(|held| {
        active_requirements.iter().any(|requirement| {
            requirement.skill_id == held.skill_id
                && held.level.meets_or_exceeds(requirement.min_level)
        })
    })
}

impl DashboardAnalytics {
    pub fn compute(
        query: &AnalyticsQuery,
        skills: &[Skill],
        personnel: &[Person],
        projects: &[Project],
        active_assignments: &HashMap<PersonId, usize>,
    ) -> Self {
        let counts = DashboardCounts {
            personnel: personnel.len(),
            skills: skills.len(),
            projects: projects.len(),
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::Active)
                .count(),
        };

        let catalog: HashMap<SkillId, &Skill> =
            skills.iter().map(|skill| (skill.id, skill)).collect();

        Self {
            counts,
            top_skills: top_skills(query, skills, personnel),
            experience_levels: experience_levels(query, personnel, projects),
            categories: categories(skills),
            top_personnel: top_personnel(personnel, &catalog, active_assignments),
        }
    }
}

fn top_skills(
    query: &AnalyticsQuery,
    skills: &[Skill],
    personnel: &[Person],
) -> Vec<SkillPopularity> {
    let category = query
        .skill_category
        .as_deref()
        .filter(|category| !category.is_empty() && *category != "All");

    let mut holders: HashMap<SkillId, usize> = HashMap::new();
    for person in personnel {
        for held in &person.skills {
            *holders.entry(held.skill_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<SkillPopularity> = skills
        .iter()
        .filter(|skill| match category {
            Some(category) => skill.category.as_deref() == Some(category),
            None => true,
        })
        .filter_map(|skill| {
            holders.get(&skill.id).map(|count| SkillPopularity {
                name: skill.name.clone(),
                count: *count,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(TOP_LIMIT);
    ranked
}

fn experience_levels(
    query: &AnalyticsQuery,
    personnel: &[Person],
    projects: &[Project],
) -> Vec<ExperienceBucket> {
    let active_requirements: Vec<SkillRequirement> = projects
        .iter()
        .filter(|project| project.status == ProjectStatus::Active)
        .flat_map(|project| project.requirements.iter().copied())
        .collect();

    let mut buckets: BTreeMap<ExperienceLevel, usize> = BTreeMap::new();
    for person in personnel {
        let included = match query.population {
            PopulationFilter::All => true,
            PopulationFilter::MarketReady => is_market_ready(person, &active_requirements),
        };
        if included {
            *buckets.entry(person.experience_level).or_insert(0) += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(experience_level, count)| ExperienceBucket {
            experience_level,
            count,
        })
        .collect()
}

fn categories(skills: &[Skill]) -> Vec<String> {
    skills
        .iter()
        .filter_map(|skill| skill.category.as_deref())
        .filter(|category| !category.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn top_personnel(
    personnel: &[Person],
    catalog: &HashMap<SkillId, &Skill>,
    active_assignments: &HashMap<PersonId, usize>,
) -> Vec<TopPerson> {
    let mut ranked: Vec<TopPerson> = personnel
        .iter()
        .map(|person| {
            let distinct: BTreeSet<SkillId> =
                person.skills.iter().map(|held| held.skill_id).collect();
            let skill_names = distinct
                .iter()
                .filter_map(|id| catalog.get(id).map(|skill| skill.name.clone()))
                .collect();
            TopPerson {
                id: person.id,
                name: person.name.clone(),
                role: person.role.clone(),
                total_skills: distinct.len(),
                skill_names,
                active_projects: active_assignments.get(&person.id).copied().unwrap_or(0),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.total_skills.cmp(&a.total_skills));
    ranked.truncate(TOP_LIMIT);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staffing::domain::{CandidateSkill, ProjectId};
    use crate::staffing::proficiency::ProficiencyLevel;

    fn skill(id: u64, name: &str, category: &str) -> Skill {
        Skill {
            id: SkillId(id),
            name: name.to_string(),
            category: Some(category.to_string()),
        }
    }

    fn person(id: u64, level: ExperienceLevel, skills: &[(u64, ProficiencyLevel)]) -> Person {
        Person {
            id: PersonId(id),
            name: format!("person-{id}"),
            email: format!("person-{id}@example.com"),
            role: Some("Consultant".to_string()),
            experience_level: level,
            skills: skills
                .iter()
                .map(|(skill_id, level)| CandidateSkill {
                    skill_id: SkillId(*skill_id),
                    level: *level,
                })
                .collect(),
        }
    }

    fn project(
        id: u64,
        status: ProjectStatus,
        requirements: &[(u64, ProficiencyLevel)],
    ) -> Project {
        Project {
            id: ProjectId(id),
            name: format!("project-{id}"),
            description: None,
            start_date: None,
            end_date: None,
            status,
            requirements: requirements
                .iter()
                .map(|(skill_id, min_level)| SkillRequirement {
                    skill_id: SkillId(*skill_id),
                    min_level: *min_level,
                })
                .collect(),
        }
    }

    fn fixture() -> (Vec<Skill>, Vec<Person>, Vec<Project>) {
        let skills = vec![
            skill(1, "Rust", "Backend"),
            skill(2, "React", "Frontend"),
            skill(3, "Go", "Backend"),
        ];
        let personnel = vec![
            person(
                1,
                ExperienceLevel::Senior,
                &[(1, ProficiencyLevel::Expert), (2, ProficiencyLevel::Beginner)],
            ),
            person(2, ExperienceLevel::Junior, &[(1, ProficiencyLevel::Beginner)]),
            person(3, ExperienceLevel::MidLevel, &[(3, ProficiencyLevel::Advanced)]),
            person(4, ExperienceLevel::Junior, &[]),
        ];
        let projects = vec![
            project(1, ProjectStatus::Active, &[(1, ProficiencyLevel::Advanced)]),
            project(2, ProjectStatus::Planning, &[(3, ProficiencyLevel::Beginner)]),
        ];
        (skills, personnel, projects)
    }

    #[test]
    fn counts_and_rankings_cover_the_roster() {
        let (skills, personnel, projects) = fixture();
        let mut active = HashMap::new();
        active.insert(PersonId(1), 2);

        let analytics = DashboardAnalytics::compute(
            &AnalyticsQuery::default(),
            &skills,
            &personnel,
            &projects,
            &active,
        );

        assert_eq!(
            analytics.counts,
            DashboardCounts {
                personnel: 4,
                skills: 3,
                projects: 2,
                active_projects: 1,
            }
        );
        assert_eq!(analytics.top_skills[0].name, "Rust");
        assert_eq!(analytics.top_skills[0].count, 2);
        assert_eq!(analytics.categories, vec!["Backend", "Frontend"]);
        assert_eq!(analytics.top_personnel[0].id, PersonId(1));
        assert_eq!(analytics.top_personnel[0].total_skills, 2);
        assert_eq!(analytics.top_personnel[0].active_projects, 2);
        assert_eq!(analytics.top_personnel[1].active_projects, 0);

        let total: usize = analytics.experience_levels.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn category_filter_restricts_top_skills() {
        let (skills, personnel, projects) = fixture();
        let query = AnalyticsQuery {
            skill_category: Some("Frontend".to_string()),
            population: PopulationFilter::All,
        };
        let analytics =
            DashboardAnalytics::compute(&query, &skills, &personnel, &projects, &HashMap::new());
        let names: Vec<&str> = analytics
            .top_skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["React"]);
    }

    #[test]
    fn market_ready_counts_only_qualified_people_for_active_projects() {
        let (skills, personnel, projects) = fixture();
        let query = AnalyticsQuery {
            skill_category: None,
            population: PopulationFilter::MarketReady,
        };
        let analytics =
            DashboardAnalytics::compute(&query, &skills, &personnel, &projects, &HashMap::new());

        assert_eq!(
            analytics.experience_levels,
            vec![ExperienceBucket {
                experience_level: ExperienceLevel::Senior,
                count: 1,
            }]
        );
    }

    #[test]
    fn population_labels_other_than_market_ready_select_everyone() {
        for (label, expected) in [
            ("Market Ready", PopulationFilter::MarketReady),
            ("All Personnel", PopulationFilter::All),
            ("All", PopulationFilter::All),
            ("", PopulationFilter::All),
        ] {
            assert_eq!(PopulationFilter::from(label.to_string()), expected, "label {label:?}");
        }
    }
}
