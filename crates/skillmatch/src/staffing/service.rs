use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::analytics::{AnalyticsQuery, DashboardAnalytics};
use super::assignments::AssignmentLedger;
use super::domain::{
    CandidateSkill, NewPerson, NewProject, NewSkill, Person, PersonId, Project, ProjectId, Skill,
    SkillId, SkillRequirement,
};
use super::matching::{CandidateProfile, MatchEngine, MatchResult, RequirementSet};
use super::proficiency::InvalidLevel;
use super::repository::{
    AssignmentRepository, DirectoryRepository, PersonDraft, ProjectDraft, RepositoryError,
};
use super::search::{PersonnelSearch, SearchHit};

/// Service composing the record stores with the match engine, ledger, search and analytics.
pub struct StaffingService<D, A> {
    directory: Arc<D>,
    engine: MatchEngine,
    ledger: AssignmentLedger<D, A>,
}

impl<D, A> StaffingService<D, A>
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    pub fn new(directory: Arc<D>, assignments: Arc<A>) -> Self {
        let ledger = AssignmentLedger::new(directory.clone(), assignments);
        Self {
            directory,
            engine: MatchEngine::new(),
            ledger,
        }
    }

    pub fn ledger(&self) -> &AssignmentLedger<D, A> {
        &self.ledger
    }

    /// Rank every person who meets all of a project's requirements.
    pub fn match_project(&self, project_id: ProjectId) -> Result<Vec<MatchResult>, StaffingError> {
        let project = self
            .directory
            .project(project_id)?
            .ok_or_else(|| StaffingError::not_found("project", project_id.0))?;

        let requirements = RequirementSet::from_project(&project);
        if requirements.is_empty() {
            debug!(%project_id, "project has no requirements; nobody matches");
            return Ok(Vec::new());
        }

        let population: Vec<CandidateProfile> = self
            .directory
            .personnel()?
            .iter()
            .map(CandidateProfile::from_person)
            .collect();
        let population_size = population.len();

        let matches = self.engine.rank(&requirements, population);
        debug!(
            %project_id,
            requirements = requirements.len(),
            population = population_size,
            matched = matches.len(),
            "match computed"
        );
        Ok(matches)
    }

    pub fn search(&self, search: &PersonnelSearch) -> Result<Vec<SearchHit>, StaffingError> {
        let personnel = self.directory.personnel()?;
        let skills = self.directory.skills()?;
        Ok(search.run(personnel, skills))
    }

    pub fn analytics(&self, query: &AnalyticsQuery) -> Result<DashboardAnalytics, StaffingError> {
        let skills = self.directory.skills()?;
        let personnel = self.directory.personnel()?;
        let projects = self.directory.projects()?;
        let active = self.ledger.active_counts()?;
        Ok(DashboardAnalytics::compute(
            query, &skills, &personnel, &projects, &active,
        ))
    }

    pub fn skills(&self) -> Result<Vec<Skill>, StaffingError> {
        Ok(self.directory.skills()?)
    }

    pub fn create_skill(&self, skill: NewSkill) -> Result<Skill, StaffingError> {
        let name = required_text(skill.name, "name")?;
        let stored = self.directory.insert_skill(name, skill.category)?;
        info!(skill_id = %stored.id, name = %stored.name, "skill created");
        Ok(stored)
    }

    pub fn personnel(&self) -> Result<Vec<Person>, StaffingError> {
        Ok(self.directory.personnel()?)
    }

    pub fn create_person(&self, person: NewPerson) -> Result<Person, StaffingError> {
        let draft = PersonDraft {
            name: required_text(person.name, "name")?,
            email: required_text(person.email, "email")?,
            role: person.role,
            experience_level: person.experience_level.unwrap_or_default(),
        };
        let stored = self.directory.insert_person(draft)?;
        info!(person_id = %stored.id, "person created");
        Ok(stored)
    }

    /// Attach a skill to a person, overwriting any level already recorded.
    pub fn assign_skill(
        &self,
        person_id: PersonId,
        skill: CandidateSkill,
    ) -> Result<(), StaffingError> {
        if self.directory.person(person_id)?.is_none() {
            return Err(StaffingError::not_found("person", person_id.0));
        }
        if self.directory.skill(skill.skill_id)?.is_none() {
            return Err(StaffingError::not_found("skill", skill.skill_id.0));
        }
        self.directory.upsert_person_skill(person_id, skill)?;
        info!(%person_id, skill_id = %skill.skill_id, level = %skill.level, "skill assigned");
        Ok(())
    }

    pub fn delete_person(&self, person_id: PersonId) -> Result<(), StaffingError> {
        self.directory.delete_person(person_id)?;
        info!(%person_id, "person deleted");
        Ok(())
    }

    pub fn projects(&self) -> Result<Vec<Project>, StaffingError> {
        Ok(self.directory.projects()?)
    }

    /// Insert a project together with its initial requirements in one write.
    pub fn create_project(&self, project: NewProject) -> Result<Project, StaffingError> {
        let name = required_text(project.name, "name")?;
        self.ensure_skills_exist(project.requirements.iter().map(|r| r.skill_id))?;
        let draft = ProjectDraft {
            name,
            description: project.description,
            start_date: project.start_date,
            end_date: project.end_date,
            status: project.status.unwrap_or_default(),
            requirements: project.requirements,
        };
        let stored = self.directory.insert_project(draft)?;
        info!(
            project_id = %stored.id,
            requirements = stored.requirements.len(),
            "project created"
        );
        Ok(stored)
    }

    /// Swap a project's whole requirement set; either every row changes or none does.
    pub fn replace_requirements(
        &self,
        project_id: ProjectId,
        requirements: Vec<SkillRequirement>,
    ) -> Result<Project, StaffingError> {
        if self.directory.project(project_id)?.is_none() {
            return Err(StaffingError::not_found("project", project_id.0));
        }
        self.ensure_skills_exist(requirements.iter().map(|r| r.skill_id))?;

        match self.directory.replace_requirements(project_id, requirements) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                return Err(StaffingError::not_found("project", project_id.0));
            }
            Err(other) => return Err(other.into()),
        }

        let project = self
            .directory
            .project(project_id)?
            .ok_or_else(|| StaffingError::not_found("project", project_id.0))?;
        info!(
            %project_id,
            requirements = project.requirements.len(),
            "project requirements replaced"
        );
        Ok(project)
    }

    pub fn delete_project(&self, project_id: ProjectId) -> Result<(), StaffingError> {
        self.directory.delete_project(project_id)?;
        info!(%project_id, "project deleted");
        Ok(())
    }

    fn ensure_skills_exist<I>(&self, ids: I) -> Result<(), StaffingError>
    where
        I: IntoIterator<Item = SkillId>,
    {
        let known: HashSet<SkillId> = self
            .directory
            .skills()?
            .into_iter()
            .map(|skill| skill.id)
            .collect();
        match ids.into_iter().find(|id| !known.contains(id)) {
            Some(missing) => Err(StaffingError::not_found("skill", missing.0)),
            None => Ok(()),
        }
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, StaffingError> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(StaffingError::MissingField(field))
}

/// Error raised by the staffing service.
#[derive(Debug, thiserror::Error)]
pub enum StaffingError {
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevel),
    #[error("invalid experience level '{0}' (expected Junior, Mid-Level or Senior)")]
    InvalidExperience(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("storage failure: {0}")]
    Storage(RepositoryError),
}

impl From<RepositoryError> for StaffingError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::MissingReference { entity, id } => Self::NotFound { entity, id },
            other => Self::Storage(other),
        }
    }
}

impl StaffingError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}
