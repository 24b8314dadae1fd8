use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::assignments::{Assignment, AssignmentStatus};
use super::domain::{
    AssignmentId, CandidateSkill, ExperienceLevel, Person, PersonId, Project, ProjectId,
    ProjectStatus, Skill, SkillId, SkillRequirement,
};

/// Validated person fields handed to the store, which assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub experience_level: ExperienceLevel,
}

/// Validated project fields plus the initial requirement set, written atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub requirements: Vec<SkillRequirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub project_id: ProjectId,
    pub person_id: PersonId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: Option<String>,
    pub status: AssignmentStatus,
}

/// Record store for skills, personnel, and projects.
///
/// Multi-row writes (`insert_project`, `replace_requirements`) are all-or-nothing: an
/// implementation validates every row before applying any of them.
pub trait DirectoryRepository: Send + Sync {
    fn skills(&self) -> Result<Vec<Skill>, RepositoryError>;
    fn skill(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError>;
    fn insert_skill(&self, name: String, category: Option<String>)
        -> Result<Skill, RepositoryError>;

    /// Personnel in stable store order, each with their full skill list.
    fn personnel(&self) -> Result<Vec<Person>, RepositoryError>;
    fn person(&self, id: PersonId) -> Result<Option<Person>, RepositoryError>;
    fn insert_person(&self, draft: PersonDraft) -> Result<Person, RepositoryError>;
    fn upsert_person_skill(
        &self,
        person: PersonId,
        skill: CandidateSkill,
    ) -> Result<(), RepositoryError>;
    /// Removes the person with their skills and assignments. Absent ids are not an error.
    fn delete_person(&self, id: PersonId) -> Result<(), RepositoryError>;

    fn projects(&self) -> Result<Vec<Project>, RepositoryError>;
    fn project(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn insert_project(&self, draft: ProjectDraft) -> Result<Project, RepositoryError>;
    fn replace_requirements(
        &self,
        project: ProjectId,
        requirements: Vec<SkillRequirement>,
    ) -> Result<(), RepositoryError>;
    /// Removes the project with its requirements and assignments. Absent ids are not an error.
    fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError>;
}

/// Record store for time-boxed assignments.
pub trait AssignmentRepository: Send + Sync {
    fn insert(&self, draft: AssignmentDraft) -> Result<Assignment, RepositoryError>;
    /// Overwrites an existing row; `NotFound` when the id is unknown.
    fn update(&self, assignment: Assignment) -> Result<(), RepositoryError>;
    fn fetch(&self, id: AssignmentId) -> Result<Option<Assignment>, RepositoryError>;
    /// Returns whether a row was removed.
    fn delete(&self, id: AssignmentId) -> Result<bool, RepositoryError>;
    fn list(&self) -> Result<Vec<Assignment>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("{entity} {id} referenced but not stored")]
    MissingReference { entity: &'static str, id: u64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
