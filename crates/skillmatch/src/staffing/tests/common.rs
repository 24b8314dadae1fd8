use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::staffing::assignments::Assignment;
use crate::staffing::domain::{
    AssignmentId, CandidateSkill, ExperienceLevel, NewPerson, NewProject, NewSkill, Person,
    PersonId, Project, ProjectId, ProjectStatus, Skill, SkillId, SkillRequirement,
};
use crate::staffing::memory::InMemoryStaffingStore;
use crate::staffing::proficiency::ProficiencyLevel;
use crate::staffing::repository::{
    AssignmentDraft, AssignmentRepository, DirectoryRepository, PersonDraft, ProjectDraft,
    RepositoryError,
};
use crate::staffing::router::staffing_router;
use crate::staffing::service::StaffingService;

pub(super) type MemoryService = StaffingService<InMemoryStaffingStore, InMemoryStaffingStore>;

pub(super) fn build_service() -> (Arc<MemoryService>, Arc<InMemoryStaffingStore>) {
    let store = Arc::new(InMemoryStaffingStore::new());
    let service = Arc::new(StaffingService::new(store.clone(), store.clone()));
    (service, store)
}

pub(super) fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

/// Ids created by [`seed_agency`].
pub(super) struct Agency {
    pub(super) react: SkillId,
    pub(super) rust: SkillId,
    pub(super) xavier: PersonId,
    pub(super) yara: PersonId,
    pub(super) zane: PersonId,
    pub(super) storefront: ProjectId,
    pub(super) unconfigured: ProjectId,
}

/// Storefront requires React at Intermediate. Xavier holds React Advanced, Yara React
/// Beginner and Zane only Rust.
pub(super) fn seed_agency(service: &MemoryService) -> Agency {
    let react = skill(service, "React", "Frontend");
    let rust = skill(service, "Rust", "Backend");

    let xavier = person(
        service,
        "Xavier",
        ExperienceLevel::Senior,
        &[(react, ProficiencyLevel::Advanced)],
    );
    let yara = person(
        service,
        "Yara",
        ExperienceLevel::Junior,
        &[(react, ProficiencyLevel::Beginner)],
    );
    let zane = person(
        service,
        "Zane",
        ExperienceLevel::MidLevel,
        &[(rust, ProficiencyLevel::Expert)],
    );

    let storefront = project(
        service,
        "Storefront",
        ProjectStatus::Active,
        vec![SkillRequirement {
            skill_id: react,
            min_level: ProficiencyLevel::Intermediate,
        }],
    );
    let unconfigured = project(service, "Discovery", ProjectStatus::Planning, Vec::new());

    Agency {
        react,
        rust,
        xavier,
        yara,
        zane,
        storefront,
        unconfigured,
    }
}

pub(super) fn skill(service: &MemoryService, name: &str, category: &str) -> SkillId {
    service
        .create_skill(NewSkill {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
        })
        .expect("skill created")
        .id
}

pub(super) fn person(
    service: &MemoryService,
    name: &str,
    experience_level: ExperienceLevel,
    skills: &[(SkillId, ProficiencyLevel)],
) -> PersonId {
    let created = service
        .create_person(NewPerson {
            name: Some(name.to_string()),
            email: Some(format!("{}@agency.test", name.to_lowercase())),
            role: Some("Consultant".to_string()),
            experience_level: Some(experience_level),
        })
        .expect("person created");
    for (skill_id, level) in skills {
        service
            .assign_skill(
                created.id,
                CandidateSkill {
                    skill_id: *skill_id,
                    level: *level,
                },
            )
            .expect("skill assigned");
    }
    created.id
}

pub(super) fn project(
    service: &MemoryService,
    name: &str,
    status: ProjectStatus,
    requirements: Vec<SkillRequirement>,
) -> ProjectId {
    service
        .create_project(NewProject {
            name: Some(name.to_string()),
            status: Some(status),
            requirements,
            ..NewProject::default()
        })
        .expect("project created")
        .id
}

pub(super) fn router_with_service(service: Arc<MemoryService>) -> axum::Router {
    staffing_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose every call fails, for exercising the storage-failure path.
pub(super) struct UnavailableStore;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

impl DirectoryRepository for UnavailableStore {
    fn skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        offline()
    }

    fn skill(&self, _id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        offline()
    }

    fn insert_skill(
        &self,
        _name: String,
        _category: Option<String>,
    ) -> Result<Skill, RepositoryError> {
        offline()
    }

    fn personnel(&self) -> Result<Vec<Person>, RepositoryError> {
        offline()
    }

    fn person(&self, _id: PersonId) -> Result<Option<Person>, RepositoryError> {
        offline()
    }

    fn insert_person(&self, _draft: PersonDraft) -> Result<Person, RepositoryError> {
        offline()
    }

    fn upsert_person_skill(
        &self,
        _person: PersonId,
        _skill: CandidateSkill,
    ) -> Result<(), RepositoryError> {
        offline()
    }

    fn delete_person(&self, _id: PersonId) -> Result<(), RepositoryError> {
        offline()
    }

    fn projects(&self) -> Result<Vec<Project>, RepositoryError> {
        offline()
    }

    fn project(&self, _id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        offline()
    }

    fn insert_project(&self, _draft: ProjectDraft) -> Result<Project, RepositoryError> {
        offline()
    }

    fn replace_requirements(
        &self,
        _project: ProjectId,
        _requirements: Vec<SkillRequirement>,
    ) -> Result<(), RepositoryError> {
        offline()
    }

    fn delete_project(&self, _id: ProjectId) -> Result<(), RepositoryError> {
        offline()
    }
}

impl AssignmentRepository for UnavailableStore {
    fn insert(&self, _draft: AssignmentDraft) -> Result<Assignment, RepositoryError> {
        offline()
    }

    fn update(&self, _assignment: Assignment) -> Result<(), RepositoryError> {
        offline()
    }

    fn fetch(&self, _id: AssignmentId) -> Result<Option<Assignment>, RepositoryError> {
        offline()
    }

    fn delete(&self, _id: AssignmentId) -> Result<bool, RepositoryError> {
        offline()
    }

    fn list(&self) -> Result<Vec<Assignment>, RepositoryError> {
        offline()
    }
}
