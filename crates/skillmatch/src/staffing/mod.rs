//! Personnel-to-project matching, assignment scheduling, and the record-store contracts
//! they run against.

pub mod analytics;
pub mod assignments;
pub mod domain;
pub mod matching;
pub mod memory;
pub mod proficiency;
pub mod repository;
pub mod roster;
pub mod router;
pub mod search;
pub mod service;
mod text;

#[cfg(test)]
mod tests;

pub use analytics::{AnalyticsQuery, DashboardAnalytics, PopulationFilter};
pub use assignments::{
    Assignment, AssignmentLedger, AssignmentRequest, AssignmentStatus, AssignmentUpdate,
    AssignmentView,
};
pub use domain::{
    AssignmentId, CandidateSkill, ExperienceLevel, NewPerson, NewProject, NewSkill, Person,
    PersonId, Project, ProjectId, ProjectStatus, Skill, SkillId, SkillRequirement,
};
pub use matching::{CandidateProfile, MatchEngine, MatchResult, RequirementSet};
pub use memory::InMemoryStaffingStore;
pub use proficiency::{InvalidLevel, ProficiencyLevel};
pub use repository::{AssignmentRepository, DirectoryRepository, RepositoryError};
pub use roster::{Roster, RosterImportError, RosterImporter, RosterSummary};
pub use router::staffing_router;
pub use search::{PersonnelSearch, SearchHit, SearchQuery};
pub use service::{StaffingError, StaffingService};
