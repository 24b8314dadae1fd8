use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{AssignmentId, PersonId, ProjectId};

/// Lifecycle of an assignment. Both transitions are always allowed and always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssignmentStatus {
    #[default]
    Active,
    Completed,
}

impl AssignmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentStatus::Active => "Active",
            AssignmentStatus::Completed => "Completed",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            AssignmentStatus::Active => AssignmentStatus::Completed,
            AssignmentStatus::Completed => AssignmentStatus::Active,
        }
    }
}

/// A person allocated to a project for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub project_id: ProjectId,
    pub person_id: PersonId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: Option<String>,
    pub status: AssignmentStatus,
}

/// Creation payload. Every field except `role` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub person_id: Option<PersonId>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Full overwrite of the mutable fields. A missing `status` keeps the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<AssignmentStatus>,
}

impl AssignmentUpdate {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            start_date: Some(assignment.start_date),
            end_date: Some(assignment.end_date),
            role: assignment.role.clone(),
            status: Some(assignment.status),
        }
    }
}

/// Scheduling-view row with project and person names joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentView {
    pub id: AssignmentId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub person_id: PersonId,
    pub person_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: Option<String>,
    pub status: AssignmentStatus,
}
