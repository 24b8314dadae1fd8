use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::domain::{
    Assignment, AssignmentRequest, AssignmentStatus, AssignmentUpdate, AssignmentView,
};
use crate::staffing::domain::{AssignmentId, PersonId};
use crate::staffing::repository::{
    AssignmentDraft, AssignmentRepository, DirectoryRepository, RepositoryError,
};
use crate::staffing::service::StaffingError;

/// CRUD and status transitions over the assignment store.
pub struct AssignmentLedger<D, A> {
    directory: Arc<D>,
    assignments: Arc<A>,
}

impl<D, A> AssignmentLedger<D, A>
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    pub fn new(directory: Arc<D>, assignments: Arc<A>) -> Self {
        Self {
            directory,
            assignments,
        }
    }

    /// Record a new assignment with status Active.
    pub fn create(&self, request: AssignmentRequest) -> Result<Assignment, StaffingError> {
        let project_id = request
            .project_id
            .ok_or(StaffingError::MissingField("project_id"))?;
        let person_id = request
            .person_id
            .ok_or(StaffingError::MissingField("person_id"))?;
        let start_date = request
            .start_date
            .ok_or(StaffingError::MissingField("start_date"))?;
        let end_date = request
            .end_date
            .ok_or(StaffingError::MissingField("end_date"))?;

        if self.directory.project(project_id)?.is_none() {
            return Err(StaffingError::not_found("project", project_id.0));
        }
        if self.directory.person(person_id)?.is_none() {
            return Err(StaffingError::not_found("person", person_id.0));
        }

        let assignment = self.assignments.insert(AssignmentDraft {
            project_id,
            person_id,
            start_date,
            end_date,
            role: request.role,
            status: AssignmentStatus::Active,
        })?;

        info!(
            assignment_id = %assignment.id,
            %project_id,
            %person_id,
            "assignment created"
        );
        Ok(assignment)
    }

    /// Overwrite dates, role and (when given) status of an existing assignment.
    pub fn update(
        &self,
        id: AssignmentId,
        update: AssignmentUpdate,
    ) -> Result<Assignment, StaffingError> {
        let start_date = update
            .start_date
            .ok_or(StaffingError::MissingField("start_date"))?;
        let end_date = update
            .end_date
            .ok_or(StaffingError::MissingField("end_date"))?;

        let current = self
            .assignments
            .fetch(id)?
            .ok_or_else(|| StaffingError::not_found("assignment", id.0))?;

        let updated = Assignment {
            start_date,
            end_date,
            role: update.role,
            status: update.status.unwrap_or(current.status),
            ..current
        };

        match self.assignments.update(updated.clone()) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                return Err(StaffingError::not_found("assignment", id.0));
            }
            Err(other) => return Err(other.into()),
        }

        info!(assignment_id = %id, status = updated.status.label(), "assignment updated");
        Ok(updated)
    }

    /// Flip Active and Completed, leaving every other field untouched.
    pub fn toggle_status(&self, id: AssignmentId) -> Result<Assignment, StaffingError> {
        let current = self
            .assignments
            .fetch(id)?
            .ok_or_else(|| StaffingError::not_found("assignment", id.0))?;

        let mut update = AssignmentUpdate::from_assignment(&current);
        update.status = Some(current.status.toggled());
        self.update(id, update)
    }

    /// Absence after the call is success, whether or not the row existed.
    pub fn delete(&self, id: AssignmentId) -> Result<(), StaffingError> {
        let removed = self.assignments.delete(id)?;
        info!(assignment_id = %id, removed, "assignment deleted");
        Ok(())
    }

    /// Assignments ordered by start date, enriched with project and person names.
    pub fn list(&self) -> Result<Vec<AssignmentView>, StaffingError> {
        let project_names: HashMap<_, _> = self
            .directory
            .projects()?
            .into_iter()
            .map(|project| (project.id, project.name))
            .collect();
        let person_names: HashMap<_, _> = self
            .directory
            .personnel()?
            .into_iter()
            .map(|person| (person.id, person.name))
            .collect();

        let mut rows: Vec<AssignmentView> = self
            .assignments
            .list()?
            .into_iter()
            .filter_map(|assignment| {
                let project_name = project_names.get(&assignment.project_id)?.clone();
                let person_name = person_names.get(&assignment.person_id)?.clone();
                Some(AssignmentView {
                    id: assignment.id,
                    project_id: assignment.project_id,
                    project_name,
                    person_id: assignment.person_id,
                    person_name,
                    start_date: assignment.start_date,
                    end_date: assignment.end_date,
                    role: assignment.role,
                    status: assignment.status,
                })
            })
            .collect();

        rows.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    /// Number of Active assignments per person.
    pub fn active_counts(&self) -> Result<HashMap<PersonId, usize>, StaffingError> {
        let mut counts = HashMap::new();
        for assignment in self.assignments.list()? {
            if assignment.status == AssignmentStatus::Active {
                *counts.entry(assignment.person_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
