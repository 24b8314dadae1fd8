use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::assignments::Assignment;
use super::domain::{
    AssignmentId, CandidateSkill, Person, PersonId, Project, ProjectId, Skill, SkillId,
    SkillRequirement,
};
use super::repository::{
    AssignmentDraft, AssignmentRepository, DirectoryRepository, PersonDraft, ProjectDraft,
    RepositoryError,
};

/// Process-local store backing both repositories with one lock.
///
/// Every write runs under the same guard, so multi-row writes validate first and then apply
/// as a unit. Tables are keyed by id in `BTreeMap`s, which keeps listing order stable.
#[derive(Debug, Default)]
pub struct InMemoryStaffingStore {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: u64,
    skills: BTreeMap<SkillId, Skill>,
    personnel: BTreeMap<PersonId, Person>,
    projects: BTreeMap<ProjectId, Project>,
    assignments: BTreeMap<AssignmentId, Assignment>,
}

impl Tables {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_skills<'a, I>(&self, requirements: I) -> Result<(), RepositoryError>
    where
        I: IntoIterator<Item = &'a SkillRequirement>,
    {
        for requirement in requirements {
            if !self.skills.contains_key(&requirement.skill_id) {
                return Err(RepositoryError::MissingReference {
                    entity: "skill",
                    id: requirement.skill_id.0,
                });
            }
        }
        Ok(())
    }
}

impl InMemoryStaffingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

impl DirectoryRepository for InMemoryStaffingStore {
    fn skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let tables = self.tables()?;
        let mut skills: Vec<Skill> = tables.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    fn skill(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        Ok(self.tables()?.skills.get(&id).cloned())
    }

    fn insert_skill(
        &self,
        name: String,
        category: Option<String>,
    ) -> Result<Skill, RepositoryError> {
        let mut tables = self.tables()?;
        if tables
            .skills
            .values()
            .any(|skill| skill.name.eq_ignore_ascii_case(&name))
        {
            return Err(RepositoryError::Conflict);
        }
        let id = SkillId(tables.allocate());
        let skill = Skill { id, name, category };
        tables.skills.insert(id, skill.clone());
        Ok(skill)
    }

    fn personnel(&self) -> Result<Vec<Person>, RepositoryError> {
        Ok(self.tables()?.personnel.values().cloned().collect())
    }

    fn person(&self, id: PersonId) -> Result<Option<Person>, RepositoryError> {
        Ok(self.tables()?.personnel.get(&id).cloned())
    }

    fn insert_person(&self, draft: PersonDraft) -> Result<Person, RepositoryError> {
        let mut tables = self.tables()?;
        let id = PersonId(tables.allocate());
        let person = Person {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            experience_level: draft.experience_level,
            skills: Vec::new(),
        };
        tables.personnel.insert(id, person.clone());
        Ok(person)
    }

    fn upsert_person_skill(
        &self,
        person: PersonId,
        skill: CandidateSkill,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if !tables.skills.contains_key(&skill.skill_id) {
            return Err(RepositoryError::MissingReference {
                entity: "skill",
                id: skill.skill_id.0,
            });
        }
        let record = tables
            .personnel
            .get_mut(&person)
            .ok_or(RepositoryError::NotFound)?;
        record.upsert_skill(skill.skill_id, skill.level);
        Ok(())
    }

    fn delete_person(&self, id: PersonId) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if tables.personnel.remove(&id).is_some() {
            tables
                .assignments
                .retain(|_, assignment| assignment.person_id != id);
        }
        Ok(())
    }

    fn projects(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.tables()?.projects.values().cloned().collect())
    }

    fn project(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(self.tables()?.projects.get(&id).cloned())
    }

    fn insert_project(&self, draft: ProjectDraft) -> Result<Project, RepositoryError> {
        let mut tables = self.tables()?;
        tables.check_skills(&draft.requirements)?;

        let id = ProjectId(tables.allocate());
        let project = Project {
            id,
            name: draft.name,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            requirements: draft.requirements,
        };
        tables.projects.insert(id, project.clone());
        Ok(project)
    }

    fn replace_requirements(
        &self,
        project: ProjectId,
        requirements: Vec<SkillRequirement>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        tables.check_skills(&requirements)?;
        let record = tables
            .projects
            .get_mut(&project)
            .ok_or(RepositoryError::NotFound)?;
        record.requirements = requirements;
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if tables.projects.remove(&id).is_some() {
            tables
                .assignments
                .retain(|_, assignment| assignment.project_id != id);
        }
        Ok(())
    }
}

impl AssignmentRepository for InMemoryStaffingStore {
    fn insert(&self, draft: AssignmentDraft) -> Result<Assignment, RepositoryError> {
        let mut tables = self.tables()?;
        if !tables.projects.contains_key(&draft.project_id) {
            return Err(RepositoryError::MissingReference {
                entity: "project",
                id: draft.project_id.0,
            });
        }
        if !tables.personnel.contains_key(&draft.person_id) {
            return Err(RepositoryError::MissingReference {
                entity: "person",
                id: draft.person_id.0,
            });
        }

        let id = AssignmentId(tables.allocate());
        let assignment = Assignment {
            id,
            project_id: draft.project_id,
            person_id: draft.person_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            role: draft.role,
            status: draft.status,
        };
        tables.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }

    fn update(&self, assignment: Assignment) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.assignments.get_mut(&assignment.id) {
            Some(existing) => {
                *existing = assignment;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: AssignmentId) -> Result<Option<Assignment>, RepositoryError> {
        Ok(self.tables()?.assignments.get(&id).cloned())
    }

    fn delete(&self, id: AssignmentId) -> Result<bool, RepositoryError> {
        Ok(self.tables()?.assignments.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<Assignment>, RepositoryError> {
        Ok(self.tables()?.assignments.values().cloned().collect())
    }
}
