use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::analytics::AnalyticsQuery;
use super::assignments::{AssignmentRequest, AssignmentUpdate};
use super::domain::{
    AssignmentId, CandidateSkill, NewPerson, NewProject, NewSkill, PersonId, ProjectId,
    SkillRequirement,
};
use super::repository::{AssignmentRepository, DirectoryRepository, RepositoryError};
use super::search::{PersonnelSearch, SearchQuery};
use super::service::{StaffingError, StaffingService};

type SharedService<D, A> = Arc<StaffingService<D, A>>;

/// Router builder exposing matching, scheduling, search and directory endpoints.
pub fn staffing_router<D, A>(service: SharedService<D, A>) -> Router
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    Router::new()
        .route("/api/match/:project_id", get(match_handler::<D, A>))
        .route(
            "/api/assignments",
            get(list_assignments_handler::<D, A>).post(create_assignment_handler::<D, A>),
        )
        .route(
            "/api/assignments/:assignment_id",
            put(update_assignment_handler::<D, A>).delete(delete_assignment_handler::<D, A>),
        )
        .route(
            "/api/assignments/:assignment_id/toggle",
            post(toggle_assignment_handler::<D, A>),
        )
        .route("/api/search", get(search_handler::<D, A>))
        .route("/api/analytics", get(analytics_handler::<D, A>))
        .route(
            "/api/skills",
            get(list_skills_handler::<D, A>).post(create_skill_handler::<D, A>),
        )
        .route(
            "/api/personnel",
            get(list_personnel_handler::<D, A>).post(create_person_handler::<D, A>),
        )
        .route(
            "/api/personnel/:person_id",
            delete(delete_person_handler::<D, A>),
        )
        .route(
            "/api/personnel/:person_id/skills",
            post(assign_skill_handler::<D, A>),
        )
        .route(
            "/api/projects",
            get(list_projects_handler::<D, A>).post(create_project_handler::<D, A>),
        )
        .route(
            "/api/projects/:project_id",
            delete(delete_project_handler::<D, A>),
        )
        .route(
            "/api/projects/:project_id/requirements",
            put(replace_requirements_handler::<D, A>),
        )
        .with_state(service)
}

/// Translate a service error into a status code and `{"error": ...}` body.
pub(crate) fn error_response(err: StaffingError) -> Response {
    let status = match &err {
        StaffingError::MissingField(_) => StatusCode::BAD_REQUEST,
        StaffingError::InvalidLevel(_) | StaffingError::InvalidExperience(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StaffingError::NotFound { .. } => StatusCode::NOT_FOUND,
        StaffingError::Storage(RepositoryError::Conflict) => StatusCode::CONFLICT,
        StaffingError::Storage(_) => {
            error!(error = %err, "staffing storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

/// Body extraction failures use the same `{"error": ...}` shape. Unreadable JSON is a 400;
/// well-formed JSON carrying an unknown label or wrong type is a 422.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), Json(payload)).into_response()
}

fn accept<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload.map(|Json(body)| body).map_err(rejection_response)
}

fn message_response(message: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": message }))).into_response()
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, StaffingError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn match_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(project_id): Path<u64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(StatusCode::OK, service.match_project(ProjectId(project_id)))
}

pub(crate) async fn list_assignments_handler<D, A>(
    State(service): State<SharedService<D, A>>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(StatusCode::OK, service.ledger().list())
}

pub(crate) async fn create_assignment_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let request = match accept(payload) {
        Ok(request) => request,
        Err(rejected) => return rejected,
    };
    respond(StatusCode::CREATED, service.ledger().create(request))
}

pub(crate) async fn update_assignment_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(assignment_id): Path<u64>,
    payload: Result<Json<AssignmentUpdate>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let update = match accept(payload) {
        Ok(update) => update,
        Err(rejected) => return rejected,
    };
    respond(
        StatusCode::OK,
        service
            .ledger()
            .update(AssignmentId(assignment_id), update),
    )
}

pub(crate) async fn toggle_assignment_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(assignment_id): Path<u64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.ledger().toggle_status(AssignmentId(assignment_id)),
    )
}

pub(crate) async fn delete_assignment_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(assignment_id): Path<u64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    match service.ledger().delete(AssignmentId(assignment_id)) {
        Ok(()) => message_response("assignment deleted"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Query(query): Query<SearchQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let result = PersonnelSearch::try_from(query).and_then(|search| service.search(&search));
    respond(StatusCode::OK, result)
}

pub(crate) async fn analytics_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Query(query): Query<AnalyticsQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(StatusCode::OK, service.analytics(&query))
}

pub(crate) async fn list_skills_handler<D, A>(
    State(service): State<SharedService<D, A>>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(StatusCode::OK, service.skills())
}

pub(crate) async fn create_skill_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    payload: Result<Json<NewSkill>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let skill = match accept(payload) {
        Ok(skill) => skill,
        Err(rejected) => return rejected,
    };
    respond(StatusCode::CREATED, service.create_skill(skill))
}

pub(crate) async fn list_personnel_handler<D, A>(
    State(service): State<SharedService<D, A>>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(StatusCode::OK, service.personnel())
}

pub(crate) async fn create_person_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let person = match accept(payload) {
        Ok(person) => person,
        Err(rejected) => return rejected,
    };
    respond(StatusCode::CREATED, service.create_person(person))
}

pub(crate) async fn delete_person_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(person_id): Path<u64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    match service.delete_person(PersonId(person_id)) {
        Ok(()) => message_response("person deleted"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn assign_skill_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(person_id): Path<u64>,
    payload: Result<Json<CandidateSkill>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let skill = match accept(payload) {
        Ok(skill) => skill,
        Err(rejected) => return rejected,
    };
    match service.assign_skill(PersonId(person_id), skill) {
        Ok(()) => message_response("skill assigned"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_projects_handler<D, A>(
    State(service): State<SharedService<D, A>>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    respond(StatusCode::OK, service.projects())
}

pub(crate) async fn create_project_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let project = match accept(payload) {
        Ok(project) => project,
        Err(rejected) => return rejected,
    };
    respond(StatusCode::CREATED, service.create_project(project))
}

pub(crate) async fn replace_requirements_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(project_id): Path<u64>,
    payload: Result<Json<Vec<SkillRequirement>>, JsonRejection>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let requirements = match accept(payload) {
        Ok(requirements) => requirements,
        Err(rejected) => return rejected,
    };
    respond(
        StatusCode::OK,
        service.replace_requirements(ProjectId(project_id), requirements),
    )
}

pub(crate) async fn delete_project_handler<D, A>(
    State(service): State<SharedService<D, A>>,
    Path(project_id): Path<u64>,
) -> Response
where
    D: DirectoryRepository + 'static,
    A: AssignmentRepository + 'static,
{
    match service.delete_project(ProjectId(project_id)) {
        Ok(()) => message_response("project deleted"),
        Err(err) => error_response(err),
    }
}
