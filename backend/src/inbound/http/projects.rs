//! Project HTTP handlers.
//!
//! ```text
//! GET    /api/v1/projects
//! POST   /api/v1/projects
//! GET    /api/v1/projects/{project_id}
//! PUT    /api/v1/projects/{project_id}
//! DELETE /api/v1/projects/{project_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Project;
use crate::domain::ports::{CreateProjectRequest, UpdateProjectRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_project_id};

/// Request payload for creating a project.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    /// Short human-readable title.
    pub title: Option<String>,
    /// Optional longer description.
    pub description: Option<String>,
    /// Free-form classification tag, e.g. `back-end` or `iOS`.
    pub project_type: Option<String>,
}

/// Request payload for updating a project; absent fields keep their value.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectBody {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement classification tag.
    pub project_type: Option<String>,
}

/// Wire representation of a project.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Stable identifier.
    pub id: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description; empty string when absent.
    pub description: String,
    /// Free-form classification tag.
    pub project_type: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(value: Project) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            project_type: value.project_type,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List the projects the authenticated user contributes to.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Projects visible to the principal", body = [ProjectResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let principal = session.require_user_id()?;
    let projects = state.projects_query.list_projects(&principal).await?;
    Ok(web::Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Create a project; the principal becomes its author contributor.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let body = payload.into_inner();
    let request = CreateProjectRequest {
        title: body.title.ok_or_else(|| missing_field_error("title"))?,
        description: body.description.unwrap_or_default(),
        project_type: body
            .project_type
            .ok_or_else(|| missing_field_error("projectType"))?,
    };

    let project = state.projects.create_project(&principal, request).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// Fetch one project from the principal's visible set.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "The project", body = ProjectResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not visible", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{project_id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let project = state
        .projects_query
        .fetch_project(&principal, &project_id)
        .await?;
    Ok(web::Json(ProjectResponse::from(project)))
}

/// Update a project's descriptive fields. Author contributors only.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = UpdateProjectBody,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the project author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{project_id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectBody>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let body = payload.into_inner();
    let request = UpdateProjectRequest {
        title: body.title,
        description: body.description,
        project_type: body.project_type,
    };

    let project = state
        .projects
        .update_project(&principal, &project_id, request)
        .await?;
    Ok(web::Json(ProjectResponse::from(project)))
}

/// Delete a project and everything it owns. Author contributors only.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the project author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{project_id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    state
        .projects
        .delete_project(&principal, &project_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
