//! Issue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/projects/{project_id}/issues
//! POST   /api/v1/projects/{project_id}/issues
//! GET    /api/v1/projects/{project_id}/issues/{issue_id}
//! PUT    /api/v1/projects/{project_id}/issues/{issue_id}
//! DELETE /api/v1/projects/{project_id}/issues/{issue_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Issue, IssueStatus};
use crate::domain::ports::{CreateIssueRequest, IssuePath, UpdateIssueRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    missing_field_error, parse_issue_id, parse_priority, parse_project_id, parse_status,
    parse_tag, parse_user_id,
};

/// Request payload for filing an issue.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueBody {
    /// Short human-readable title.
    pub title: Option<String>,
    /// Optional longer description.
    pub description: Option<String>,
    /// Work classification: `bug`, `improvement`, or `task`.
    pub tag: Option<String>,
    /// Urgency: `low`, `medium`, or `high`.
    pub priority: Option<String>,
    /// Workflow state; defaults to `to_do`.
    pub status: Option<String>,
    /// Initial assignee; defaults to the requesting principal.
    pub assignee_id: Option<String>,
}

/// Request payload for updating an issue; absent fields keep their value.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueBody {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement classification.
    pub tag: Option<String>,
    /// Replacement urgency.
    pub priority: Option<String>,
    /// Replacement workflow state.
    pub status: Option<String>,
    /// Replacement assignee.
    pub assignee_id: Option<String>,
}

/// Wire representation of an issue.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// Stable identifier.
    pub id: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description; empty string when absent.
    pub description: String,
    /// Work classification.
    pub tag: String,
    /// Urgency.
    pub priority: String,
    /// Workflow state.
    pub status: String,
    /// Creating principal.
    pub author_id: String,
    /// Currently assigned user.
    pub assignee_id: String,
    /// Owning project.
    pub project_id: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<Issue> for IssueResponse {
    fn from(value: Issue) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            tag: value.tag.to_string(),
            priority: value.priority.to_string(),
            status: value.status.to_string(),
            author_id: value.author_id.to_string(),
            assignee_id: value.assignee_id.to_string(),
            project_id: value.project_id.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn parse_issue_path(project_id: &str, issue_id: &str) -> Result<IssuePath, crate::domain::Error> {
    Ok(IssuePath {
        project_id: parse_project_id(project_id)?,
        issue_id: parse_issue_id(issue_id)?,
    })
}

fn parse_create_body(body: CreateIssueBody) -> Result<CreateIssueRequest, crate::domain::Error> {
    Ok(CreateIssueRequest {
        title: body.title.ok_or_else(|| missing_field_error("title"))?,
        description: body.description.unwrap_or_default(),
        tag: parse_tag(&body.tag.ok_or_else(|| missing_field_error("tag"))?)?,
        priority: parse_priority(
            &body
                .priority
                .ok_or_else(|| missing_field_error("priority"))?,
        )?,
        status: body
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or(IssueStatus::ToDo),
        assignee_id: body
            .assignee_id
            .as_deref()
            .map(parse_user_id)
            .transpose()?,
    })
}

fn parse_update_body(body: UpdateIssueBody) -> Result<UpdateIssueRequest, crate::domain::Error> {
    Ok(UpdateIssueRequest {
        title: body.title,
        description: body.description,
        tag: body.tag.as_deref().map(parse_tag).transpose()?,
        priority: body.priority.as_deref().map(parse_priority).transpose()?,
        status: body.status.as_deref().map(parse_status).transpose()?,
        assignee_id: body
            .assignee_id
            .as_deref()
            .map(parse_user_id)
            .transpose()?,
    })
}

/// List the issues of a project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/issues",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Issues of the project", body = [IssueResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not visible", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "listIssues"
)]
#[get("/projects/{project_id}/issues")]
pub async fn list_issues(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<IssueResponse>>> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let issues = state
        .issues_query
        .list_issues(&principal, &project_id)
        .await?;
    Ok(web::Json(
        issues.into_iter().map(IssueResponse::from).collect(),
    ))
}

/// File an issue against a project. Contributors only.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/issues",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = CreateIssueBody,
    responses(
        (status = 201, description = "Issue filed", body = IssueResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a contributor", body = ErrorSchema),
        (status = 404, description = "Project or assignee not found", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "createIssue"
)]
#[post("/projects/{project_id}/issues")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateIssueBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let request = parse_create_body(payload.into_inner())?;

    let issue = state
        .issues
        .create_issue(&principal, &project_id, request)
        .await?;
    Ok(HttpResponse::Created().json(IssueResponse::from(issue)))
}

/// Fetch one issue after validating the path chain.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier")
    ),
    responses(
        (status = 200, description = "The issue", body = IssueResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (
            status = 404,
            description = "Not found, not visible, or a mismatched path chain",
            body = ErrorSchema
        )
    ),
    tags = ["issues"],
    operation_id = "getIssue"
)]
#[get("/projects/{project_id}/issues/{issue_id}")]
pub async fn get_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<IssueResponse>> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id) = path.into_inner();
    let issue_path = parse_issue_path(&raw_project_id, &raw_issue_id)?;
    let issue = state.issues_query.fetch_issue(&principal, &issue_path).await?;
    Ok(web::Json(IssueResponse::from(issue)))
}

/// Update an issue. The issue's author only.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier")
    ),
    request_body = UpdateIssueBody,
    responses(
        (status = 200, description = "Updated issue", body = IssueResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the issue author", body = ErrorSchema),
        (status = 404, description = "Not found or a mismatched path chain", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "updateIssue"
)]
#[put("/projects/{project_id}/issues/{issue_id}")]
pub async fn update_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateIssueBody>,
) -> ApiResult<web::Json<IssueResponse>> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id) = path.into_inner();
    let issue_path = parse_issue_path(&raw_project_id, &raw_issue_id)?;
    let request = parse_update_body(payload.into_inner())?;

    let issue = state
        .issues
        .update_issue(&principal, &issue_path, request)
        .await?;
    Ok(web::Json(IssueResponse::from(issue)))
}

/// Delete an issue and its comments. The issue's author only.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier")
    ),
    responses(
        (status = 204, description = "Issue deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the issue author", body = ErrorSchema),
        (status = 404, description = "Not found or a mismatched path chain", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "deleteIssue"
)]
#[delete("/projects/{project_id}/issues/{issue_id}")]
pub async fn delete_issue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id) = path.into_inner();
    let issue_path = parse_issue_path(&raw_project_id, &raw_issue_id)?;
    state.issues.delete_issue(&principal, &issue_path).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::Utc;
    use serde_json::{Value, json};

    use crate::domain::ports::MockIssueCommand;
    use crate::domain::{Error, IssueFields, IssueId, ProjectId, UserId};
    use crate::inbound::http::test_utils::{empty_state, test_session_middleware};

    use super::*;

    const PRINCIPAL: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn call_with_session(
        state: HttpState,
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route(
                    "/session",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new(PRINCIPAL).expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(actix_web::HttpResponse::Ok())
                    }),
                )
                .service(list_issues)
                .service(create_issue)
                .service(get_issue)
                .service(update_issue)
                .service(delete_issue),
        )
        .await;

        let login = test::call_service(&app, test::TestRequest::get().uri("/session").to_request())
            .await;
        let cookie = login
            .response()
            .cookies()
            .next()
            .expect("session cookie issued")
            .into_owned();

        test::call_service(&app, request.cookie(cookie).to_request()).await
    }

    #[actix_web::test]
    async fn filing_an_issue_returns_201_and_defaults_the_status() {
        let project_id = ProjectId::random();
        let mut commands = MockIssueCommand::new();
        commands
            .expect_create_issue()
            .withf(|_, _, request: &CreateIssueRequest| {
                request.status == IssueStatus::ToDo && request.assignee_id.is_none()
            })
            .return_once(move |principal, project_id, request| {
                Ok(Issue::try_new(
                    IssueId::random(),
                    IssueFields {
                        title: request.title,
                        description: request.description,
                        tag: request.tag,
                        priority: request.priority,
                        status: request.status,
                    },
                    *principal,
                    request.assignee_id,
                    *project_id,
                    Utc::now(),
                )
                .expect("valid issue"))
            });
        let mut state = empty_state();
        state.issues = Arc::new(commands);

        let response = call_with_session(
            state,
            test::TestRequest::post()
                .uri(&format!("/projects/{project_id}/issues"))
                .set_json(json!({ "title": "Bug1", "tag": "bug", "priority": "high" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["status"], "to_do");
        assert_eq!(body["assigneeId"], PRINCIPAL);
    }

    #[actix_web::test]
    async fn an_unknown_tag_is_a_bad_request() {
        let project_id = ProjectId::random();
        let response = call_with_session(
            empty_state(),
            test::TestRequest::post()
                .uri(&format!("/projects/{project_id}/issues"))
                .set_json(json!({ "title": "Bug1", "tag": "defect", "priority": "high" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "tag");
    }

    #[actix_web::test]
    async fn structural_mismatches_map_to_404() {
        let project_id = ProjectId::random();
        let issue_id = IssueId::random();
        let mut commands = MockIssueCommand::new();
        commands.expect_delete_issue().return_once(|_, _| {
            Err(Error::structural_mismatch(
                "issue does not belong to the named project",
            ))
        });
        let mut state = empty_state();
        state.issues = Arc::new(commands);

        let response = call_with_session(
            state,
            test::TestRequest::delete()
                .uri(&format!("/projects/{project_id}/issues/{issue_id}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "structural_mismatch");
    }
}
