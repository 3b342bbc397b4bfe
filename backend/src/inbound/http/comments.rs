//! Comment HTTP handlers.
//!
//! ```text
//! GET    /api/v1/projects/{project_id}/issues/{issue_id}/comments
//! POST   /api/v1/projects/{project_id}/issues/{issue_id}/comments
//! GET    /api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}
//! PUT    /api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}
//! DELETE /api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Comment;
use crate::domain::ports::{
    CommentPath, CreateCommentRequest, IssuePath, UpdateCommentRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    missing_field_error, parse_comment_id, parse_issue_id, parse_project_id,
};

/// Request payload for posting or editing a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    /// Comment body text.
    pub description: Option<String>,
}

/// Wire representation of a comment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Stable identifier.
    pub id: String,
    /// Comment body text.
    pub description: String,
    /// Creating principal.
    pub author_id: String,
    /// Owning issue.
    pub issue_id: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id.to_string(),
            description: value.description,
            author_id: value.author_id.to_string(),
            issue_id: value.issue_id.to_string(),
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

fn parse_comment_path(
    project_id: &str,
    issue_id: &str,
    comment_id: &str,
) -> Result<CommentPath, crate::domain::Error> {
    let issue_path = parse_issue_path(project_id, issue_id)?;
    Ok(CommentPath {
        project_id: issue_path.project_id,
        issue_id: issue_path.issue_id,
        comment_id: parse_comment_id(comment_id)?,
    })
}

fn require_description(body: CommentBody) -> Result<String, crate::domain::Error> {
    body.description
        .ok_or_else(|| missing_field_error("description"))
}

/// List the comments on an issue.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}/comments",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier")
    ),
    responses(
        (status = 200, description = "Comments on the issue", body = [CommentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (
            status = 404,
            description = "Not found, not visible, or a mismatched path chain",
            body = ErrorSchema
        )
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/projects/{project_id}/issues/{issue_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id) = path.into_inner();
    let issue_path = parse_issue_path(&raw_project_id, &raw_issue_id)?;
    let comments = state
        .comments_query
        .list_comments(&principal, &issue_path)
        .await?;
    Ok(web::Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// Post a comment on an issue. Contributors only.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}/comments",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier")
    ),
    request_body = CommentBody,
    responses(
        (status = 201, description = "Comment posted", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a contributor", body = ErrorSchema),
        (status = 404, description = "Not found or a mismatched path chain", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/projects/{project_id}/issues/{issue_id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<CommentBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id) = path.into_inner();
    let issue_path = parse_issue_path(&raw_project_id, &raw_issue_id)?;
    let description = require_description(payload.into_inner())?;

    let comment = state
        .comments
        .create_comment(&principal, &issue_path, CreateCommentRequest { description })
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// Fetch one comment after validating the full path chain.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "The comment", body = CommentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (
            status = 404,
            description = "Not found, not visible, or a mismatched path chain",
            body = ErrorSchema
        )
    ),
    tags = ["comments"],
    operation_id = "getComment"
)]
#[get("/projects/{project_id}/issues/{issue_id}/comments/{comment_id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String, String)>,
) -> ApiResult<web::Json<CommentResponse>> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id, raw_comment_id) = path.into_inner();
    let comment_path = parse_comment_path(&raw_project_id, &raw_issue_id, &raw_comment_id)?;
    let comment = state
        .comments_query
        .fetch_comment(&principal, &comment_path)
        .await?;
    Ok(web::Json(CommentResponse::from(comment)))
}

/// Edit a comment body. The comment's author only.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    request_body = CommentBody,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the comment author", body = ErrorSchema),
        (status = 404, description = "Not found or a mismatched path chain", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[put("/projects/{project_id}/issues/{issue_id}/comments/{comment_id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String, String)>,
    payload: web::Json<CommentBody>,
) -> ApiResult<web::Json<CommentResponse>> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id, raw_comment_id) = path.into_inner();
    let comment_path = parse_comment_path(&raw_project_id, &raw_issue_id, &raw_comment_id)?;
    let description = require_description(payload.into_inner())?;

    let comment = state
        .comments
        .update_comment(
            &principal,
            &comment_path,
            UpdateCommentRequest { description },
        )
        .await?;
    Ok(web::Json(CommentResponse::from(comment)))
}

/// Delete a comment. The comment's author only.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("issue_id" = String, Path, description = "Issue identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the comment author", body = ErrorSchema),
        (status = 404, description = "Not found or a mismatched path chain", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/projects/{project_id}/issues/{issue_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String, String)>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_issue_id, raw_comment_id) = path.into_inner();
    let comment_path = parse_comment_path(&raw_project_id, &raw_issue_id, &raw_comment_id)?;
    state
        .comments
        .delete_comment(&principal, &comment_path)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
