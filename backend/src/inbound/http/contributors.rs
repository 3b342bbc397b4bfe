//! Contributor HTTP handlers.
//!
//! ```text
//! GET    /api/v1/projects/{project_id}/contributors
//! POST   /api/v1/projects/{project_id}/contributors
//! DELETE /api/v1/projects/{project_id}/contributors/{user_id}
//! ```
//!
//! There is no update endpoint: roles are never reassigned after a
//! contributor is attached.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Contributor;
use crate::domain::ports::{AddContributorRequest, ProjectMember};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{
    missing_field_error, parse_project_id, parse_role, parse_user_id,
};

/// Request payload for attaching a user to a project.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddContributorBody {
    /// Identifier of the user to attach.
    pub user_id: Option<String>,
    /// Requested role: `manager` or `creator`; `author` is always rejected.
    pub role: Option<String>,
}

/// Wire representation of a project member.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMemberResponse {
    /// The contributing user.
    pub user: UserResponse,
    /// Role held on the project.
    pub role: String,
}

impl From<ProjectMember> for ProjectMemberResponse {
    fn from(value: ProjectMember) -> Self {
        Self {
            user: UserResponse::from(value.user),
            role: value.role.to_string(),
        }
    }
}

/// Wire representation of a stored contributor record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributorResponse {
    /// The contributing user.
    pub user_id: String,
    /// The project contributed to.
    pub project_id: String,
    /// Role held on the project.
    pub role: String,
    /// When the contributor was attached, RFC 3339.
    pub created_at: String,
}

impl From<Contributor> for ContributorResponse {
    fn from(value: Contributor) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            project_id: value.project_id.to_string(),
            role: value.role.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List the members of a project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/contributors",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project members", body = [ProjectMemberResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not visible", body = ErrorSchema)
    ),
    tags = ["contributors"],
    operation_id = "listContributors"
)]
#[get("/projects/{project_id}/contributors")]
pub async fn list_contributors(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ProjectMemberResponse>>> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let members = state
        .contributors_query
        .list_contributors(&principal, &project_id)
        .await?;
    Ok(web::Json(
        members.into_iter().map(ProjectMemberResponse::from).collect(),
    ))
}

/// Attach a user to a project with a non-author role.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/contributors",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = AddContributorBody,
    responses(
        (status = 201, description = "Contributor attached", body = ContributorResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (
            status = 403,
            description = "Not a contributor, duplicate contributor, or reserved role",
            body = ErrorSchema
        ),
        (status = 404, description = "Project or user not found", body = ErrorSchema)
    ),
    tags = ["contributors"],
    operation_id = "addContributor"
)]
#[post("/projects/{project_id}/contributors")]
pub async fn add_contributor(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddContributorBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let body = payload.into_inner();
    let user_id = parse_user_id(&body.user_id.ok_or_else(|| missing_field_error("userId"))?)?;
    let role = parse_role(&body.role.ok_or_else(|| missing_field_error("role"))?)?;

    let contributor = state
        .contributors
        .add_contributor(&principal, &project_id, AddContributorRequest { user_id, role })
        .await?;
    Ok(HttpResponse::Created().json(ContributorResponse::from(contributor)))
}

/// Detach a user from a project. Author contributors only.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/contributors/{user_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("user_id" = String, Path, description = "User to detach")
    ),
    responses(
        (status = 204, description = "Contributor detached"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (
            status = 403,
            description = "Not the project author, or the target is the author contributor",
            body = ErrorSchema
        ),
        (status = 404, description = "Project or contributor not found", body = ErrorSchema)
    ),
    tags = ["contributors"],
    operation_id = "removeContributor"
)]
#[delete("/projects/{project_id}/contributors/{user_id}")]
pub async fn remove_contributor(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let (raw_project_id, raw_user_id) = path.into_inner();
    let project_id = parse_project_id(&raw_project_id)?;
    let user_id = parse_user_id(&raw_user_id)?;

    state
        .contributors
        .remove_contributor(&principal, &project_id, &user_id)
        .await?;
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

    use crate::domain::ports::MockContributorCommand;
    use crate::domain::{ContributorRole, Error, ProjectId, UserId};
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
                .service(list_contributors)
                .service(add_contributor)
                .service(remove_contributor),
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
    async fn attaching_a_contributor_returns_201() {
        let project_id = ProjectId::random();
        let target = UserId::random();
        let mut commands = MockContributorCommand::new();
        commands
            .expect_add_contributor()
            .withf(move |_, _, request: &AddContributorRequest| {
                request.user_id == target && request.role == ContributorRole::Manager
            })
            .return_once(move |_, project_id, request| {
                Ok(Contributor::new(
                    request.user_id,
                    *project_id,
                    request.role,
                    Utc::now(),
                ))
            });
        let mut state = empty_state();
        state.contributors = Arc::new(commands);

        let response = call_with_session(
            state,
            test::TestRequest::post()
                .uri(&format!("/projects/{project_id}/contributors"))
                .set_json(json!({ "userId": target.to_string(), "role": "manager" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["role"], "manager");
    }

    #[actix_web::test]
    async fn an_unknown_role_is_a_bad_request() {
        let project_id = ProjectId::random();
        let response = call_with_session(
            empty_state(),
            test::TestRequest::post()
                .uri(&format!("/projects/{project_id}/contributors"))
                .set_json(json!({ "userId": UserId::random().to_string(), "role": "owner" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "role");
    }

    #[actix_web::test]
    async fn reserved_role_rejections_map_to_403() {
        let project_id = ProjectId::random();
        let mut commands = MockContributorCommand::new();
        commands.expect_add_contributor().return_once(|_, _, _| {
            Err(Error::reserved_role(
                "the author role is assigned at project creation and cannot be granted",
            ))
        });
        let mut state = empty_state();
        state.contributors = Arc::new(commands);

        let response = call_with_session(
            state,
            test::TestRequest::post()
                .uri(&format!("/projects/{project_id}/contributors"))
                .set_json(json!({ "userId": UserId::random().to_string(), "role": "author" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "reserved_role");
    }

    #[actix_web::test]
    async fn detaching_returns_204() {
        let project_id = ProjectId::random();
        let target = UserId::random();
        let mut commands = MockContributorCommand::new();
        commands
            .expect_remove_contributor()
            .return_once(|_, _, _| Ok(()));
        let mut state = empty_state();
        state.contributors = Arc::new(commands);

        let response = call_with_session(
            state,
            test::TestRequest::delete()
                .uri(&format!("/projects/{project_id}/contributors/{target}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
