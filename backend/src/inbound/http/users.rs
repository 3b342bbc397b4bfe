//! Login and current-user HTTP handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"ada@example.org"}
//! GET  /api/v1/users/me
//! ```
//!
//! Login resolves an existing user by email and stores the principal in the
//! session cookie. Credential verification happens upstream in the identity
//! subsystem; this API never sees password material.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email of an existing user.
    pub email: Option<String>,
}

/// Wire representation of a user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

/// Resolve a user by email and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unknown user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let email = payload
        .into_inner()
        .email
        .ok_or_else(|| missing_field_error("email"))?;
    let user = state.login.identify(&email).await?;
    session.persist_user(&user.id)?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Fetch the authenticated user's own record.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let user = state.login.fetch_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
