//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI
//! documentation using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist or is not visible.
    #[schema(rename = "not_found")]
    NotFound,
    /// A nested path names a child that does not belong to its parent.
    #[schema(rename = "structural_mismatch")]
    StructuralMismatch,
    /// The target user already contributes to the project.
    #[schema(rename = "duplicate_contributor")]
    DuplicateContributor,
    /// The author role can be neither granted nor revoked.
    #[schema(rename = "reserved_role")]
    ReservedRole,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with a machine-readable code, a
/// human-readable message, and optional structured details.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    pub code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "you are not a contributor of this project")]
    pub message: String,
    /// Optional structured details, e.g. the denial reason token.
    pub details: Option<serde_json::Value>,
}
