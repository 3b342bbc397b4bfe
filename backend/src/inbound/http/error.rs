//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes.
//!
//! Two mappings deserve a note. Structural mismatches are 404-class, not
//! 400-class: a path chain that does not line up names a resource that, for
//! this caller, does not exist. Duplicate-contributor and reserved-role
//! rejections are 403-class, matching the product's original behaviour for
//! contributor-invariant violations.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden | ErrorCode::DuplicateContributor | ErrorCode::ReservedRole => {
            StatusCode::FORBIDDEN
        }
        ErrorCode::NotFound | ErrorCode::StructuralMismatch => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
    #[case(ErrorCode::DuplicateContributor, StatusCode::FORBIDDEN)]
    #[case(ErrorCode::ReservedRole, StatusCode::FORBIDDEN)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::StructuralMismatch, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn every_code_has_a_status(#[case] code: ErrorCode, #[case] expected: StatusCode) {
        assert_eq!(status_for(code), expected);
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let err = Error::internal("connection string was postgres://secret");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let redacted = redact_if_internal(&err);
        assert_eq!(redacted.message(), "Internal server error");
    }

    #[rstest]
    fn non_internal_errors_keep_their_message() {
        let err = Error::forbidden("only the project author may perform this operation");
        let redacted = redact_if_internal(&err);
        assert_eq!(redacted.message(), err.message());
    }
}
