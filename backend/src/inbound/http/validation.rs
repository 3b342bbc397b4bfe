//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers parse path and payload strings here, turning parse failures
//! into `invalid_request` errors with a stable `field`/`code` detail shape
//! before anything reaches the domain.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    CommentId, ContributorRole, Error, IssueId, IssuePriority, IssueStatus, IssueTag, ProjectId,
    UserId,
};

fn field_error(field: &'static str, code: &'static str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Error for a required payload field that was absent.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    field_error(field, "missing_field", format!("{field} is required"))
}

fn invalid_id_error(field: &'static str, err: &crate::domain::IdValidationError) -> Error {
    field_error(field, "invalid_uuid", err.to_string())
}

/// Parse a project id from a path segment.
pub(crate) fn parse_project_id(raw: &str) -> Result<ProjectId, Error> {
    ProjectId::new(raw).map_err(|err| invalid_id_error("projectId", &err))
}

/// Parse an issue id from a path segment.
pub(crate) fn parse_issue_id(raw: &str) -> Result<IssueId, Error> {
    IssueId::new(raw).map_err(|err| invalid_id_error("issueId", &err))
}

/// Parse a comment id from a path segment.
pub(crate) fn parse_comment_id(raw: &str) -> Result<CommentId, Error> {
    CommentId::new(raw).map_err(|err| invalid_id_error("commentId", &err))
}

/// Parse a user id from a path segment or payload field.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| invalid_id_error("userId", &err))
}

fn invalid_value_error<E: std::fmt::Display>(field: &'static str, err: &E) -> Error {
    field_error(field, "invalid_value", err.to_string())
}

/// Parse a contributor role from a payload field.
pub(crate) fn parse_role(raw: &str) -> Result<ContributorRole, Error> {
    ContributorRole::from_str(raw).map_err(|err| invalid_value_error("role", &err))
}

/// Parse an issue tag from a payload field.
pub(crate) fn parse_tag(raw: &str) -> Result<IssueTag, Error> {
    IssueTag::from_str(raw).map_err(|err| invalid_value_error("tag", &err))
}

/// Parse an issue priority from a payload field.
pub(crate) fn parse_priority(raw: &str) -> Result<IssuePriority, Error> {
    IssuePriority::from_str(raw).map_err(|err| invalid_value_error("priority", &err))
}

/// Parse an issue status from a payload field.
pub(crate) fn parse_status(raw: &str) -> Result<IssueStatus, Error> {
    IssueStatus::from_str(raw).map_err(|err| invalid_value_error("status", &err))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use crate::domain::ErrorCode;

    use super::*;

    #[rstest]
    fn malformed_ids_carry_the_field_name() {
        let err = parse_project_id("not-a-uuid").expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d["field"].as_str()),
            Some("projectId")
        );
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("invalid_uuid")
        );
    }

    #[rstest]
    #[case("bug")]
    #[case("improvement")]
    fn known_tags_parse(#[case] raw: &str) {
        parse_tag(raw).expect("known tag");
    }

    #[rstest]
    fn unknown_roles_carry_the_field_name() {
        let err = parse_role("owner").expect_err("rejected");
        assert_eq!(
            err.details().and_then(|d| d["field"].as_str()),
            Some("role")
        );
    }

    #[rstest]
    fn missing_fields_carry_a_stable_code() {
        let err = missing_field_error("title");
        assert_eq!(
            err.details().and_then(|d| d["code"].as_str()),
            Some("missing_field")
        );
    }
}
