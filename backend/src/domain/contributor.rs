//! Contributor records joining users to projects.
//!
//! A contributor row is the sole source of truth for "who may see this
//! project" and "who administers it". The `(user, project)` pair is unique,
//! enforced by the store's composite primary key rather than application
//! locking, so concurrent duplicate adds have exactly one winner.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, UserId};

/// Permission level a contributor holds on a project.
///
/// Exactly one contributor per project holds [`ContributorRole::Author`],
/// assigned at project creation to the creating principal. The remaining
/// roles are equivalent for authorization purposes; they exist as product
/// vocabulary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorRole {
    /// Creator-administrator of the project.
    Author,
    /// Non-admin contributor.
    Manager,
    /// Non-admin contributor.
    Creator,
}

impl ContributorRole {
    /// Whether this role is the per-project administrative role.
    #[must_use]
    pub const fn is_author(self) -> bool {
        matches!(self, Self::Author)
    }
}

impl fmt::Display for ContributorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Author => "author",
            Self::Manager => "manager",
            Self::Creator => "creator",
        };
        f.write_str(value)
    }
}

/// Error returned when parsing an unknown role value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContributorRoleError(String);

impl fmt::Display for ParseContributorRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown contributor role {:?}; expected author, manager, or creator",
            self.0
        )
    }
}

impl std::error::Error for ParseContributorRoleError {}

impl FromStr for ContributorRole {
    type Err = ParseContributorRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "author" => Ok(Self::Author),
            "manager" => Ok(Self::Manager),
            "creator" => Ok(Self::Creator),
            other => Err(ParseContributorRoleError(other.to_owned())),
        }
    }
}

/// Join record granting a [`UserId`] a role on a [`ProjectId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    /// The contributing user.
    pub user_id: UserId,
    /// The project contributed to.
    pub project_id: ProjectId,
    /// Permission level held on the project.
    pub role: ContributorRole,
    /// When the contributor was attached.
    pub created_at: DateTime<Utc>,
}

impl Contributor {
    /// Construct a contributor record.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        project_id: ProjectId,
        role: ContributorRole,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            project_id,
            role,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("author", ContributorRole::Author)]
    #[case("manager", ContributorRole::Manager)]
    #[case("creator", ContributorRole::Creator)]
    fn roles_round_trip_through_strings(#[case] raw: &str, #[case] expected: ContributorRole) {
        let parsed: ContributorRole = raw.parse().expect("known role");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), raw);
    }

    #[rstest]
    #[case("AUTHOR")]
    #[case("owner")]
    #[case("")]
    fn unknown_roles_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<ContributorRole>().expect_err("unknown role");
        assert!(err.to_string().contains("unknown contributor role"));
    }

    #[rstest]
    fn only_author_is_administrative() {
        assert!(ContributorRole::Author.is_author());
        assert!(!ContributorRole::Manager.is_author());
        assert!(!ContributorRole::Creator.is_author());
    }
}
