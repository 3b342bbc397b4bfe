//! Driving ports for contributor use-cases.

use async_trait::async_trait;

use crate::domain::{Contributor, ContributorRole, Error, ProjectId, User, UserId};

/// Fields accepted when attaching a user to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddContributorRequest {
    /// The user to attach.
    pub user_id: UserId,
    /// Requested role; `author` is always rejected.
    pub role: ContributorRole,
}

/// A contributor joined with its user record, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    /// The contributing user.
    pub user: User,
    /// Role held on the project.
    pub role: ContributorRole,
}

/// Mutating contributor use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributorCommand: Send + Sync {
    /// Attach a user to a project with a non-author role.
    ///
    /// Any contributor of the project may do this; the author role and
    /// duplicate pairs are rejected.
    async fn add_contributor(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        request: AddContributorRequest,
    ) -> Result<Contributor, Error>;

    /// Detach a user from a project. Author contributors only; the author
    /// contributor itself can never be removed.
    async fn remove_contributor(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        target_user_id: &UserId,
    ) -> Result<(), Error>;
}

/// Read-only contributor use-cases, scoped to the principal's visible set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributorQuery: Send + Sync {
    /// List the members of a project together with their roles.
    async fn list_contributors(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectMember>, Error>;
}
