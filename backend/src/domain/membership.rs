//! Membership resolution.
//!
//! Answers exactly two questions: is this principal a contributor of that
//! project, and if so, do they hold the author role. Absence of a
//! contributor record is a policy fact ("not authorized"), never a data
//! error, so lookups return `Option` and only adapter failures become
//! errors.

use std::sync::Arc;

use crate::domain::ports::{ContributorPersistenceError, ContributorRepository};
use crate::domain::{Contributor, Error, ProjectId, UserId};

/// Map contributor adapter failures to domain errors.
///
/// A duplicate report from a read path would mean the adapter is broken, so
/// it maps to an internal error rather than a client-visible conflict.
pub(crate) fn map_contributor_error(error: ContributorPersistenceError) -> Error {
    match error {
        ContributorPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("contributor repository unavailable: {message}"))
        }
        ContributorPersistenceError::Query { message } => {
            Error::internal(format!("contributor repository error: {message}"))
        }
        ContributorPersistenceError::Duplicate { .. } => {
            Error::internal("unexpected duplicate report from contributor repository")
        }
    }
}

/// Read-only resolver over the contributor store.
///
/// Every call reads fresh state; a contributor removed between request
/// receipt and an object-level check is re-resolved, not read from a cached
/// session object.
#[derive(Clone)]
pub struct MembershipResolver<C> {
    contributors: Arc<C>,
}

impl<C> MembershipResolver<C> {
    /// Create a resolver over the given contributor repository.
    pub const fn new(contributors: Arc<C>) -> Self {
        Self { contributors }
    }
}

impl<C> MembershipResolver<C>
where
    C: ContributorRepository,
{
    /// Look up the unique `(principal, project)` contributor record.
    pub async fn resolve(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Contributor>, Error> {
        self.contributors
            .find(principal, project_id)
            .await
            .map_err(map_contributor_error)
    }

    /// Whether the principal holds the author role on the project.
    pub async fn is_author(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<bool, Error> {
        let membership = self.resolve(principal, project_id).await?;
        Ok(membership.is_some_and(|contributor| contributor.role.is_author()))
    }
}
