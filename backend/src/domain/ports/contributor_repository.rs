//! Port abstraction for contributor persistence adapters and their errors.
//!
//! The `(user, project)` uniqueness invariant lives in the store as a
//! composite primary key. Adapters translate the store's unique-violation
//! failure into [`ContributorPersistenceError::Duplicate`] so that a
//! concurrent double add has exactly one winner and the loser sees a typed
//! error rather than a raw database fault.

use async_trait::async_trait;

use crate::domain::{Contributor, ProjectId, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by contributor repository adapters.
    pub enum ContributorPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "contributor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contributor repository query failed: {message}",
        /// The `(user, project)` pair already exists.
        Duplicate { user_id: String, project_id: String } =>
            "user {user_id} already contributes to project {project_id}",
    }
}

/// Port for contributor storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributorRepository: Send + Sync {
    /// Insert a contributor record.
    ///
    /// Returns [`ContributorPersistenceError::Duplicate`] when the store's
    /// uniqueness constraint rejects the pair.
    async fn insert(&self, contributor: &Contributor) -> Result<(), ContributorPersistenceError>;

    /// Look up the unique `(user, project)` contributor record.
    async fn find(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Contributor>, ContributorPersistenceError>;

    /// List all contributors of a project.
    async fn list_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Contributor>, ContributorPersistenceError>;

    /// Delete the `(user, project)` contributor record.
    ///
    /// Returns `true` when a record existed and was removed.
    async fn delete(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<bool, ContributorPersistenceError>;
}
