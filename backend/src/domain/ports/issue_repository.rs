//! Port abstraction for issue persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Issue, IssueId, ProjectId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by issue repository adapters.
    pub enum IssuePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "issue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "issue repository query failed: {message}",
    }
}

/// Port for issue storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Persist a new issue.
    async fn insert(&self, issue: &Issue) -> Result<(), IssuePersistenceError>;

    /// Fetch an issue by identifier.
    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, IssuePersistenceError>;

    /// List the issues filed against a project.
    async fn list_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Issue>, IssuePersistenceError>;

    /// Persist updated issue fields.
    async fn update(&self, issue: &Issue) -> Result<(), IssuePersistenceError>;

    /// Delete an issue; the store cascades to its comments.
    async fn delete(&self, id: &IssueId) -> Result<(), IssuePersistenceError>;
}
