//! Port abstraction for project persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Contributor, Project, ProjectId, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by project repository adapters.
    pub enum ProjectPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

/// Port for project storage and retrieval.
///
/// The listing method scopes by contributor membership: the queryable
/// universe for any principal is the set of projects they contribute to, so
/// unauthorized reads surface as "not found" rather than "forbidden".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project together with its author contributor.
    ///
    /// Both writes commit or neither does; a project must never exist
    /// without exactly one author contributor. Adapters run the pair inside
    /// a single store transaction.
    async fn create_with_author(
        &self,
        project: &Project,
        author: &Contributor,
    ) -> Result<(), ProjectPersistenceError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: &ProjectId)
    -> Result<Option<Project>, ProjectPersistenceError>;

    /// List the projects a user contributes to.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Project>, ProjectPersistenceError>;

    /// Persist updated project fields.
    async fn update(&self, project: &Project) -> Result<(), ProjectPersistenceError>;

    /// Delete a project; the store cascades to contributors, issues, and
    /// comments.
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectPersistenceError>;
}
