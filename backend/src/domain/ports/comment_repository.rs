//! Port abstraction for comment persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, IssueId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

/// Port for comment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment.
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: &CommentId)
    -> Result<Option<Comment>, CommentPersistenceError>;

    /// List the comments on an issue.
    async fn list_for_issue(
        &self,
        issue_id: &IssueId,
    ) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Persist an updated comment body.
    async fn update(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    /// Delete a comment.
    async fn delete(&self, id: &CommentId) -> Result<(), CommentPersistenceError>;
}
