//! Driving ports for comment use-cases.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Error, IssueId, ProjectId, UserId};

use super::issue_ops::IssuePath;

/// Identifier chain for a nested comment endpoint.
///
/// Three levels deep: the comment must belong to the named issue, and the
/// issue to the named project. Both links are validated on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPath {
    /// Project named in the path.
    pub project_id: ProjectId,
    /// Issue named in the path.
    pub issue_id: IssueId,
    /// Comment named in the path.
    pub comment_id: CommentId,
}

impl CommentPath {
    /// The two-level prefix of this chain.
    #[must_use]
    pub const fn issue_path(&self) -> IssuePath {
        IssuePath {
            project_id: self.project_id,
            issue_id: self.issue_id,
        }
    }
}

/// Fields accepted when posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    /// Comment body.
    pub description: String,
}

/// Fields accepted when editing a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    /// Replacement body.
    pub description: String,
}

/// Mutating comment use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Post a comment on an issue. Contributors only, after the path chain
    /// is validated; the author is always the requesting principal.
    async fn create_comment(
        &self,
        principal: &UserId,
        path: &IssuePath,
        request: CreateCommentRequest,
    ) -> Result<Comment, Error>;

    /// Edit a comment body. The comment's author only.
    async fn update_comment(
        &self,
        principal: &UserId,
        path: &CommentPath,
        request: UpdateCommentRequest,
    ) -> Result<Comment, Error>;

    /// Delete a comment. The comment's author only.
    async fn delete_comment(&self, principal: &UserId, path: &CommentPath) -> Result<(), Error>;
}

/// Read-only comment use-cases, scoped to the principal's visible set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// List the comments on an issue after validating the path chain.
    async fn list_comments(
        &self,
        principal: &UserId,
        path: &IssuePath,
    ) -> Result<Vec<Comment>, Error>;

    /// Fetch one comment after validating the full three-level chain.
    async fn fetch_comment(&self, principal: &UserId, path: &CommentPath)
    -> Result<Comment, Error>;
}
