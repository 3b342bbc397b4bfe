//! Comment use-case services.
//!
//! Comments sit three levels deep, so every operation validates two links
//! transitively: the issue named in the path must belong to the named
//! project, and the comment must belong to the named issue. Only then is
//! the policy table consulted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::{AccessPolicy, AccessTarget, Operation, ResourceKind};
use crate::domain::hierarchy::{ensure_comment_in_issue, ensure_issue_in_project};
use crate::domain::issue_service::map_issue_error;
use crate::domain::ports::{
    CommentCommand, CommentPath, CommentPersistenceError, CommentQuery, CommentRepository,
    ContributorRepository, CreateCommentRequest, IssuePath, IssueRepository, ProjectRepository,
    UpdateCommentRequest, UserRepository,
};
use crate::domain::project_service::map_project_error;
use crate::domain::{Comment, CommentId, CommentValidationError, Error, Issue, UserId};

pub(crate) fn map_comment_error(error: CommentPersistenceError) -> Error {
    match error {
        CommentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentPersistenceError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

fn map_comment_validation(error: &CommentValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Comment use-cases over the repositories.
#[derive(Clone)]
pub struct CommentService<Cm, I, P, C> {
    comments: Arc<Cm>,
    issues: Arc<I>,
    projects: Arc<P>,
    policy: AccessPolicy<C>,
}

impl<Cm, I, P, C> CommentService<Cm, I, P, C> {
    /// Create a service over the given repositories.
    pub fn new(
        comments: Arc<Cm>,
        issues: Arc<I>,
        projects: Arc<P>,
        contributors: Arc<C>,
    ) -> Self {
        Self {
            comments,
            issues,
            projects,
            policy: AccessPolicy::new(contributors),
        }
    }
}

impl<Cm, I, P, C> CommentService<Cm, I, P, C>
where
    Cm: CommentRepository,
    I: IssueRepository,
    P: ProjectRepository,
    C: ContributorRepository,
{
    /// Fetch the issue named by the two-level prefix and validate its link
    /// to the named project.
    async fn load_issue_checked(&self, path: &IssuePath) -> Result<Issue, Error> {
        // Distinguish a missing project from a missing issue the way the
        // nested endpoints do: the outer resource is checked first.
        self.projects
            .find_by_id(&path.project_id)
            .await
            .map_err(map_project_error)?
            .ok_or_else(|| Error::not_found("project not found"))?;
        let issue = self
            .issues
            .find_by_id(&path.issue_id)
            .await
            .map_err(map_issue_error)?
            .ok_or_else(|| Error::not_found("issue not found"))?;
        ensure_issue_in_project(&issue, &path.project_id)?;
        Ok(issue)
    }

    /// Fetch the comment named by the full chain, validating both links.
    async fn load_comment_checked(&self, path: &CommentPath) -> Result<Comment, Error> {
        self.load_issue_checked(&path.issue_path()).await?;
        let comment = self
            .comments
            .find_by_id(&path.comment_id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("comment not found"))?;
        ensure_comment_in_issue(&comment, &path.issue_id)?;
        Ok(comment)
    }
}

#[async_trait]
impl<Cm, I, P, C> CommentQuery for CommentService<Cm, I, P, C>
where
    Cm: CommentRepository,
    I: IssueRepository,
    P: ProjectRepository,
    C: ContributorRepository,
{
    async fn list_comments(
        &self,
        principal: &UserId,
        path: &IssuePath,
    ) -> Result<Vec<Comment>, Error> {
        let issue = self.load_issue_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::List,
                ResourceKind::Comment,
                &AccessTarget::project(issue.project_id),
            )
            .await?;
        self.comments
            .list_for_issue(&issue.id)
            .await
            .map_err(map_comment_error)
    }

    async fn fetch_comment(
        &self,
        principal: &UserId,
        path: &CommentPath,
    ) -> Result<Comment, Error> {
        let comment = self.load_comment_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Retrieve,
                ResourceKind::Comment,
                &AccessTarget::project(path.project_id),
            )
            .await?;
        Ok(comment)
    }
}

#[async_trait]
impl<Cm, I, P, C> CommentCommand for CommentService<Cm, I, P, C>
where
    Cm: CommentRepository,
    I: IssueRepository,
    P: ProjectRepository,
    C: ContributorRepository,
{
    async fn create_comment(
        &self,
        principal: &UserId,
        path: &IssuePath,
        request: CreateCommentRequest,
    ) -> Result<Comment, Error> {
        // Chain validation precedes authorization: posting against an issue
        // of a different project is structural, not forbidden.
        let issue = self.load_issue_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Create,
                ResourceKind::Comment,
                &AccessTarget::project(issue.project_id),
            )
            .await?;

        let comment = Comment::try_new(
            CommentId::random(),
            request.description,
            *principal,
            issue.id,
            Utc::now(),
        )
        .map_err(|err| map_comment_validation(&err))?;

        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)?;
        Ok(comment)
    }

    async fn update_comment(
        &self,
        principal: &UserId,
        path: &CommentPath,
        request: UpdateCommentRequest,
    ) -> Result<Comment, Error> {
        let current = self.load_comment_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Update,
                ResourceKind::Comment,
                &AccessTarget::authored(path.project_id, current.author_id),
            )
            .await?;

        let updated = Comment::try_new(
            current.id,
            request.description,
            current.author_id,
            current.issue_id,
            current.created_at,
        )
        .map_err(|err| map_comment_validation(&err))?;

        self.comments
            .update(&updated)
            .await
            .map_err(map_comment_error)?;
        Ok(updated)
    }

    async fn delete_comment(&self, principal: &UserId, path: &CommentPath) -> Result<(), Error> {
        let comment = self.load_comment_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Delete,
                ResourceKind::Comment,
                &AccessTarget::authored(path.project_id, comment.author_id),
            )
            .await?;
        self.comments
            .delete(&comment.id)
            .await
            .map_err(map_comment_error)
    }
}
