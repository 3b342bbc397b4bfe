//! Issue use-case services.
//!
//! Every nested operation follows the same sequence: fetch the issue,
//! validate the path chain against its stored project reference, then
//! evaluate the policy table. Structural failures win over authorization
//! failures by construction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::{AccessPolicy, AccessTarget, Operation, ResourceKind};
use crate::domain::hierarchy::ensure_issue_in_project;
use crate::domain::ports::{
    ContributorRepository, CreateIssueRequest, IssueCommand, IssuePath, IssuePersistenceError,
    IssueQuery, IssueRepository, ProjectRepository, UpdateIssueRequest, UserRepository,
};
use crate::domain::project_service::{map_project_error, map_user_error};
use crate::domain::{Error, Issue, IssueFields, IssueId, IssueValidationError, ProjectId, UserId};

pub(crate) fn map_issue_error(error: IssuePersistenceError) -> Error {
    match error {
        IssuePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("issue repository unavailable: {message}"))
        }
        IssuePersistenceError::Query { message } => {
            Error::internal(format!("issue repository error: {message}"))
        }
    }
}

fn map_issue_validation(error: &IssueValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Issue use-cases over the repositories.
#[derive(Clone)]
pub struct IssueService<I, P, C, U> {
    issues: Arc<I>,
    projects: Arc<P>,
    users: Arc<U>,
    policy: AccessPolicy<C>,
}

impl<I, P, C, U> IssueService<I, P, C, U> {
    /// Create a service over the given repositories.
    pub fn new(issues: Arc<I>, projects: Arc<P>, contributors: Arc<C>, users: Arc<U>) -> Self {
        Self {
            issues,
            projects,
            users,
            policy: AccessPolicy::new(contributors),
        }
    }
}

impl<I, P, C, U> IssueService<I, P, C, U>
where
    I: IssueRepository,
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    /// Fail with `NotFound` unless the project exists.
    async fn require_project(&self, project_id: &ProjectId) -> Result<(), Error> {
        self.projects
            .find_by_id(project_id)
            .await
            .map_err(map_project_error)?
            .ok_or_else(|| Error::not_found("project not found"))?;
        Ok(())
    }

    /// Fetch the issue named by the path and validate the chain.
    ///
    /// Runs before any policy evaluation so a spoofed project/issue pairing
    /// is rejected structurally rather than leaking an authorization
    /// verdict.
    async fn load_checked(&self, path: &IssuePath) -> Result<Issue, Error> {
        let issue = self
            .issues
            .find_by_id(&path.issue_id)
            .await
            .map_err(map_issue_error)?
            .ok_or_else(|| Error::not_found("issue not found"))?;
        ensure_issue_in_project(&issue, &path.project_id)?;
        Ok(issue)
    }

    /// Fail with `NotFound` unless the user exists.
    async fn require_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        Ok(())
    }
}

#[async_trait]
impl<I, P, C, U> IssueQuery for IssueService<I, P, C, U>
where
    I: IssueRepository,
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    async fn list_issues(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<Issue>, Error> {
        self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::List,
                ResourceKind::Issue,
                &AccessTarget::project(*project_id),
            )
            .await?;
        self.issues
            .list_for_project(project_id)
            .await
            .map_err(map_issue_error)
    }

    async fn fetch_issue(&self, principal: &UserId, path: &IssuePath) -> Result<Issue, Error> {
        let issue = self.load_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Retrieve,
                ResourceKind::Issue,
                &AccessTarget::project(issue.project_id),
            )
            .await?;
        Ok(issue)
    }
}

#[async_trait]
impl<I, P, C, U> IssueCommand for IssueService<I, P, C, U>
where
    I: IssueRepository,
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    async fn create_issue(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        request: CreateIssueRequest,
    ) -> Result<Issue, Error> {
        self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::Create,
                ResourceKind::Issue,
                &AccessTarget::project(*project_id),
            )
            .await?;

        if let Some(assignee_id) = &request.assignee_id {
            self.require_user(assignee_id).await?;
        }

        // The author is the requesting principal, never client-supplied, and
        // the owning project comes from the path.
        let issue = Issue::try_new(
            IssueId::random(),
            IssueFields {
                title: request.title,
                description: request.description,
                tag: request.tag,
                priority: request.priority,
                status: request.status,
            },
            *principal,
            request.assignee_id,
            *project_id,
            Utc::now(),
        )
        .map_err(|err| map_issue_validation(&err))?;

        self.issues.insert(&issue).await.map_err(map_issue_error)?;
        Ok(issue)
    }

    async fn update_issue(
        &self,
        principal: &UserId,
        path: &IssuePath,
        request: UpdateIssueRequest,
    ) -> Result<Issue, Error> {
        let current = self.load_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Update,
                ResourceKind::Issue,
                &AccessTarget::authored(current.project_id, current.author_id),
            )
            .await?;

        if let Some(assignee_id) = &request.assignee_id {
            self.require_user(assignee_id).await?;
        }

        // Author, project, and creation time are immutable by construction:
        // the update request has no fields for them.
        let updated = Issue::try_new(
            current.id,
            IssueFields {
                title: request.title.unwrap_or(current.title),
                description: request.description.unwrap_or(current.description),
                tag: request.tag.unwrap_or(current.tag),
                priority: request.priority.unwrap_or(current.priority),
                status: request.status.unwrap_or(current.status),
            },
            current.author_id,
            Some(request.assignee_id.unwrap_or(current.assignee_id)),
            current.project_id,
            current.created_at,
        )
        .map_err(|err| map_issue_validation(&err))?;

        self.issues
            .update(&updated)
            .await
            .map_err(map_issue_error)?;
        Ok(updated)
    }

    async fn delete_issue(&self, principal: &UserId, path: &IssuePath) -> Result<(), Error> {
        let issue = self.load_checked(path).await?;
        self.policy
            .authorize(
                principal,
                Operation::Delete,
                ResourceKind::Issue,
                &AccessTarget::authored(issue.project_id, issue.author_id),
            )
            .await?;
        self.issues
            .delete(&issue.id)
            .await
            .map_err(map_issue_error)
    }
}
