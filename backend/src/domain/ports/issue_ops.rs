//! Driving ports for issue use-cases.

use async_trait::async_trait;

use crate::domain::{
    Error, Issue, IssueId, IssuePriority, IssueStatus, IssueTag, ProjectId, UserId,
};

/// Identifier chain for a nested issue endpoint.
///
/// Carries both path identifiers so the service can verify the issue really
/// belongs to the named project before any authorization runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuePath {
    /// Project named in the path.
    pub project_id: ProjectId,
    /// Issue named in the path.
    pub issue_id: IssueId,
}

/// Fields accepted when filing an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    /// Short human-readable title.
    pub title: String,
    /// Longer description; empty string when absent.
    pub description: String,
    /// Work classification.
    pub tag: IssueTag,
    /// Urgency.
    pub priority: IssuePriority,
    /// Workflow state.
    pub status: IssueStatus,
    /// Initial assignee; defaults to the requesting principal when absent.
    pub assignee_id: Option<UserId>,
}

/// Fields accepted when updating an issue; absent fields keep their value.
/// The author and project references are immutable and have no field here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateIssueRequest {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement classification.
    pub tag: Option<IssueTag>,
    /// Replacement urgency.
    pub priority: Option<IssuePriority>,
    /// Replacement workflow state.
    pub status: Option<IssueStatus>,
    /// Replacement assignee.
    pub assignee_id: Option<UserId>,
}

/// Mutating issue use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueCommand: Send + Sync {
    /// File an issue against a project. Contributors only; the author is
    /// always the requesting principal.
    async fn create_issue(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        request: CreateIssueRequest,
    ) -> Result<Issue, Error>;

    /// Update an issue. The issue's author only.
    async fn update_issue(
        &self,
        principal: &UserId,
        path: &IssuePath,
        request: UpdateIssueRequest,
    ) -> Result<Issue, Error>;

    /// Delete an issue and its comments. The issue's author only.
    async fn delete_issue(&self, principal: &UserId, path: &IssuePath) -> Result<(), Error>;
}

/// Read-only issue use-cases, scoped to the principal's visible set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueQuery: Send + Sync {
    /// List the issues of a project the principal contributes to.
    async fn list_issues(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<Issue>, Error>;

    /// Fetch one issue after validating the path chain.
    async fn fetch_issue(&self, principal: &UserId, path: &IssuePath) -> Result<Issue, Error>;
}
