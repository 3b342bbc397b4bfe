//! Driving ports for project use-cases.
//!
//! HTTP handlers depend on these traits rather than on concrete services so
//! they stay testable without I/O. [`crate::domain::ProjectService`]
//! implements both.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectId, UserId};

/// Fields accepted when creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    /// Short human-readable title.
    pub title: String,
    /// Optional longer description; empty string when absent.
    pub description: String,
    /// Free-form classification tag.
    pub project_type: String,
}

/// Fields accepted when updating a project; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement classification tag.
    pub project_type: Option<String>,
}

/// Mutating project use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Create a project and atomically register the principal as its author
    /// contributor.
    async fn create_project(
        &self,
        principal: &UserId,
        request: CreateProjectRequest,
    ) -> Result<Project, Error>;

    /// Update a project's descriptive fields. Author contributors only.
    async fn update_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        request: UpdateProjectRequest,
    ) -> Result<Project, Error>;

    /// Delete a project and everything it owns. Author contributors only.
    async fn delete_project(&self, principal: &UserId, project_id: &ProjectId)
    -> Result<(), Error>;
}

/// Read-only project use-cases, scoped to the principal's visible set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// List the projects the principal contributes to.
    async fn list_projects(&self, principal: &UserId) -> Result<Vec<Project>, Error>;

    /// Fetch one project from the principal's visible set.
    async fn fetch_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Project, Error>;
}
