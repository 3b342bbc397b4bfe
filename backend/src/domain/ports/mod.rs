//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories) describe what the domain needs from storage;
//! driving ports (commands and queries) describe what inbound adapters may
//! ask the domain to do. Each trait exposes strongly typed errors so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_ops;
mod comment_repository;
mod contributor_ops;
mod contributor_repository;
mod issue_ops;
mod issue_repository;
mod login_service;
mod project_ops;
mod project_repository;
mod user_repository;

#[cfg(test)]
pub use comment_ops::{MockCommentCommand, MockCommentQuery};
pub use comment_ops::{
    CommentCommand, CommentPath, CommentQuery, CreateCommentRequest, UpdateCommentRequest,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use contributor_ops::{MockContributorCommand, MockContributorQuery};
pub use contributor_ops::{
    AddContributorRequest, ContributorCommand, ContributorQuery, ProjectMember,
};
#[cfg(test)]
pub use contributor_repository::MockContributorRepository;
pub use contributor_repository::{ContributorPersistenceError, ContributorRepository};
#[cfg(test)]
pub use issue_ops::{MockIssueCommand, MockIssueQuery};
pub use issue_ops::{
    CreateIssueRequest, IssueCommand, IssuePath, IssueQuery, UpdateIssueRequest,
};
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::{IssuePersistenceError, IssueRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use project_ops::{MockProjectCommand, MockProjectQuery};
pub use project_ops::{CreateProjectRequest, ProjectCommand, ProjectQuery, UpdateProjectRequest};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectPersistenceError, ProjectRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
