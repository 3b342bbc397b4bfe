//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentCommand, CommentQuery, ContributorCommand, ContributorQuery, IssueCommand, IssueQuery,
    LoginService, ProjectCommand, ProjectQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Principal resolution for login and `users/me`.
    pub login: Arc<dyn LoginService>,
    /// Project mutations.
    pub projects: Arc<dyn ProjectCommand>,
    /// Project reads.
    pub projects_query: Arc<dyn ProjectQuery>,
    /// Contributor mutations.
    pub contributors: Arc<dyn ContributorCommand>,
    /// Contributor reads.
    pub contributors_query: Arc<dyn ContributorQuery>,
    /// Issue mutations.
    pub issues: Arc<dyn IssueCommand>,
    /// Issue reads.
    pub issues_query: Arc<dyn IssueQuery>,
    /// Comment mutations.
    pub comments: Arc<dyn CommentCommand>,
    /// Comment reads.
    pub comments_query: Arc<dyn CommentQuery>,
}
