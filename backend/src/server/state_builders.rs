//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use backend::domain::{CommentService, IdentityService, IssueService, ProjectService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselContributorRepository, DieselIssueRepository,
    DieselProjectRepository, DieselUserRepository,
};

/// Build the HTTP state with database-backed services over the given pool.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let projects = Arc::new(DieselProjectRepository::new(pool.clone()));
    let contributors = Arc::new(DieselContributorRepository::new(pool.clone()));
    let issues = Arc::new(DieselIssueRepository::new(pool.clone()));
    let comments = Arc::new(DieselCommentRepository::new(pool.clone()));

    let project_service = Arc::new(ProjectService::new(
        Arc::clone(&projects),
        Arc::clone(&contributors),
        Arc::clone(&users),
    ));
    let issue_service = Arc::new(IssueService::new(
        Arc::clone(&issues),
        Arc::clone(&projects),
        Arc::clone(&contributors),
        Arc::clone(&users),
    ));
    let comment_service = Arc::new(CommentService::new(
        comments,
        issues,
        projects,
        contributors,
    ));

    HttpState {
        login: Arc::new(IdentityService::new(users)),
        projects: project_service.clone(),
        projects_query: project_service.clone(),
        contributors: project_service.clone(),
        contributors_query: project_service,
        issues: issue_service.clone(),
        issues_query: issue_service,
        comments: comment_service.clone(),
        comments_query: comment_service,
    }
}
