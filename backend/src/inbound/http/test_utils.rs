//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    MockCommentCommand, MockCommentQuery, MockContributorCommand, MockContributorQuery,
    MockIssueCommand, MockIssueQuery, MockLoginService, MockProjectCommand, MockProjectQuery,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// An [`HttpState`] where every port is an expectation-free mock.
///
/// Tests replace the ports they exercise; touching any other port fails the
/// test, which keeps handler coverage honest about what it calls.
pub fn empty_state() -> HttpState {
    HttpState {
        login: Arc::new(MockLoginService::new()),
        projects: Arc::new(MockProjectCommand::new()),
        projects_query: Arc::new(MockProjectQuery::new()),
        contributors: Arc::new(MockContributorCommand::new()),
        contributors_query: Arc::new(MockContributorQuery::new()),
        issues: Arc::new(MockIssueCommand::new()),
        issues_query: Arc::new(MockIssueQuery::new()),
        comments: Arc::new(MockCommentCommand::new()),
        comments_query: Arc::new(MockCommentQuery::new()),
    }
}
