//! Port abstraction for user lookup adapters and their errors.
//!
//! Users are written by an external identity subsystem; this core only
//! resolves them, so the port is read-only by design.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read-only port over the user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by unique email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the users for a set of identifiers, in no particular order.
    ///
    /// Unknown identifiers are silently absent from the result; callers that
    /// care about missing users must compare lengths themselves.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;
}
