//! Driving port for principal resolution.
//!
//! Credential verification belongs to the external identity subsystem; this
//! port only turns an already-verified identity claim into a stored user so
//! the session layer can persist the principal.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Resolve identities to stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve a user by unique email, failing with `Unauthorized` when no
    /// such user exists.
    async fn identify(&self, email: &str) -> Result<User, Error>;

    /// Fetch the user behind an established session principal.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}
