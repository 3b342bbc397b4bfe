//! Principal resolution service.
//!
//! Credential verification lives in the external identity subsystem; by the
//! time this service runs, the caller holds a verified identity claim and
//! only needs the stored user behind it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::project_service::map_user_error;
use crate::domain::{Error, User, UserId};

/// Resolves identity claims against the user store.
#[derive(Clone)]
pub struct IdentityService<U> {
    users: Arc<U>,
}

impl<U> IdentityService<U> {
    /// Create a service over the given user repository.
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> LoginService for IdentityService<U>
where
    U: UserRepository,
{
    async fn identify(&self, email: &str) -> Result<User, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("no user with that email address"))
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        // A session naming a vanished user is a stale session, not a data
        // error.
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;

    use super::*;

    fn ada(id: UserId) -> User {
        User::try_new(id, "Ada", "Lovelace", "ada@example.org").expect("valid user")
    }

    #[tokio::test]
    async fn known_emails_resolve_to_users() {
        let id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email: &str| email == "ada@example.org")
            .return_once(move |_| Ok(Some(ada(id))));

        let service = IdentityService::new(Arc::new(users));
        let user = service
            .identify("ada@example.org")
            .await
            .expect("identify succeeds");
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn unknown_emails_are_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().return_once(|_| Ok(None));

        let service = IdentityService::new(Arc::new(users));
        let err = service
            .identify("nobody@example.org")
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn stale_sessions_are_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));

        let service = IdentityService::new(Arc::new(users));
        let err = service
            .fetch_user(&UserId::random())
            .await
            .expect_err("stale");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
