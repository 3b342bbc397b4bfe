//! User principals referenced by projects, issues, and comments.
//!
//! Users are created by an external identity subsystem. This core only reads
//! them: a [`User`] is referenced by contributor records and by the
//! authorship fields on issues and comments, never owned or mutated here.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Maximum accepted length for either name component.
pub const NAME_MAX: usize = 64;
/// Maximum accepted length for an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by [`User::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// First name was blank.
    EmptyFirstName,
    /// Last name was blank.
    EmptyLastName,
    /// A name component exceeded [`NAME_MAX`].
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Email was blank, overlong, or not of the shape `local@domain`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "name components must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a non-empty address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// A user principal.
///
/// ## Invariants
/// - Name components are trimmed, non-empty, and at most [`NAME_MAX`]
///   characters.
/// - `email` is unique across the store and shaped like `local@domain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
}

impl User {
    /// Validate and construct a user from raw field values.
    pub fn try_new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let first_name = first_name.into().trim().to_owned();
        let last_name = last_name.into().trim().to_owned();
        let email = email.into().trim().to_owned();

        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        if first_name.chars().count() > NAME_MAX || last_name.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        if !is_plausible_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self {
            id,
            first_name,
            last_name,
            email,
        })
    }
}

/// Structural email check: non-empty local and domain parts either side of a
/// single `@`. Deliverability is the identity subsystem's problem.
fn is_plausible_email(value: &str) -> bool {
    if value.is_empty() || value.chars().count() > EMAIL_MAX {
        return false;
    }
    let mut parts = value.split('@');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    )
}
