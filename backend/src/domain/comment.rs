//! Comment aggregate.
//!
//! Comments belong to exactly one issue, which in turn belongs to the
//! project named in the request path. That two-level consistency is checked
//! on every nested access by the path validator, not here.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CommentId, IssueId, UserId};

/// Maximum accepted length for a comment body.
pub const DESCRIPTION_MAX: usize = 2048;

/// Validation errors returned by [`Comment::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    /// Body was blank once trimmed.
    EmptyDescription,
    /// Body exceeded [`DESCRIPTION_MAX`].
    DescriptionTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "comment description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "comment description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// A comment on an issue.
///
/// ## Invariants
/// - `issue_id` and `author_id` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Stable identifier.
    pub id: CommentId,
    /// Comment body.
    pub description: String,
    /// Creating principal; immutable.
    pub author_id: UserId,
    /// Owning issue; immutable.
    pub issue_id: IssueId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Validate and construct a comment.
    pub fn try_new(
        id: CommentId,
        description: impl Into<String>,
        author_id: UserId,
        issue_id: IssueId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CommentValidationError> {
        let description = description.into().trim().to_owned();
        if description.is_empty() {
            return Err(CommentValidationError::EmptyDescription);
        }
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(CommentValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }

        Ok(Self {
            id,
            description,
            author_id,
            issue_id,
            created_at,
        })
    }
}
