//! Project aggregate.
//!
//! A project owns its contributor records and its issues; deleting a project
//! cascades to both (and transitively to comments). Ownership is enforced by
//! the store; this module only models the fields and their validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ProjectId;

/// Maximum accepted length for a project title.
pub const TITLE_MAX: usize = 128;
/// Maximum accepted length for a project description.
pub const DESCRIPTION_MAX: usize = 2048;
/// Maximum accepted length for the free-form project type tag.
pub const PROJECT_TYPE_MAX: usize = 32;

/// Validation errors returned by [`Project::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX`].
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Description exceeded [`DESCRIPTION_MAX`].
    DescriptionTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Project type exceeded [`PROJECT_TYPE_MAX`].
    ProjectTypeTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "project title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "project title must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "project description must be at most {max} characters")
            }
            Self::ProjectTypeTooLong { max } => {
                write!(f, "project type must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}

/// A tracked project.
///
/// ## Invariants
/// - `title` is trimmed, non-empty, and at most [`TITLE_MAX`] characters.
/// - `project_type` is a free-form classification tag, not an enum; the
///   original product used values like `back-end`, `front-end`, `iOS`.
/// - `created_at` is set once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier.
    pub id: ProjectId,
    /// Short human-readable title.
    pub title: String,
    /// Optional longer description; empty string when absent.
    pub description: String,
    /// Free-form classification tag.
    pub project_type: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Validate and construct a project.
    pub fn try_new(
        id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        project_type: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        let title = title.into().trim().to_owned();
        let description = description.into();
        let project_type = project_type.into().trim().to_owned();

        if title.is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(ProjectValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(ProjectValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        if project_type.chars().count() > PROJECT_TYPE_MAX {
            return Err(ProjectValidationError::ProjectTypeTooLong {
                max: PROJECT_TYPE_MAX,
            });
        }

        Ok(Self {
            id,
            title,
            description,
            project_type,
            created_at,
        })
    }
}
