//! Issue aggregate.
//!
//! Issues belong to exactly one project. The `author` and `project`
//! references are fixed at creation; only the descriptive fields, workflow
//! fields, and the assignee may change afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{IssueId, ProjectId, UserId};

/// Maximum accepted length for an issue title.
pub const TITLE_MAX: usize = 128;
/// Maximum accepted length for an issue description.
pub const DESCRIPTION_MAX: usize = 2048;

/// Classification of the work an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTag {
    /// Defect in existing behaviour.
    Bug,
    /// Enhancement to existing behaviour.
    Improvement,
    /// New work item.
    Task,
}

/// Urgency of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    /// Can wait.
    Low,
    /// Normal scheduling.
    Medium,
    /// Needs attention now.
    High,
}

/// Workflow state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Not started.
    ToDo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Completed,
}

/// Error returned when parsing an unknown enum value for an issue field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssueFieldError {
    field: &'static str,
    value: String,
    expected: &'static str,
}

impl fmt::Display for ParseIssueFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown issue {} {:?}; expected one of {}",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for ParseIssueFieldError {}

macro_rules! issue_field_strings {
    ($ty:ident, $field:expr, $expected:expr, { $($variant:ident => $raw:expr),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let value = match self {
                    $(Self::$variant => $raw,)+
                };
                f.write_str(value)
            }
        }

        impl FromStr for $ty {
            type Err = ParseIssueFieldError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($raw => Ok(Self::$variant),)+
                    other => Err(ParseIssueFieldError {
                        field: $field,
                        value: other.to_owned(),
                        expected: $expected,
                    }),
                }
            }
        }
    };
}

issue_field_strings!(IssueTag, "tag", "bug, improvement, task", {
    Bug => "bug",
    Improvement => "improvement",
    Task => "task",
});

issue_field_strings!(IssuePriority, "priority", "low, medium, high", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

issue_field_strings!(IssueStatus, "status", "to_do, in_progress, completed", {
    ToDo => "to_do",
    InProgress => "in_progress",
    Completed => "completed",
});

/// Validation errors returned by [`Issue::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueValidationError {
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
}

impl fmt::Display for IssueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "issue title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "issue title must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "issue description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for IssueValidationError {}

/// A tracked issue.
///
/// ## Invariants
/// - `project_id` and `author_id` never change after creation.
/// - `assignee_id` defaults to `author_id` at creation and is mutable
///   afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable identifier.
    pub id: IssueId,
    /// Short human-readable title.
    pub title: String,
    /// Longer description; empty string when absent.
    pub description: String,
    /// Work classification.
    pub tag: IssueTag,
    /// Urgency.
    pub priority: IssuePriority,
    /// Workflow state.
    pub status: IssueStatus,
    /// Creating principal; immutable.
    pub author_id: UserId,
    /// Currently assigned user.
    pub assignee_id: UserId,
    /// Owning project; immutable.
    pub project_id: ProjectId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Field bundle for [`Issue::try_new`], keeping the constructor signature
/// readable.
#[derive(Debug, Clone)]
pub struct IssueFields {
    /// Short human-readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Work classification.
    pub tag: IssueTag,
    /// Urgency.
    pub priority: IssuePriority,
    /// Workflow state.
    pub status: IssueStatus,
}

impl Issue {
    /// Validate and construct an issue.
    ///
    /// `assignee_id` of `None` applies the default: the issue is assigned to
    /// its author.
    pub fn try_new(
        id: IssueId,
        fields: IssueFields,
        author_id: UserId,
        assignee_id: Option<UserId>,
        project_id: ProjectId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, IssueValidationError> {
        let title = fields.title.trim().to_owned();
        if title.is_empty() {
            return Err(IssueValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(IssueValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if fields.description.chars().count() > DESCRIPTION_MAX {
            return Err(IssueValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }

        Ok(Self {
            id,
            title,
            description: fields.description,
            tag: fields.tag,
            priority: fields.priority,
            status: fields.status,
            assignee_id: assignee_id.unwrap_or(author_id),
            author_id,
            project_id,
            created_at,
        })
    }
}
