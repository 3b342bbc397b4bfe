//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{comments, contributors, issues, projects, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[expect(dead_code, reason = "audit column read back but not modelled")]
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Project models
// ---------------------------------------------------------------------------

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub project_type: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating existing project records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
pub(crate) struct ProjectUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub project_type: &'a str,
}

// ---------------------------------------------------------------------------
// Contributor models
// ---------------------------------------------------------------------------

/// Row struct for reading from the contributors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contributors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContributorRow {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new contributor records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contributors)]
pub(crate) struct NewContributorRow<'a> {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Issue models
// ---------------------------------------------------------------------------

/// Row struct for reading from the issues table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IssueRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub priority: String,
    pub status: String,
    pub author_user_id: Uuid,
    pub assignee_user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new issue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issues)]
pub(crate) struct NewIssueRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub tag: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub author_user_id: Uuid,
    pub assignee_user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating existing issue records.
///
/// The author and project columns are deliberately absent: those references
/// are immutable after creation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = issues)]
pub(crate) struct IssueUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tag: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub assignee_user_id: Uuid,
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub description: String,
    pub author_user_id: Uuid,
    pub issue_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub description: &'a str,
    pub author_user_id: Uuid,
    pub issue_id: Uuid,
    pub created_at: DateTime<Utc>,
}
