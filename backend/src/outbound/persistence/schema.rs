//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.
//!
//! Referential behaviour lives in the migrations: `projects` cascades to
//! `contributors` and `issues`, `issues` cascades to `comments`, and the
//! composite primary key on `contributors` is the store-level uniqueness
//! constraint behind the one-contributor-per-user-per-project invariant.

diesel::table! {
    /// User accounts, written by the external identity subsystem.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tracked projects.
    projects (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short human-readable title (max 128 characters).
        title -> Varchar,
        /// Longer description (max 2048 characters).
        description -> Text,
        /// Free-form classification tag (max 32 characters).
        project_type -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join table granting users roles on projects.
    ///
    /// The composite primary key doubles as the uniqueness constraint on
    /// the `(user, project)` pair.
    contributors (user_id, project_id) {
        /// The contributing user.
        user_id -> Uuid,
        /// The project contributed to.
        project_id -> Uuid,
        /// Role: `author`, `manager`, or `creator`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issues filed against projects.
    issues (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short human-readable title (max 128 characters).
        title -> Varchar,
        /// Longer description (max 2048 characters).
        description -> Text,
        /// Work classification: `bug`, `improvement`, or `task`.
        tag -> Varchar,
        /// Urgency: `low`, `medium`, or `high`.
        priority -> Varchar,
        /// Workflow state: `to_do`, `in_progress`, or `completed`.
        status -> Varchar,
        /// Creating principal; never updated.
        author_user_id -> Uuid,
        /// Currently assigned user.
        assignee_user_id -> Uuid,
        /// Owning project; never updated.
        project_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments posted on issues.
    comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Comment body (max 2048 characters).
        description -> Text,
        /// Creating principal; never updated.
        author_user_id -> Uuid,
        /// Owning issue; never updated.
        issue_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(contributors -> users (user_id));
diesel::joinable!(contributors -> projects (project_id));
diesel::joinable!(issues -> projects (project_id));
diesel::joinable!(comments -> issues (issue_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, contributors, issues, comments,);
