//! PostgreSQL-backed `IssueRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IssuePersistenceError, IssueRepository};
use crate::domain::{Issue, IssueFields, IssueId, ProjectId, UserId};

use super::error_mapping::{DieselErrorClass, classify_diesel_error};
use super::models::{IssueRow, IssueUpdate, NewIssueRow};
use super::pool::{DbPool, PoolError};
use super::schema::issues;

/// Diesel-backed implementation of the `IssueRepository` port.
#[derive(Clone)]
pub struct DieselIssueRepository {
    pool: DbPool,
}

impl DieselIssueRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IssuePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IssuePersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> IssuePersistenceError {
    match classify_diesel_error(&error) {
        DieselErrorClass::Connection => {
            IssuePersistenceError::connection("database connection error")
        }
        _ => IssuePersistenceError::query("database error"),
    }
}

fn invalid_column(detail: impl std::fmt::Display) -> IssuePersistenceError {
    IssuePersistenceError::query(format!("stored issue failed validation: {detail}"))
}

fn row_to_issue(row: IssueRow) -> Result<Issue, IssuePersistenceError> {
    let fields = IssueFields {
        title: row.title,
        description: row.description,
        tag: row.tag.parse().map_err(invalid_column)?,
        priority: row.priority.parse().map_err(invalid_column)?,
        status: row.status.parse().map_err(invalid_column)?,
    };
    Issue::try_new(
        IssueId::from_uuid(row.id),
        fields,
        UserId::from_uuid(row.author_user_id),
        Some(UserId::from_uuid(row.assignee_user_id)),
        ProjectId::from_uuid(row.project_id),
        row.created_at,
    )
    .map_err(invalid_column)
}

#[async_trait]
impl IssueRepository for DieselIssueRepository {
    async fn insert(&self, issue: &Issue) -> Result<(), IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let tag = issue.tag.to_string();
        let priority = issue.priority.to_string();
        let status = issue.status.to_string();
        let row = NewIssueRow {
            id: *issue.id.as_uuid(),
            title: issue.title.as_str(),
            description: issue.description.as_str(),
            tag: tag.as_str(),
            priority: priority.as_str(),
            status: status.as_str(),
            author_user_id: *issue.author_id.as_uuid(),
            assignee_user_id: *issue.assignee_id.as_uuid(),
            project_id: *issue.project_id.as_uuid(),
            created_at: issue.created_at,
        };

        diesel::insert_into(issues::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IssueRow> = issues::table
            .find(*id.as_uuid())
            .select(IssueRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_issue).transpose()
    }

    async fn list_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Issue>, IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IssueRow> = issues::table
            .filter(issues::project_id.eq(*project_id.as_uuid()))
            .select(IssueRow::as_select())
            .order(issues::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_issue).collect()
    }

    async fn update(&self, issue: &Issue) -> Result<(), IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let tag = issue.tag.to_string();
        let priority = issue.priority.to_string();
        let status = issue.status.to_string();

        // The changeset has no author or project columns; those references
        // are immutable after creation.
        diesel::update(issues::table.find(*issue.id.as_uuid()))
            .set(&IssueUpdate {
                title: issue.title.as_str(),
                description: issue.description.as_str(),
                tag: tag.as_str(),
                priority: priority.as_str(),
                status: status.as_str(),
                assignee_user_id: *issue.assignee_id.as_uuid(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &IssueId) -> Result<(), IssuePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Comments follow via ON DELETE CASCADE.
        diesel::delete(issues::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
