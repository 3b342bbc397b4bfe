//! PostgreSQL-backed `CommentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{Comment, CommentId, IssueId, UserId};

use super::error_mapping::{DieselErrorClass, classify_diesel_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CommentPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
    match classify_diesel_error(&error) {
        DieselErrorClass::Connection => {
            CommentPersistenceError::connection("database connection error")
        }
        _ => CommentPersistenceError::query("database error"),
    }
}

fn row_to_comment(row: CommentRow) -> Result<Comment, CommentPersistenceError> {
    Comment::try_new(
        CommentId::from_uuid(row.id),
        row.description,
        UserId::from_uuid(row.author_user_id),
        IssueId::from_uuid(row.issue_id),
        row.created_at,
    )
    .map_err(|err| {
        CommentPersistenceError::query(format!("stored comment failed validation: {err}"))
    })
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCommentRow {
            id: *comment.id.as_uuid(),
            description: comment.description.as_str(),
            author_user_id: *comment.author_id.as_uuid(),
            issue_id: *comment.issue_id.as_uuid(),
            created_at: comment.created_at,
        };

        diesel::insert_into(comments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommentRow> = comments::table
            .find(*id.as_uuid())
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_comment).transpose()
    }

    async fn list_for_issue(
        &self,
        issue_id: &IssueId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::issue_id.eq(*issue_id.as_uuid()))
            .select(CommentRow::as_select())
            .order(comments::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_comment).collect()
    }

    async fn update(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Only the body is mutable; author and issue references never move.
        diesel::update(comments::table.find(*comment.id.as_uuid()))
            .set(comments::description.eq(comment.description.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(comments::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
