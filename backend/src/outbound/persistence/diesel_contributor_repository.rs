//! PostgreSQL-backed `ContributorRepository` implementation using Diesel.
//!
//! The composite primary key on `(user_id, project_id)` is the uniqueness
//! constraint the lifecycle manager relies on: a concurrent duplicate add
//! loses here with a unique violation, which this adapter translates into
//! the port's `Duplicate` variant.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContributorPersistenceError, ContributorRepository};
use crate::domain::{Contributor, ContributorRole, ProjectId, UserId};

use super::error_mapping::{DieselErrorClass, classify_diesel_error};
use super::models::{ContributorRow, NewContributorRow};
use super::pool::{DbPool, PoolError};
use super::schema::contributors;

/// Diesel-backed implementation of the `ContributorRepository` port.
#[derive(Clone)]
pub struct DieselContributorRepository {
    pool: DbPool,
}

impl DieselContributorRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContributorPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContributorPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ContributorPersistenceError {
    match classify_diesel_error(&error) {
        DieselErrorClass::Connection => {
            ContributorPersistenceError::connection("database connection error")
        }
        _ => ContributorPersistenceError::query("database error"),
    }
}

fn row_to_contributor(row: ContributorRow) -> Result<Contributor, ContributorPersistenceError> {
    let role: ContributorRole = row.role.parse().map_err(|err| {
        ContributorPersistenceError::query(format!("stored contributor role is invalid: {err}"))
    })?;
    Ok(Contributor::new(
        UserId::from_uuid(row.user_id),
        ProjectId::from_uuid(row.project_id),
        role,
        row.created_at,
    ))
}

#[async_trait]
impl ContributorRepository for DieselContributorRepository {
    async fn insert(&self, contributor: &Contributor) -> Result<(), ContributorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let role = contributor.role.to_string();
        let row = NewContributorRow {
            user_id: *contributor.user_id.as_uuid(),
            project_id: *contributor.project_id.as_uuid(),
            role: role.as_str(),
            created_at: contributor.created_at,
        };

        diesel::insert_into(contributors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(&error) {
                DieselErrorClass::UniqueViolation => ContributorPersistenceError::duplicate(
                    contributor.user_id.to_string(),
                    contributor.project_id.to_string(),
                ),
                DieselErrorClass::Connection => {
                    ContributorPersistenceError::connection("database connection error")
                }
                DieselErrorClass::Query => ContributorPersistenceError::query("database error"),
            })?;
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Contributor>, ContributorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContributorRow> = contributors::table
            .find((*user_id.as_uuid(), *project_id.as_uuid()))
            .select(ContributorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contributor).transpose()
    }

    async fn list_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Contributor>, ContributorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContributorRow> = contributors::table
            .filter(contributors::project_id.eq(*project_id.as_uuid()))
            .select(ContributorRow::as_select())
            .order(contributors::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_contributor).collect()
    }

    async fn delete(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<bool, ContributorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            contributors::table.find((*user_id.as_uuid(), *project_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
