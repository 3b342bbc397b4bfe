//! PostgreSQL-backed `ProjectRepository` implementation using Diesel.
//!
//! `create_with_author` is the one compound write in the system: the
//! project row and its author contributor row commit in a single
//! transaction so a project can never be observed without its author.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{ProjectPersistenceError, ProjectRepository};
use crate::domain::{Contributor, Project, ProjectId, UserId};

use super::error_mapping::{DieselErrorClass, classify_diesel_error};
use super::models::{NewContributorRow, NewProjectRow, ProjectRow, ProjectUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{contributors, projects};

/// Diesel-backed implementation of the `ProjectRepository` port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProjectPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectPersistenceError {
    match classify_diesel_error(&error) {
        DieselErrorClass::Connection => {
            ProjectPersistenceError::connection("database connection error")
        }
        _ => ProjectPersistenceError::query("database error"),
    }
}

fn row_to_project(row: ProjectRow) -> Result<Project, ProjectPersistenceError> {
    Project::try_new(
        ProjectId::from_uuid(row.id),
        row.title,
        row.description,
        row.project_type,
        row.created_at,
    )
    .map_err(|err| {
        ProjectPersistenceError::query(format!("stored project failed validation: {err}"))
    })
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn create_with_author(
        &self,
        project: &Project,
        author: &Contributor,
    ) -> Result<(), ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let project_row = NewProjectRow {
            id: *project.id.as_uuid(),
            title: project.title.as_str(),
            description: project.description.as_str(),
            project_type: project.project_type.as_str(),
            created_at: project.created_at,
        };
        let author_row = NewContributorRow {
            user_id: *author.user_id.as_uuid(),
            project_id: *author.project_id.as_uuid(),
            role: "author",
            created_at: author.created_at,
        };

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(projects::table)
                    .values(&project_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(contributors::table)
                    .values(&author_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProjectRow> = projects::table
            .find(*id.as_uuid())
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_project).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Project>, ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Visibility scoping happens here: the join restricts the result to
        // projects the user contributes to.
        let rows: Vec<ProjectRow> = projects::table
            .inner_join(contributors::table)
            .filter(contributors::user_id.eq(*user_id.as_uuid()))
            .select(ProjectRow::as_select())
            .order(projects::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(projects::table.find(*project.id.as_uuid()))
            .set(&ProjectUpdate {
                title: project.title.as_str(),
                description: project.description.as_str(),
                project_type: project.project_type.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Contributors, issues, and comments follow via ON DELETE CASCADE.
        diesel::delete(projects::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
