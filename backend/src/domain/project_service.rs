//! Project and contributor lifecycle services.
//!
//! Implements the project driving ports, including the two compound
//! operations: creating a project together with its author contributor (one
//! store transaction, both writes or neither), and attaching or detaching
//! contributors under the uniqueness and reserved-role invariants.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::access::{AccessPolicy, AccessTarget, Operation, ResourceKind};
use crate::domain::membership::map_contributor_error;
use crate::domain::ports::{
    AddContributorRequest, ContributorCommand, ContributorPersistenceError, ContributorQuery,
    ContributorRepository, CreateProjectRequest, ProjectCommand, ProjectMember,
    ProjectPersistenceError, ProjectQuery, ProjectRepository, UpdateProjectRequest,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Contributor, ContributorRole, Error, Project, ProjectId, ProjectValidationError, UserId,
};

pub(crate) fn map_project_error(error: ProjectPersistenceError) -> Error {
    match error {
        ProjectPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectPersistenceError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_project_validation(error: &ProjectValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

fn duplicate_contributor_error(user_id: &UserId, project_id: &ProjectId) -> Error {
    Error::duplicate_contributor("this user is already a contributor of the project")
        .with_details(json!({
            "userId": user_id.to_string(),
            "projectId": project_id.to_string(),
        }))
}

/// Project and contributor use-cases over the repositories.
#[derive(Clone)]
pub struct ProjectService<P, C, U> {
    projects: Arc<P>,
    contributors: Arc<C>,
    users: Arc<U>,
    policy: AccessPolicy<C>,
}

impl<P, C, U> ProjectService<P, C, U> {
    /// Create a service over the given repositories.
    pub fn new(projects: Arc<P>, contributors: Arc<C>, users: Arc<U>) -> Self {
        let policy = AccessPolicy::new(Arc::clone(&contributors));
        Self {
            projects,
            contributors,
            users,
            policy,
        }
    }
}

impl<P, C, U> ProjectService<P, C, U>
where
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    /// Fetch a project record or fail with `NotFound`.
    async fn require_project(&self, project_id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await
            .map_err(map_project_error)?
            .ok_or_else(|| Error::not_found("project not found"))
    }
}

#[async_trait]
impl<P, C, U> ProjectQuery for ProjectService<P, C, U>
where
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    async fn list_projects(&self, principal: &UserId) -> Result<Vec<Project>, Error> {
        // The listing is scoped at the store: only projects the principal
        // contributes to are ever loaded, so no per-object check is needed.
        self.projects
            .list_for_user(principal)
            .await
            .map_err(map_project_error)
    }

    async fn fetch_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Project, Error> {
        let project = self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::Retrieve,
                ResourceKind::Project,
                &AccessTarget::project(project.id),
            )
            .await?;
        Ok(project)
    }
}

#[async_trait]
impl<P, C, U> ProjectCommand for ProjectService<P, C, U>
where
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    async fn create_project(
        &self,
        principal: &UserId,
        request: CreateProjectRequest,
    ) -> Result<Project, Error> {
        let project_id = ProjectId::random();
        self.policy
            .authorize(
                principal,
                Operation::Create,
                ResourceKind::Project,
                &AccessTarget::project(project_id),
            )
            .await?;

        let now = Utc::now();
        let project = Project::try_new(
            project_id,
            request.title,
            request.description,
            request.project_type,
            now,
        )
        .map_err(|err| map_project_validation(&err))?;
        let author = Contributor::new(*principal, project_id, ContributorRole::Author, now);

        self.projects
            .create_with_author(&project, &author)
            .await
            .map_err(map_project_error)?;
        Ok(project)
    }

    async fn update_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        request: UpdateProjectRequest,
    ) -> Result<Project, Error> {
        let current = self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::Update,
                ResourceKind::Project,
                &AccessTarget::project(current.id),
            )
            .await?;

        let updated = Project::try_new(
            current.id,
            request.title.unwrap_or(current.title),
            request.description.unwrap_or(current.description),
            request.project_type.unwrap_or(current.project_type),
            current.created_at,
        )
        .map_err(|err| map_project_validation(&err))?;

        self.projects
            .update(&updated)
            .await
            .map_err(map_project_error)?;
        Ok(updated)
    }

    async fn delete_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<(), Error> {
        let project = self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::Delete,
                ResourceKind::Project,
                &AccessTarget::project(project.id),
            )
            .await?;

        // Contributors, issues, and comments go with the project; the store
        // cascades the deletes inside one transaction.
        self.projects
            .delete(project_id)
            .await
            .map_err(map_project_error)
    }
}

#[async_trait]
impl<P, C, U> ContributorQuery for ProjectService<P, C, U>
where
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    async fn list_contributors(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectMember>, Error> {
        let project = self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::List,
                ResourceKind::Contributor,
                &AccessTarget::project(project.id),
            )
            .await?;

        let contributors = self
            .contributors
            .list_for_project(project_id)
            .await
            .map_err(map_contributor_error)?;
        let user_ids: Vec<UserId> = contributors.iter().map(|c| c.user_id).collect();
        let users: HashMap<UserId, _> = self
            .users
            .find_by_ids(&user_ids)
            .await
            .map_err(map_user_error)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        contributors
            .into_iter()
            .map(|contributor| {
                users
                    .get(&contributor.user_id)
                    .cloned()
                    .map(|user| ProjectMember {
                        user,
                        role: contributor.role,
                    })
                    .ok_or_else(|| {
                        Error::internal("contributor record references an unknown user")
                    })
            })
            .collect()
    }
}

#[async_trait]
impl<P, C, U> ContributorCommand for ProjectService<P, C, U>
where
    P: ProjectRepository,
    C: ContributorRepository,
    U: UserRepository,
{
    async fn add_contributor(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        request: AddContributorRequest,
    ) -> Result<Contributor, Error> {
        let project = self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::Create,
                ResourceKind::Contributor,
                &AccessTarget::project(project.id),
            )
            .await?;

        if request.role.is_author() {
            return Err(Error::reserved_role(
                "the author role is assigned at project creation and cannot be granted",
            )
            .with_details(json!({ "role": ContributorRole::Author.to_string() })));
        }

        let target = self
            .users
            .find_by_id(&request.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        if self
            .policy
            .membership()
            .resolve(&target.id, project_id)
            .await?
            .is_some()
        {
            return Err(duplicate_contributor_error(&target.id, project_id));
        }

        let contributor = Contributor::new(target.id, *project_id, request.role, Utc::now());
        match self.contributors.insert(&contributor).await {
            Ok(()) => Ok(contributor),
            // A concurrent identical add won the race; this caller is the
            // loser and observes the duplicate.
            Err(ContributorPersistenceError::Duplicate { .. }) => {
                Err(duplicate_contributor_error(&target.id, project_id))
            }
            Err(err) => Err(map_contributor_error(err)),
        }
    }

    async fn remove_contributor(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        target_user_id: &UserId,
    ) -> Result<(), Error> {
        let project = self.require_project(project_id).await?;
        self.policy
            .authorize(
                principal,
                Operation::Delete,
                ResourceKind::Contributor,
                &AccessTarget::project(project.id),
            )
            .await?;

        let target = self
            .policy
            .membership()
            .resolve(target_user_id, project_id)
            .await?
            .ok_or_else(|| Error::not_found("contributor not found"))?;

        if target.role.is_author() {
            // Rejected regardless of who asks, the author included; a
            // project must keep exactly one author contributor.
            return Err(Error::reserved_role(
                "the author contributor cannot be removed from the project",
            )
            .with_details(json!({ "role": ContributorRole::Author.to_string() })));
        }

        let removed = self
            .contributors
            .delete(target_user_id, project_id)
            .await
            .map_err(map_contributor_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("contributor not found"))
        }
    }
}
