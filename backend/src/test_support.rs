//! Test utilities for the backend crate.
//!
//! Provides an in-memory implementation of every driven port so unit and
//! integration tests can exercise the real domain services without a
//! database. Only compiled for tests or behind the `test-support` feature.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, ContributorPersistenceError,
    ContributorRepository, IssuePersistenceError, IssueRepository, ProjectPersistenceError,
    ProjectRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, CommentId, Contributor, Issue, IssueId, Project, ProjectId, User, UserId,
};

/// In-memory store implementing all driven ports behind mutex-guarded maps.
///
/// Mirrors the store semantics the domain relies on: the contributor map is
/// keyed by `(user, project)` so duplicate inserts fail the way the
/// database's composite primary key does, and project/issue deletion
/// cascades.
#[derive(Default)]
pub struct InMemoryTracker {
    users: Mutex<HashMap<UserId, User>>,
    projects: Mutex<HashMap<ProjectId, Project>>,
    contributors: Mutex<HashMap<(UserId, ProjectId), Contributor>>,
    issues: Mutex<HashMap<IssueId, Issue>>,
    comments: Mutex<HashMap<CommentId, Comment>>,
}

impl InMemoryTracker {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user, standing in for the external identity subsystem.
    pub fn seed_user(&self, first_name: &str, last_name: &str, email: &str) -> User {
        let user = User::try_new(UserId::random(), first_name, last_name, email)
            .expect("seeded users must be valid");
        self.users
            .lock()
            .expect("user store poisoned")
            .insert(user.id, user.clone());
        user
    }

    /// Count the contributors of a project holding the author role.
    pub fn author_count(&self, project_id: &ProjectId) -> usize {
        self.contributors
            .lock()
            .expect("contributor store poisoned")
            .values()
            .filter(|c| c.project_id == *project_id && c.role.is_author())
            .count()
    }

    /// Snapshot the contributors of a project.
    pub fn contributors_of(&self, project_id: &ProjectId) -> Vec<Contributor> {
        self.contributors
            .lock()
            .expect("contributor store poisoned")
            .values()
            .filter(|c| c.project_id == *project_id)
            .cloned()
            .collect()
    }

    /// Whether a project record still exists.
    pub fn project_exists(&self, project_id: &ProjectId) -> bool {
        self.projects
            .lock()
            .expect("project store poisoned")
            .contains_key(project_id)
    }

    /// Whether an issue record still exists.
    pub fn issue_exists(&self, issue_id: &IssueId) -> bool {
        self.issues
            .lock()
            .expect("issue store poisoned")
            .contains_key(issue_id)
    }
}

#[async_trait]
impl UserRepository for InMemoryTracker {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("user store poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("user store poisoned")
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.lock().expect("user store poisoned");
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryTracker {
    async fn create_with_author(
        &self,
        project: &Project,
        author: &Contributor,
    ) -> Result<(), ProjectPersistenceError> {
        // Both maps are written under the project lock, which is as atomic
        // as the in-memory stand-in needs to be.
        let mut projects = self.projects.lock().expect("project store poisoned");
        let mut contributors = self.contributors.lock().expect("contributor store poisoned");
        projects.insert(project.id, project.clone());
        contributors.insert((author.user_id, author.project_id), author.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectPersistenceError> {
        Ok(self
            .projects
            .lock()
            .expect("project store poisoned")
            .get(id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Project>, ProjectPersistenceError> {
        let contributors = self.contributors.lock().expect("contributor store poisoned");
        let projects = self.projects.lock().expect("project store poisoned");
        let mut visible: Vec<Project> = contributors
            .values()
            .filter(|c| c.user_id == *user_id)
            .filter_map(|c| projects.get(&c.project_id).cloned())
            .collect();
        visible.sort_by_key(|p| p.created_at);
        Ok(visible)
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectPersistenceError> {
        self.projects
            .lock()
            .expect("project store poisoned")
            .insert(project.id, project.clone());
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectPersistenceError> {
        let mut projects = self.projects.lock().expect("project store poisoned");
        let mut contributors = self.contributors.lock().expect("contributor store poisoned");
        let mut issues = self.issues.lock().expect("issue store poisoned");
        let mut comments = self.comments.lock().expect("comment store poisoned");

        projects.remove(id);
        contributors.retain(|_, c| c.project_id != *id);
        let removed_issues: Vec<IssueId> = issues
            .values()
            .filter(|issue| issue.project_id == *id)
            .map(|issue| issue.id)
            .collect();
        issues.retain(|_, issue| issue.project_id != *id);
        comments.retain(|_, comment| !removed_issues.contains(&comment.issue_id));
        Ok(())
    }
}

#[async_trait]
impl ContributorRepository for InMemoryTracker {
    async fn insert(&self, contributor: &Contributor) -> Result<(), ContributorPersistenceError> {
        let mut contributors = self.contributors.lock().expect("contributor store poisoned");
        let key = (contributor.user_id, contributor.project_id);
        if contributors.contains_key(&key) {
            return Err(ContributorPersistenceError::duplicate(
                contributor.user_id.to_string(),
                contributor.project_id.to_string(),
            ));
        }
        contributors.insert(key, contributor.clone());
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Contributor>, ContributorPersistenceError> {
        Ok(self
            .contributors
            .lock()
            .expect("contributor store poisoned")
            .get(&(*user_id, *project_id))
            .cloned())
    }

    async fn list_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Contributor>, ContributorPersistenceError> {
        let mut members: Vec<Contributor> = self
            .contributors
            .lock()
            .expect("contributor store poisoned")
            .values()
            .filter(|c| c.project_id == *project_id)
            .cloned()
            .collect();
        members.sort_by_key(|c| c.created_at);
        Ok(members)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<bool, ContributorPersistenceError> {
        Ok(self
            .contributors
            .lock()
            .expect("contributor store poisoned")
            .remove(&(*user_id, *project_id))
            .is_some())
    }
}

#[async_trait]
impl IssueRepository for InMemoryTracker {
    async fn insert(&self, issue: &Issue) -> Result<(), IssuePersistenceError> {
        self.issues
            .lock()
            .expect("issue store poisoned")
            .insert(issue.id, issue.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, IssuePersistenceError> {
        Ok(self
            .issues
            .lock()
            .expect("issue store poisoned")
            .get(id)
            .cloned())
    }

    async fn list_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Issue>, IssuePersistenceError> {
        let mut filed: Vec<Issue> = self
            .issues
            .lock()
            .expect("issue store poisoned")
            .values()
            .filter(|issue| issue.project_id == *project_id)
            .cloned()
            .collect();
        filed.sort_by_key(|issue| issue.created_at);
        Ok(filed)
    }

    async fn update(&self, issue: &Issue) -> Result<(), IssuePersistenceError> {
        self.issues
            .lock()
            .expect("issue store poisoned")
            .insert(issue.id, issue.clone());
        Ok(())
    }

    async fn delete(&self, id: &IssueId) -> Result<(), IssuePersistenceError> {
        let mut issues = self.issues.lock().expect("issue store poisoned");
        let mut comments = self.comments.lock().expect("comment store poisoned");
        issues.remove(id);
        comments.retain(|_, comment| comment.issue_id != *id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryTracker {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        self.comments
            .lock()
            .expect("comment store poisoned")
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        Ok(self
            .comments
            .lock()
            .expect("comment store poisoned")
            .get(id)
            .cloned())
    }

    async fn list_for_issue(
        &self,
        issue_id: &IssueId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut posted: Vec<Comment> = self
            .comments
            .lock()
            .expect("comment store poisoned")
            .values()
            .filter(|comment| comment.issue_id == *issue_id)
            .cloned()
            .collect();
        posted.sort_by_key(|comment| comment.created_at);
        Ok(posted)
    }

    async fn update(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        self.comments
            .lock()
            .expect("comment store poisoned")
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentPersistenceError> {
        self.comments
            .lock()
            .expect("comment store poisoned")
            .remove(id);
        Ok(())
    }
}
