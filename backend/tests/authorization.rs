//! End-to-end coverage of the policy table: contributor-scoped reads,
//! membership-gated creation, and authorship-gated mutation.

use std::sync::Arc;

use backend::domain::ports::{
    AddContributorRequest, ContributorCommand, CreateIssueRequest, CreateProjectRequest,
    IssueCommand, IssuePath, IssueQuery, ProjectCommand, ProjectQuery, UpdateIssueRequest,
    UpdateProjectRequest,
};
use backend::domain::{
    ContributorRole, ErrorCode, Issue, IssuePriority, IssueStatus, IssueTag, Project,
    ProjectService, User,
};
use backend::domain::{IssueService, ProjectId};
use backend::test_support::InMemoryTracker;

type Projects = ProjectService<InMemoryTracker, InMemoryTracker, InMemoryTracker>;
type Issues = IssueService<InMemoryTracker, InMemoryTracker, InMemoryTracker, InMemoryTracker>;

struct Harness {
    store: Arc<InMemoryTracker>,
    projects: Projects,
    issues: Issues,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryTracker::new());
        Self {
            projects: ProjectService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
            ),
            issues: IssueService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
            ),
            store,
        }
    }

    async fn create_project(&self, owner: &User, title: &str) -> Project {
        self.projects
            .create_project(
                &owner.id,
                CreateProjectRequest {
                    title: title.to_owned(),
                    description: String::new(),
                    project_type: "back-end".to_owned(),
                },
            )
            .await
            .expect("project creation succeeds")
    }

    async fn add_member(&self, principal: &User, project_id: &ProjectId, member: &User) {
        self.projects
            .add_contributor(
                &principal.id,
                project_id,
                AddContributorRequest {
                    user_id: member.id,
                    role: ContributorRole::Manager,
                },
            )
            .await
            .expect("contributor add succeeds");
    }

    async fn file_issue(&self, author: &User, project_id: &ProjectId, title: &str) -> Issue {
        self.issues
            .create_issue(
                &author.id,
                project_id,
                CreateIssueRequest {
                    title: title.to_owned(),
                    description: String::new(),
                    tag: IssueTag::Bug,
                    priority: IssuePriority::Medium,
                    status: IssueStatus::ToDo,
                    assignee_id: None,
                },
            )
            .await
            .expect("issue filed")
    }
}

#[tokio::test]
async fn non_contributors_cannot_file_issues() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let mallory = harness
        .store
        .seed_user("Mallory", "Intruder", "mallory@example.org");

    let project = harness.create_project(&ada, "Widget").await;

    // Scenario B.
    let err = harness
        .issues
        .create_issue(
            &mallory.id,
            &project.id,
            CreateIssueRequest {
                title: "Sneaky".to_owned(),
                description: String::new(),
                tag: IssueTag::Task,
                priority: IssuePriority::Low,
                status: IssueStatus::ToDo,
                assignee_id: None,
            },
        )
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        err.details().and_then(|d| d["reason"].as_str()),
        Some("not_a_contributor")
    );
}

#[tokio::test]
async fn issue_mutation_is_gated_on_authorship_not_role() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");
    let lin = harness.store.seed_user("Lin", "Chen", "lin@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;
    harness.add_member(&ada, &project.id, &lin).await;

    // Scenario C: a manager files an issue, assigned to themself by default.
    let issue = harness.file_issue(&grace, &project.id, "Bug1").await;
    assert_eq!(issue.author_id, grace.id);
    assert_eq!(issue.assignee_id, grace.id);

    let lin_issue = harness.file_issue(&lin, &project.id, "Bug2").await;
    let path = IssuePath {
        project_id: project.id,
        issue_id: lin_issue.id,
    };

    // Grace is a contributor, but not the author of Lin's issue.
    let err = harness
        .issues
        .delete_issue(&grace.id, &path)
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        err.details().and_then(|d| d["reason"].as_str()),
        Some("not_the_author")
    );

    // The author deletes their own issue.
    harness
        .issues
        .delete_issue(&lin.id, &path)
        .await
        .expect("author deletes own issue");
}

#[tokio::test]
async fn reads_are_scoped_to_contributed_projects() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let mallory = harness
        .store
        .seed_user("Mallory", "Intruder", "mallory@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.create_project(&mallory, "Mallory's own").await;

    // Outsiders get "not found", never "forbidden", for reads.
    let err = harness
        .projects
        .fetch_project(&mallory.id, &project.id)
        .await
        .expect_err("hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = harness
        .issues
        .list_issues(&mallory.id, &project.id)
        .await
        .expect_err("hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);

    // Listings only contain the principal's own projects.
    let visible = harness
        .projects
        .list_projects(&mallory.id)
        .await
        .expect("listing succeeds");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Mallory's own");
}

#[tokio::test]
async fn only_the_project_author_updates_or_deletes_the_project() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;

    let err = harness
        .projects
        .update_project(
            &grace.id,
            &project.id,
            UpdateProjectRequest {
                title: Some("Grace's Widget".to_owned()),
                ..UpdateProjectRequest::default()
            },
        )
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        err.details().and_then(|d| d["reason"].as_str()),
        Some("not_the_project_author")
    );

    let updated = harness
        .projects
        .update_project(
            &ada.id,
            &project.id,
            UpdateProjectRequest {
                title: Some("Widget 2".to_owned()),
                ..UpdateProjectRequest::default()
            },
        )
        .await
        .expect("author updates");
    assert_eq!(updated.title, "Widget 2");
    assert_eq!(updated.created_at, project.created_at);
}

#[tokio::test]
async fn issue_updates_preserve_immutable_references() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;
    let issue = harness.file_issue(&ada, &project.id, "Bug1").await;
    let path = IssuePath {
        project_id: project.id,
        issue_id: issue.id,
    };

    let updated = harness
        .issues
        .update_issue(
            &ada.id,
            &path,
            UpdateIssueRequest {
                status: Some(IssueStatus::InProgress),
                assignee_id: Some(grace.id),
                ..UpdateIssueRequest::default()
            },
        )
        .await
        .expect("author updates own issue");

    assert_eq!(updated.author_id, issue.author_id);
    assert_eq!(updated.project_id, issue.project_id);
    assert_eq!(updated.created_at, issue.created_at);
    assert_eq!(updated.assignee_id, grace.id);
    assert_eq!(updated.status, IssueStatus::InProgress);

    let fetched = harness
        .issues
        .fetch_issue(&ada.id, &path)
        .await
        .expect("author reads the issue");
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn authorship_survives_contributor_removal() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;
    let issue = harness.file_issue(&grace, &project.id, "Bug1").await;

    harness
        .projects
        .remove_contributor(&ada.id, &project.id, &grace.id)
        .await
        .expect("author removes grace");

    // Mutation is gated on authorship alone; project role is irrelevant.
    let path = IssuePath {
        project_id: project.id,
        issue_id: issue.id,
    };
    harness
        .issues
        .update_issue(
            &grace.id,
            &path,
            UpdateIssueRequest {
                status: Some(IssueStatus::Completed),
                ..UpdateIssueRequest::default()
            },
        )
        .await
        .expect("the author may still mutate their issue");

    // Reads are membership-scoped, so the same principal can no longer
    // retrieve it.
    let err = harness
        .issues
        .fetch_issue(&grace.id, &path)
        .await
        .expect_err("hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
