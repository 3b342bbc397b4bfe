//! End-to-end coverage of the project and contributor lifecycle over the
//! in-memory store: author creation, uniqueness, and the reserved-role
//! invariants.

use std::sync::Arc;

use backend::domain::ports::{
    AddContributorRequest, CommentCommand, ContributorCommand, ContributorQuery,
    CreateCommentRequest, CreateIssueRequest, CreateProjectRequest, IssueCommand, IssuePath,
    ProjectCommand,
};
use backend::domain::{
    CommentService, ContributorRole, ErrorCode, IssuePriority, IssueStatus, IssueTag, Project,
    ProjectService, User,
};
use backend::domain::{IssueService, ProjectId};
use backend::test_support::InMemoryTracker;

type Projects = ProjectService<InMemoryTracker, InMemoryTracker, InMemoryTracker>;
type Issues = IssueService<InMemoryTracker, InMemoryTracker, InMemoryTracker, InMemoryTracker>;
type Comments = CommentService<InMemoryTracker, InMemoryTracker, InMemoryTracker, InMemoryTracker>;

struct Harness {
    store: Arc<InMemoryTracker>,
    projects: Projects,
    issues: Issues,
    comments: Comments,
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
            comments: CommentService::new(
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
}

#[tokio::test]
async fn creating_a_project_registers_exactly_one_author_contributor() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");

    let project = harness.create_project(&ada, "Widget").await;

    let members = harness.store.contributors_of(&project.id);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, ada.id);
    assert_eq!(members[0].role, ContributorRole::Author);
    assert_eq!(harness.store.author_count(&project.id), 1);
}

#[tokio::test]
async fn contributors_can_attach_new_members_with_non_author_roles() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");
    let lin = harness.store.seed_user("Lin", "Chen", "lin@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;

    // A non-author contributor may add members too.
    harness
        .projects
        .add_contributor(
            &grace.id,
            &project.id,
            AddContributorRequest {
                user_id: lin.id,
                role: ContributorRole::Creator,
            },
        )
        .await
        .expect("non-author contributors may add members");

    let members = harness
        .projects
        .list_contributors(&ada.id, &project.id)
        .await
        .expect("author can list members");
    assert_eq!(members.len(), 3);
    assert_eq!(harness.store.author_count(&project.id), 1);
}

#[tokio::test]
async fn granting_the_author_role_is_always_rejected() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;

    // Scenario D: even the project author cannot grant the author role.
    let err = harness
        .projects
        .add_contributor(
            &ada.id,
            &project.id,
            AddContributorRequest {
                user_id: grace.id,
                role: ContributorRole::Author,
            },
        )
        .await
        .expect_err("reserved role");
    assert_eq!(err.code(), ErrorCode::ReservedRole);
    assert_eq!(harness.store.author_count(&project.id), 1);
}

#[tokio::test]
async fn duplicate_contributors_are_rejected() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;

    let err = harness
        .projects
        .add_contributor(
            &ada.id,
            &project.id,
            AddContributorRequest {
                user_id: grace.id,
                role: ContributorRole::Creator,
            },
        )
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::DuplicateContributor);
    assert_eq!(harness.store.contributors_of(&project.id).len(), 2);
}

#[tokio::test]
async fn concurrent_identical_adds_have_exactly_one_winner() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;

    let request = || AddContributorRequest {
        user_id: grace.id,
        role: ContributorRole::Manager,
    };
    let (first, second) = tokio::join!(
        harness
            .projects
            .add_contributor(&ada.id, &project.id, request()),
        harness
            .projects
            .add_contributor(&ada.id, &project.id, request()),
    );

    let outcomes = [first, second];
    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one add wins");
    let loser = outcomes
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one add loses");
    assert_eq!(loser.code(), ErrorCode::DuplicateContributor);
    assert_eq!(harness.store.contributors_of(&project.id).len(), 2);
}

#[tokio::test]
async fn non_contributors_cannot_attach_members() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let mallory = harness
        .store
        .seed_user("Mallory", "Intruder", "mallory@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");

    let project = harness.create_project(&ada, "Widget").await;

    let err = harness
        .projects
        .add_contributor(
            &mallory.id,
            &project.id,
            AddContributorRequest {
                user_id: grace.id,
                role: ContributorRole::Manager,
            },
        )
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn unknown_target_users_are_not_found() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let project = harness.create_project(&ada, "Widget").await;

    let err = harness
        .projects
        .add_contributor(
            &ada.id,
            &project.id,
            AddContributorRequest {
                user_id: backend::domain::UserId::random(),
                role: ContributorRole::Manager,
            },
        )
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn only_the_author_detaches_members_and_never_the_author_record() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");
    let grace = harness.store.seed_user("Grace", "Hopper", "grace@example.org");
    let lin = harness.store.seed_user("Lin", "Chen", "lin@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    harness.add_member(&ada, &project.id, &grace).await;
    harness.add_member(&ada, &project.id, &lin).await;

    // A non-author contributor cannot detach anyone.
    let err = harness
        .projects
        .remove_contributor(&grace.id, &project.id, &lin.id)
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    // The author contributor can never be removed, not even by themself.
    let err = harness
        .projects
        .remove_contributor(&ada.id, &project.id, &ada.id)
        .await
        .expect_err("reserved");
    assert_eq!(err.code(), ErrorCode::ReservedRole);
    assert_eq!(harness.store.author_count(&project.id), 1);

    // The author detaches an ordinary member.
    harness
        .projects
        .remove_contributor(&ada.id, &project.id, &grace.id)
        .await
        .expect("author removes a member");
    assert_eq!(harness.store.contributors_of(&project.id).len(), 2);

    // Detaching someone who is not a member is not found.
    let err = harness
        .projects
        .remove_contributor(&ada.id, &project.id, &grace.id)
        .await
        .expect_err("already gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn deleting_a_project_cascades_to_issues_and_comments() {
    let harness = Harness::new();
    let ada = harness.store.seed_user("Ada", "Lovelace", "ada@example.org");

    let project = harness.create_project(&ada, "Widget").await;
    let issue = harness
        .issues
        .create_issue(
            &ada.id,
            &project.id,
            CreateIssueRequest {
                title: "Bug1".to_owned(),
                description: String::new(),
                tag: IssueTag::Bug,
                priority: IssuePriority::High,
                status: IssueStatus::ToDo,
                assignee_id: None,
            },
        )
        .await
        .expect("issue filed");
    harness
        .comments
        .create_comment(
            &ada.id,
            &IssuePath {
                project_id: project.id,
                issue_id: issue.id,
            },
            CreateCommentRequest {
                description: "first".to_owned(),
            },
        )
        .await
        .expect("comment posted");

    harness
        .projects
        .delete_project(&ada.id, &project.id)
        .await
        .expect("author deletes the project");

    assert!(!harness.store.project_exists(&project.id));
    assert!(!harness.store.issue_exists(&issue.id));
    assert!(harness.store.contributors_of(&project.id).is_empty());
}
