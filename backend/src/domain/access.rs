//! Authorization decision engine.
//!
//! One table-driven policy replaces per-endpoint permission checks: every
//! operation is classified by `(Operation, ResourceKind)` and the table
//! names the single rule that decides it. The engine then evaluates that
//! rule against two facts: the principal's contributor record on the owning
//! project, and (for authorship-gated mutations) the resource's recorded
//! author.
//!
//! Read denials surface as `NotFound` rather than `Forbidden`: the readable
//! universe is scoped to the principal's own projects, and the existence of
//! anything outside it is never confirmed.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::ContributorRepository;
use crate::domain::{Error, MembershipResolver, ProjectId, UserId};

/// The kind of operation a principal is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List a collection.
    List,
    /// Retrieve a single resource.
    Retrieve,
    /// Create a resource.
    Create,
    /// Update a resource.
    Update,
    /// Delete a resource.
    Delete,
}

impl Operation {
    /// Whether this operation only reads data.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::List | Self::Retrieve)
    }
}

/// The kind of resource an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A project.
    Project,
    /// A contributor record.
    Contributor,
    /// An issue.
    Issue,
    /// A comment.
    Comment,
}

impl ResourceKind {
    /// Lowercase noun for messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Contributor => "contributor",
            Self::Issue => "issue",
            Self::Comment => "comment",
        }
    }
}

/// The single rule deciding an `(Operation, ResourceKind)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRule {
    /// Any authenticated principal is allowed.
    AnyPrincipal,
    /// The principal must contribute to the owning project.
    ProjectContributor,
    /// The principal must hold the author role on the owning project.
    ProjectAuthor,
    /// The principal must be the resource's recorded author.
    ResourceAuthor,
}

/// The policy table.
///
/// Reads are contributor-scoped across the board. Project creation is open
/// to any principal. Other creations require membership of the owning
/// project. Project and contributor administration is reserved to the
/// project author, while issue and comment mutation is gated on authorship
/// of the resource itself, not on any project role.
#[must_use]
pub const fn rule_for(operation: Operation, kind: ResourceKind) -> AccessRule {
    match (operation, kind) {
        (Operation::List | Operation::Retrieve, _) => AccessRule::ProjectContributor,
        (Operation::Create, ResourceKind::Project) => AccessRule::AnyPrincipal,
        (Operation::Create, _) => AccessRule::ProjectContributor,
        (Operation::Update | Operation::Delete, ResourceKind::Project | ResourceKind::Contributor) => {
            AccessRule::ProjectAuthor
        }
        (Operation::Update | Operation::Delete, ResourceKind::Issue | ResourceKind::Comment) => {
            AccessRule::ResourceAuthor
        }
    }
}

/// Why an operation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The principal does not contribute to the owning project.
    NotContributor,
    /// The principal contributes but does not hold the author role.
    NotProjectAuthor,
    /// The principal is not the resource's recorded author.
    NotResourceAuthor,
}

impl DenyReason {
    /// Stable machine-readable token surfaced in error details.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::NotContributor => "not_a_contributor",
            Self::NotProjectAuthor => "not_the_project_author",
            Self::NotResourceAuthor => "not_the_author",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::NotContributor => "you are not a contributor of this project",
            Self::NotProjectAuthor => "only the project author may perform this operation",
            Self::NotResourceAuthor => "only the author may modify this resource",
        }
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation is denied for the given reason.
    Deny(DenyReason),
}

impl Decision {
    /// Convert the decision into a domain result.
    ///
    /// Denied reads become `NotFound` so unauthorized principals cannot
    /// probe for existence; denied mutations become `Forbidden` carrying the
    /// reason token.
    pub fn into_result(self, operation: Operation, kind: ResourceKind) -> Result<(), Error> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(_) if operation.is_read() => {
                Err(Error::not_found(format!("{} not found", kind.noun())))
            }
            Self::Deny(reason) => Err(Error::forbidden(reason.message())
                .with_details(json!({ "reason": reason.token() }))),
        }
    }
}

/// Facts about the target resource fed into a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessTarget {
    /// The project owning the target resource (the target itself for
    /// project operations).
    pub project_id: ProjectId,
    /// Recorded author of the target resource, where the resource has one
    /// and the operation may be gated on it.
    pub resource_author: Option<UserId>,
}

impl AccessTarget {
    /// Target facts for an operation on the project itself or on resources
    /// without an authorship gate.
    #[must_use]
    pub const fn project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            resource_author: None,
        }
    }

    /// Target facts for an authorship-gated resource.
    #[must_use]
    pub const fn authored(project_id: ProjectId, author: UserId) -> Self {
        Self {
            project_id,
            resource_author: Some(author),
        }
    }
}

/// Policy evaluator bound to the contributor store.
#[derive(Clone)]
pub struct AccessPolicy<C> {
    membership: MembershipResolver<C>,
}

impl<C> AccessPolicy<C> {
    /// Create a policy over the given contributor repository.
    pub fn new(contributors: Arc<C>) -> Self {
        Self {
            membership: MembershipResolver::new(contributors),
        }
    }

    /// Access the underlying membership resolver.
    #[must_use]
    pub const fn membership(&self) -> &MembershipResolver<C> {
        &self.membership
    }
}

impl<C> AccessPolicy<C>
where
    C: ContributorRepository,
{
    /// Evaluate the policy table for one operation.
    ///
    /// Membership is resolved fresh from the store on every call; no
    /// decision ever reuses a previously cached contributor record.
    pub async fn decide(
        &self,
        principal: &UserId,
        operation: Operation,
        kind: ResourceKind,
        target: &AccessTarget,
    ) -> Result<Decision, Error> {
        match rule_for(operation, kind) {
            AccessRule::AnyPrincipal => Ok(Decision::Allow),
            AccessRule::ProjectContributor => {
                let membership = self
                    .membership
                    .resolve(principal, &target.project_id)
                    .await?;
                Ok(match membership {
                    Some(_) => Decision::Allow,
                    None => Decision::Deny(DenyReason::NotContributor),
                })
            }
            AccessRule::ProjectAuthor => {
                let membership = self
                    .membership
                    .resolve(principal, &target.project_id)
                    .await?;
                Ok(match membership {
                    Some(contributor) if contributor.role.is_author() => Decision::Allow,
                    Some(_) => Decision::Deny(DenyReason::NotProjectAuthor),
                    None => Decision::Deny(DenyReason::NotContributor),
                })
            }
            AccessRule::ResourceAuthor => {
                let author = target.resource_author.as_ref().ok_or_else(|| {
                    Error::internal("authorship-gated operation evaluated without an author fact")
                })?;
                Ok(if author == principal {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::NotResourceAuthor)
                })
            }
        }
    }

    /// Evaluate the policy table and convert the outcome into a result.
    pub async fn authorize(
        &self,
        principal: &UserId,
        operation: Operation,
        kind: ResourceKind,
        target: &AccessTarget,
    ) -> Result<(), Error> {
        self.decide(principal, operation, kind, target)
            .await?
            .into_result(operation, kind)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;

    use crate::domain::ports::MockContributorRepository;
    use crate::domain::{Contributor, ContributorRole, ErrorCode};

    use super::*;

    #[rstest]
    #[case(Operation::List, ResourceKind::Project, AccessRule::ProjectContributor)]
    #[case(Operation::Retrieve, ResourceKind::Issue, AccessRule::ProjectContributor)]
    #[case(Operation::Retrieve, ResourceKind::Comment, AccessRule::ProjectContributor)]
    #[case(Operation::Create, ResourceKind::Project, AccessRule::AnyPrincipal)]
    #[case(Operation::Create, ResourceKind::Contributor, AccessRule::ProjectContributor)]
    #[case(Operation::Create, ResourceKind::Issue, AccessRule::ProjectContributor)]
    #[case(Operation::Create, ResourceKind::Comment, AccessRule::ProjectContributor)]
    #[case(Operation::Update, ResourceKind::Project, AccessRule::ProjectAuthor)]
    #[case(Operation::Delete, ResourceKind::Project, AccessRule::ProjectAuthor)]
    #[case(Operation::Delete, ResourceKind::Contributor, AccessRule::ProjectAuthor)]
    #[case(Operation::Update, ResourceKind::Issue, AccessRule::ResourceAuthor)]
    #[case(Operation::Delete, ResourceKind::Issue, AccessRule::ResourceAuthor)]
    #[case(Operation::Update, ResourceKind::Comment, AccessRule::ResourceAuthor)]
    #[case(Operation::Delete, ResourceKind::Comment, AccessRule::ResourceAuthor)]
    fn the_policy_table_is_fixed(
        #[case] operation: Operation,
        #[case] kind: ResourceKind,
        #[case] expected: AccessRule,
    ) {
        assert_eq!(rule_for(operation, kind), expected);
    }

    fn contributor(user: UserId, project: ProjectId, role: ContributorRole) -> Contributor {
        Contributor::new(user, project, role, Utc::now())
    }

    fn policy_with(
        membership: Option<Contributor>,
    ) -> AccessPolicy<MockContributorRepository> {
        let mut repo = MockContributorRepository::new();
        repo.expect_find().return_once(move |_, _| Ok(membership));
        AccessPolicy::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn non_contributors_cannot_create_issues() {
        let principal = UserId::random();
        let project = ProjectId::random();
        let policy = policy_with(None);

        let err = policy
            .authorize(
                &principal,
                Operation::Create,
                ResourceKind::Issue,
                &AccessTarget::project(project),
            )
            .await
            .expect_err("denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(
            err.details().and_then(|d| d["reason"].as_str()),
            Some("not_a_contributor")
        );
    }

    #[tokio::test]
    async fn denied_reads_surface_as_not_found() {
        let principal = UserId::random();
        let project = ProjectId::random();
        let policy = policy_with(None);

        let err = policy
            .authorize(
                &principal,
                Operation::Retrieve,
                ResourceKind::Project,
                &AccessTarget::project(project),
            )
            .await
            .expect_err("denied");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn non_author_members_cannot_delete_the_project() {
        let principal = UserId::random();
        let project = ProjectId::random();
        let policy = policy_with(Some(contributor(
            principal,
            project,
            ContributorRole::Manager,
        )));

        let err = policy
            .authorize(
                &principal,
                Operation::Delete,
                ResourceKind::Project,
                &AccessTarget::project(project),
            )
            .await
            .expect_err("denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(
            err.details().and_then(|d| d["reason"].as_str()),
            Some("not_the_project_author")
        );
    }

    #[tokio::test]
    async fn the_author_contributor_administers_the_project() {
        let principal = UserId::random();
        let project = ProjectId::random();
        let policy = policy_with(Some(contributor(
            principal,
            project,
            ContributorRole::Author,
        )));

        policy
            .authorize(
                &principal,
                Operation::Update,
                ResourceKind::Project,
                &AccessTarget::project(project),
            )
            .await
            .expect("allowed");
    }

    #[tokio::test]
    async fn issue_mutation_ignores_project_role() {
        let principal = UserId::random();
        let author = UserId::random();
        let project = ProjectId::random();
        // Even the project author cannot delete someone else's issue.
        let policy = policy_with(Some(contributor(
            principal,
            project,
            ContributorRole::Author,
        )));

        let err = policy
            .authorize(
                &principal,
                Operation::Delete,
                ResourceKind::Issue,
                &AccessTarget::authored(project, author),
            )
            .await
            .expect_err("denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(
            err.details().and_then(|d| d["reason"].as_str()),
            Some("not_the_author")
        );
    }

    #[tokio::test]
    async fn resource_authors_mutate_their_own_resources() {
        let principal = UserId::random();
        let project = ProjectId::random();
        // No membership lookup is needed for authorship-gated operations.
        let policy = AccessPolicy::new(Arc::new(MockContributorRepository::new()));

        policy
            .authorize(
                &principal,
                Operation::Update,
                ResourceKind::Comment,
                &AccessTarget::authored(project, principal),
            )
            .await
            .expect("allowed");
    }

    #[tokio::test]
    async fn missing_author_fact_is_an_internal_error() {
        let principal = UserId::random();
        let project = ProjectId::random();
        let policy = AccessPolicy::new(Arc::new(MockContributorRepository::new()));

        let err = policy
            .authorize(
                &principal,
                Operation::Delete,
                ResourceKind::Comment,
                &AccessTarget::project(project),
            )
            .await
            .expect_err("caller bug");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn any_principal_may_create_a_project() {
        let principal = UserId::random();
        let project = ProjectId::random();
        let policy = AccessPolicy::new(Arc::new(MockContributorRepository::new()));

        policy
            .authorize(
                &principal,
                Operation::Create,
                ResourceKind::Project,
                &AccessTarget::project(project),
            )
            .await
            .expect("allowed");
    }
}
