//! Domain primitives, the authorization core, and the use-case services.
//!
//! Purpose: model projects, contributors, issues, and comments, and decide
//! which authenticated principal may perform which operation on which
//! resource. Entities are strongly typed and document their invariants;
//! everything transport- or storage-specific lives in the adapters.
//!
//! The authorization core is three pieces:
//! - [`MembershipResolver`] answers "is this principal a contributor, and
//!   with what role".
//! - [`hierarchy`] validates nested path chains against stored parent
//!   references.
//! - [`AccessPolicy`] evaluates the table-driven policy in [`access`].

pub mod access;
pub mod comment;
pub mod comment_service;
pub mod contributor;
pub mod error;
pub mod hierarchy;
pub mod identity;
pub mod ids;
pub mod issue;
pub mod issue_service;
pub mod membership;
pub mod ports;
pub mod project;
pub mod project_service;
pub mod user;

pub use self::access::{
    AccessPolicy, AccessRule, AccessTarget, Decision, DenyReason, Operation, ResourceKind,
    rule_for,
};
pub use self::comment::{Comment, CommentValidationError};
pub use self::comment_service::CommentService;
pub use self::contributor::{Contributor, ContributorRole, ParseContributorRoleError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hierarchy::{NestedKind, parent_kind};
pub use self::identity::IdentityService;
pub use self::ids::{CommentId, IdValidationError, IssueId, ProjectId, UserId};
pub use self::issue::{
    Issue, IssueFields, IssuePriority, IssueStatus, IssueTag, IssueValidationError,
    ParseIssueFieldError,
};
pub use self::issue_service::IssueService;
pub use self::membership::MembershipResolver;
pub use self::project::{Project, ProjectValidationError};
pub use self::project_service::ProjectService;
pub use self::user::{User, UserValidationError};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use backend::domain::{DomainResult, Error};
///
/// fn refuse() -> DomainResult<()> {
///     Err(Error::forbidden("only the project author may perform this operation"))
/// }
/// ```
pub type DomainResult<T> = Result<T, Error>;
