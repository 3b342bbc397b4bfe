//! Nested-path validation.
//!
//! Hierarchical endpoints carry independent identifiers that a client can
//! mismatch or spoof: `/projects/1/issues/2/comments/3` names three
//! resources whose stored parent links may not line up. The parent of each
//! nested kind is declared statically here, and every nested access
//! compares the fetched child's stored parent reference against the id
//! supplied in the path. A mismatch is a structural error raised before any
//! authorization is evaluated, so cross-project probing cannot leak data.
//!
//! Three-level chains are validated transitively: project→issue first, then
//! issue→comment.

use std::fmt;

use serde_json::json;

use crate::domain::access::ResourceKind;
use crate::domain::{Comment, Error, Issue, IssueId, ProjectId};

/// Resource kinds that live below another resource in the path hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    /// An issue, nested under a project.
    Issue,
    /// A comment, nested under an issue.
    Comment,
}

/// The statically declared parent of each nested kind.
///
/// This table replaces any runtime discovery of "which field points back to
/// the parent": the mapping is fixed at compile time.
#[must_use]
pub const fn parent_kind(kind: NestedKind) -> ResourceKind {
    match kind {
        NestedKind::Issue => ResourceKind::Project,
        NestedKind::Comment => ResourceKind::Issue,
    }
}

fn mismatch<Id: fmt::Display>(kind: NestedKind, stored: &Id, claimed: &Id) -> Error {
    let child = match kind {
        NestedKind::Issue => "issue",
        NestedKind::Comment => "comment",
    };
    let parent = parent_kind(kind).noun();
    Error::structural_mismatch(format!("{child} does not belong to the named {parent}"))
        .with_details(json!({
            "child": child,
            "parent": parent,
            "claimed": claimed.to_string(),
            "actual": stored.to_string(),
        }))
}

/// Check that a fetched issue belongs to the project named in the path.
pub fn ensure_issue_in_project(issue: &Issue, project_id: &ProjectId) -> Result<(), Error> {
    if issue.project_id == *project_id {
        Ok(())
    } else {
        Err(mismatch(NestedKind::Issue, &issue.project_id, project_id))
    }
}

/// Check that a fetched comment belongs to the issue named in the path.
pub fn ensure_comment_in_issue(comment: &Comment, issue_id: &IssueId) -> Result<(), Error> {
    if comment.issue_id == *issue_id {
        Ok(())
    } else {
        Err(mismatch(NestedKind::Comment, &comment.issue_id, issue_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;

    use crate::domain::{
        CommentId, ErrorCode, IssueFields, IssuePriority, IssueStatus, IssueTag, UserId,
    };

    use super::*;

    fn issue_in(project_id: ProjectId) -> Issue {
        Issue::try_new(
            crate::domain::IssueId::random(),
            IssueFields {
                title: "Crash on save".to_owned(),
                description: String::new(),
                tag: IssueTag::Bug,
                priority: IssuePriority::High,
                status: IssueStatus::ToDo,
            },
            UserId::random(),
            None,
            project_id,
            Utc::now(),
        )
        .expect("valid issue")
    }

    fn comment_on(issue_id: IssueId) -> Comment {
        Comment::try_new(
            CommentId::random(),
            "seen on main as well",
            UserId::random(),
            issue_id,
            Utc::now(),
        )
        .expect("valid comment")
    }

    #[rstest]
    #[case(NestedKind::Issue, ResourceKind::Project)]
    #[case(NestedKind::Comment, ResourceKind::Issue)]
    fn the_parent_table_is_fixed(#[case] kind: NestedKind, #[case] expected: ResourceKind) {
        assert_eq!(parent_kind(kind), expected);
    }

    #[rstest]
    fn matching_issue_chain_passes() {
        let project = ProjectId::random();
        ensure_issue_in_project(&issue_in(project), &project).expect("chain holds");
    }

    #[rstest]
    fn mismatched_issue_chain_is_structural() {
        let err = ensure_issue_in_project(&issue_in(ProjectId::random()), &ProjectId::random())
            .expect_err("mismatch");
        assert_eq!(err.code(), ErrorCode::StructuralMismatch);
        assert_eq!(
            err.details().and_then(|d| d["child"].as_str()),
            Some("issue")
        );
    }

    #[rstest]
    fn mismatched_comment_chain_is_structural() {
        let err = ensure_comment_in_issue(&comment_on(IssueId::random()), &IssueId::random())
            .expect_err("mismatch");
        assert_eq!(err.code(), ErrorCode::StructuralMismatch);
        assert_eq!(
            err.details().and_then(|d| d["parent"].as_str()),
            Some("issue")
        );
    }

    #[rstest]
    fn matching_comment_chain_passes() {
        let issue = IssueId::random();
        ensure_comment_in_issue(&comment_on(issue), &issue).expect("chain holds");
    }
}
