//! Issue-tracker backend library.
//!
//! A project-issue-tracking API whose core is relationship-based
//! authorization: contributors see their projects, project authors
//! administer them, and issue/comment mutation is gated on authorship. The
//! crate is organised hexagonally; see [`domain`] for the core and the
//! `inbound`/`outbound` modules for the adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
