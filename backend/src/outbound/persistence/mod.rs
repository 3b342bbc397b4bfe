//! PostgreSQL persistence adapters for the domain's driven ports.
//!
//! Each repository adapter maps its Diesel failures into the typed errors
//! declared by the corresponding port; row structs in [`models`] stay
//! private to this module.

mod diesel_comment_repository;
mod diesel_contributor_repository;
mod diesel_issue_repository;
mod diesel_project_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_contributor_repository::DieselContributorRepository;
pub use diesel_issue_repository::DieselIssueRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
