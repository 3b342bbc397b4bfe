//! Shared classification of Diesel errors for the repository adapters.
//!
//! Adapters never leak raw database messages into port errors; they log the
//! detail at debug level and hand the domain a coarse, stable description.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselErrorClass {
    /// The connection dropped or the database is unreachable.
    Connection,
    /// A uniqueness constraint rejected the write.
    UniqueViolation,
    /// Everything else: bad queries, serialisation failures, missing rows.
    Query,
}

/// Classify a Diesel error, logging the underlying detail.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselErrorClass {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselErrorClass::UniqueViolation,
                DatabaseErrorKind::ClosedConnection => DieselErrorClass::Connection,
                _ => DieselErrorClass::Query,
            }
        }
        other => {
            debug!(
                error_type = %std::any::type_name_of_val(other),
                "diesel operation failed"
            );
            DieselErrorClass::Query
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn unique_violations_are_classified() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert_eq!(
            classify_diesel_error(&error),
            DieselErrorClass::UniqueViolation
        );
    }

    #[test]
    fn closed_connections_are_classified() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection unexpectedly".to_owned()),
        );
        assert_eq!(classify_diesel_error(&error), DieselErrorClass::Connection);
    }

    #[test]
    fn everything_else_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(&DieselError::NotFound),
            DieselErrorClass::Query
        );
    }
}
