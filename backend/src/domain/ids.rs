//! Entity identifier newtypes.
//!
//! Every stored entity is keyed by a UUID. Each identifier gets its own
//! newtype so a `ProjectId` can never be passed where an `IssueId` is
//! expected, which matters in a crate whose whole job is deciding who may
//! touch which resource.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned when parsing an entity identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    /// Input was empty after trimming.
    Empty {
        /// Which identifier failed to parse.
        what: &'static str,
    },
    /// Input was not a canonical UUID.
    Invalid {
        /// Which identifier failed to parse.
        what: &'static str,
    },
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { what } => write!(f, "{what} must not be empty"),
            Self::Invalid { what } => write!(f, "{what} must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_entity_id {
    (
        $(#[$outer:meta])*
        $name:ident => $what:expr
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Validate and construct an identifier from string input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { what: $what });
                }
                if raw.trim() != raw {
                    return Err(IdValidationError::Invalid { what: $what });
                }
                let parsed = ::uuid::Uuid::parse_str(raw)
                    .map_err(|_| IdValidationError::Invalid { what: $what })?;
                Ok(Self(parsed))
            }

            /// Wrap an already-validated UUID.
            #[must_use]
            pub const fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_entity_id! {
    /// Stable identifier of a user principal.
    UserId => "user id"
}

define_entity_id! {
    /// Stable identifier of a project.
    ProjectId => "project id"
}

define_entity_id! {
    /// Stable identifier of an issue.
    IssueId => "issue id"
}

define_entity_id! {
    /// Stable identifier of a comment.
    CommentId => "comment id"
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    fn rejects_empty_input(#[case] value: &str) {
        let err = UserId::new(value).expect_err("empty ids rejected");
        assert_eq!(err, IdValidationError::Empty { what: "user id" });
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    fn rejects_malformed_input(#[case] value: &str) {
        let err = ProjectId::new(value).expect_err("malformed ids rejected");
        assert_eq!(err, IdValidationError::Invalid { what: "project id" });
    }

    #[rstest]
    fn round_trips_through_string() {
        let id = IssueId::random();
        let raw = String::from(id);
        let parsed = IssueId::new(&raw).expect("canonical UUID parses");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn serde_round_trip_preserves_value() {
        let id = CommentId::random();
        let json = serde_json::to_string(&id).expect("ids serialise to strings");
        let back: CommentId = serde_json::from_str(&json).expect("ids deserialise");
        assert_eq!(back, id);
    }

    #[rstest]
    fn distinct_types_share_error_shape() {
        let err = CommentId::new("nope").expect_err("malformed");
        assert_eq!(err.to_string(), "comment id must be a valid UUID");
    }
}
