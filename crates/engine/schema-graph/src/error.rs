use std::fmt;

use itertools::Itertools;

/// The schema element holding a type reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Referrer {
    Field(String),
    Argument(String),
    Root(String),
}

impl fmt::Display for Referrer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Referrer::Field(identifier) => write!(f, "field `{identifier}`"),
            Referrer::Argument(identifier) => write!(f, "argument `{identifier}`"),
            Referrer::Root(operation) => write!(f, "the {operation} root"),
        }
    }
}

/// A reference in the schema graph which does not resolve. Traversal stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("Unknown type `{identifier}` referenced by {referrer}. Known types: {}", .known.iter().join(", "))]
    UnknownType {
        referrer: Referrer,
        identifier: String,
        known: Vec<String>,
    },
    #[error("No type declared for {referrer}. Known types: {}", .known.iter().join(", "))]
    MissingType { referrer: Referrer, known: Vec<String> },
}

impl IntegrityError {
    pub fn referrer(&self) -> &Referrer {
        match self {
            IntegrityError::UnknownType { referrer, .. } | IntegrityError::MissingType { referrer, .. } => referrer,
        }
    }

    /// Every type identifier the registry knew about when the error was raised.
    pub fn known_types(&self) -> &[String] {
        match self {
            IntegrityError::UnknownType { known, .. } | IntegrityError::MissingType { known, .. } => known,
        }
    }
}
