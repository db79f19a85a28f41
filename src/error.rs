//! Error types for this crate.
use thiserror::Error;

use crate::{Role, StudentId};

/// Why a row of an import was discarded before reaching the store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum RejectReason {
    #[error("missing field")]
    MissingField,
    #[error("invalid marks value '{0}'")]
    InvalidMarks(String),
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("unknown exam type '{0}'")]
pub struct UnknownExamKind(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

/// Any failure reported by a [crate::MarkStore]. None of them are fatal to an import.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum StoreError {
    #[error("lookup error: {0}")]
    Lookup(String),
    #[error("insert error: {0}")]
    Insert(String),
    #[error("update error: {0}")]
    Update(String),
}

/// The acting session is not allowed to perform an operation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum AccessError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("a {role} may not {action}")]
    Forbidden { role: Role, action: Action },
}

/// Operations subject to an authorization check.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    ImportMarks,
    ViewMarks(StudentId),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::ImportMarks => f.write_str("import marks"),
            Action::ViewMarks(student) => write!(f, "view the marks of '{}'", student),
        }
    }
}
