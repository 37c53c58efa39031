//! Errors raised by the document store

use std::fmt;

use thiserror::Error;

/// Which kind of record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Folder,
    File,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "Folder"),
            Self::File => write!(f, "File"),
        }
    }
}

/// A rejected store mutation.
///
/// Every variant is recoverable: the store is left exactly as it was before the
/// call, and the caller is expected to surface the message to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A name was empty after trimming
    #[error("{kind} name cannot be empty")]
    Validation { kind: RecordKind },

    /// An id did not resolve, or the file is not owned by the given folder
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    /// The mutation would break a store invariant
    #[error("{0}")]
    Invariant(&'static str),
}

impl StoreError {
    pub(crate) fn folder_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: RecordKind::Folder,
            id: id.into(),
        }
    }

    pub(crate) fn file_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: RecordKind::File,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
