use thiserror::Error;

use crate::fetch::FetchError;
use crate::store::StoreError;

/// Classification of a failed store attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// The target directory or path segment does not exist.
    PathMissing,
    /// Any other store failure.
    Unexpected,
}

impl StorageErrorKind {
    pub fn classify(err: &StoreError) -> Self {
        match err {
            StoreError::PathMissing { .. } => Self::PathMissing,
            StoreError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => Self::PathMissing,
            StoreError::Io(_) | StoreError::Rejected(_) => Self::Unexpected,
        }
    }

    /// The stable user-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::PathMissing => "Output path does not exist.",
            Self::Unexpected => "An unexpected error occurred.",
        }
    }
}

/// A failed store attempt, decoupled from its underlying cause.
#[derive(Debug, Error)]
#[error("{}", .kind.message())]
pub struct StorageError {
    kind: StorageErrorKind,
    #[source]
    source: StoreError,
}

impl StorageError {
    pub fn new(source: StoreError) -> Self {
        Self {
            kind: StorageErrorKind::classify(&source),
            source,
        }
    }

    #[inline]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    #[inline]
    pub fn into_source(self) -> StoreError {
        self.source
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
