//! Content lookup errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Path segment is not a valid slug.
    #[error("Not found")]
    InvalidSlug,

    #[error("Content not found: {0}")]
    NotFound(String),

    /// Entry exists but could not be read or parsed.
    #[error("Content unavailable: {0}")]
    Unavailable(String),
}

impl ContentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::InvalidSlug | ContentError::NotFound(_) => ErrorCode::ContentNotFound,
            ContentError::Unavailable(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        ContentError::Unavailable(err.to_string())
    }
}
