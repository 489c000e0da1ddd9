//! Blog post errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::form::PostFormErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("Invalid post form")]
    Invalid(PostFormErrors),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Post already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PostError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PostError::Invalid(_) => ErrorCode::ValidationFailed,
            PostError::NotFound(_) => ErrorCode::PostNotFound,
            PostError::AlreadyExists(_) => ErrorCode::PostAlreadyExists,
            PostError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for PostError {
    fn from(err: DomainError) -> Self {
        let slug = err.details.get("slug").cloned().unwrap_or_default();
        match err.code {
            ErrorCode::PostNotFound => PostError::NotFound(slug),
            ErrorCode::PostAlreadyExists => PostError::AlreadyExists(slug),
            _ => PostError::Storage(err.to_string()),
        }
    }
}
