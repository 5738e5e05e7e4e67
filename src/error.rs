// Error types for gitmarks.
// Maps transport, cache, and input failures onto the session error kinds.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitmarksError {
    #[error("Username required in URL")]
    MissingIdentity,

    #[error("User \"{0}\" not found.")]
    IdentityNotFound(String),

    #[error("Error fetching data from github.com. {0}")]
    Transport(String),

    #[error("Failed to write cache: {0}")]
    CacheWrite(String),

    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failure, as seen by a fetch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingIdentity,
    IdentityNotFound,
    TransportError,
    CacheWriteFailure,
}

impl GitmarksError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GitmarksError::MissingIdentity => ErrorKind::MissingIdentity,
            GitmarksError::IdentityNotFound(_) => ErrorKind::IdentityNotFound,
            GitmarksError::CacheWrite(_) | GitmarksError::Io(_) => ErrorKind::CacheWriteFailure,
            GitmarksError::Transport(_) | GitmarksError::Api(_) | GitmarksError::Json(_) => {
                ErrorKind::TransportError
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GitmarksError>;
