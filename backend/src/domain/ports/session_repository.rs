//! Port for session record persistence.

use async_trait::async_trait;

use crate::domain::session::{SessionRecord, SessionToken};

/// Errors raised by session repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionRepositoryError {
    /// The underlying store failed.
    #[error("session store failure: {message}")]
    Store { message: String },
}

/// Port over durable session records.
///
/// Deletion is idempotent: removing an absent token is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly issued session.
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionRepositoryError>;

    /// Look up a session by its opaque token.
    async fn find(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionRecord>, SessionRepositoryError>;

    /// Delete a session record if present.
    async fn delete(&self, token: &SessionToken) -> Result<(), SessionRepositoryError>;
}
