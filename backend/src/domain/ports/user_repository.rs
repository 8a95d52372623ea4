//! Port for registered-user persistence and credential lookups.

use async_trait::async_trait;

use crate::domain::user::{PasswordDigest, Role, Student, Teacher, UserId};

/// The credential-bearing subset of a user row needed for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password: PasswordDigest,
}

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The email is already registered, in either role.
    #[error("email '{email}' is already registered")]
    DuplicateEmail { email: String },
    /// The underlying store failed.
    #[error("user store failure: {message}")]
    Store { message: String },
}

/// Port over registered students and teachers.
///
/// Adapters enforce email uniqueness across both roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stored credentials for `email` within `role`, if registered.
    async fn find_credentials(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;

    /// Register a student.
    async fn insert_student(&self, student: &Student) -> Result<(), UserRepositoryError>;

    /// Register a teacher.
    async fn insert_teacher(&self, teacher: &Teacher) -> Result<(), UserRepositoryError>;
}
