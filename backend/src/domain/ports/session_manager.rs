//! Driving port for authentication and session lifecycle.
//!
//! Inbound adapters call this to log actors in and out and to resolve the
//! caller behind a bearer token, without importing the backing stores. Every
//! protected operation resolves the real caller through [`SessionManager::validate`];
//! there are no placeholder identities.

use async_trait::async_trait;

use crate::domain::session::{SessionIdentity, SessionToken};
use crate::domain::user::Role;
use crate::domain::Error;

/// Credentials presented at login.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Successful login: the opaque bearer token plus the confirmed role.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: SessionToken,
    pub role: Role,
}

/// Role-specific registration payload.
#[derive(Debug, Clone)]
pub enum RegistrationRequest {
    Student {
        student_id: String,
        name: String,
        batch: String,
        dept: String,
        email: String,
        password: String,
    },
    Teacher {
        name: String,
        email: String,
        password: String,
    },
}

/// Domain use-case port for session management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Check credentials and issue a fresh Active session.
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, Error>;

    /// Register a new student or teacher account.
    async fn register(&self, request: RegistrationRequest) -> Result<(), Error>;

    /// Resolve the identity behind a token.
    ///
    /// An expired session is deleted as a side effect and reported as
    /// unauthorized; it never validates again afterwards.
    async fn validate(&self, token: &SessionToken) -> Result<SessionIdentity, Error>;

    /// Revoke a session. Idempotent: unknown or already-expired tokens still
    /// report success.
    async fn logout(&self, token: &SessionToken) -> Result<(), Error>;
}
