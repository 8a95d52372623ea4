//! Sessions: opaque bearer tokens bound to an actor identity and role.
//!
//! State machine per session: Active (from login until `created_at + TTL`)
//! → Expired (lazily detected on the next validation, which also deletes the
//! record) → Revoked (explicit logout). Only Active sessions resolve an
//! identity. There is no proactive sweep; expiry is observed, then purged.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use rand::RngCore;
use uuid::Uuid;

use crate::domain::ports::{
    LoginOutcome, LoginRequest, RegistrationRequest, SessionManager, SessionRepository,
    SessionRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::user::{PasswordDigest, Role, Student, Teacher, UserId};
use crate::domain::Error;

/// Fixed session time-to-live measured from creation.
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

fn session_ttl() -> Duration {
    Duration::seconds(SESSION_TTL_SECONDS)
}

/// Opaque session bearer token.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

/// Validation failures raised when constructing a [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTokenValidationError {
    /// The token is empty or whitespace.
    #[error("session token must not be empty")]
    Empty,
}

impl SessionToken {
    /// Wrap a token presented by a caller.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionTokenValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionTokenValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Mint a fresh token: 32 random bytes, hex encoded.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// The raw token value, e.g. for the `sessionId` cookie.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A stored session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: SessionToken,
    pub user_id: UserId,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session has outlived its TTL at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > session_ttl()
    }
}

/// The resolved caller behind a validated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub role: Role,
}

impl SessionIdentity {
    /// Require the identity to carry `role`; wrong role reads as 401, the
    /// same as a missing session.
    pub fn require_role(&self, role: Role) -> Result<(), Error> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::unauthorized(format!("{role} role required")))
        }
    }
}

fn map_session_store_error(error: SessionRepositoryError) -> Error {
    let SessionRepositoryError::Store { message } = error;
    Error::internal(format!("session store error: {message}"))
}

fn map_user_store_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("user already exists"),
        UserRepositoryError::Store { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

/// Session manager service over a session store, a user store, and a clock.
pub struct SessionService<S, U> {
    sessions: Arc<S>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<S, U> Clone for SessionService<S, U> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, U> SessionService<S, U> {
    /// Create a new session manager.
    pub fn new(sessions: Arc<S>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<S, U> SessionManager for SessionService<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, Error> {
        let credentials = self
            .users
            .find_credentials(&request.email, request.role)
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        if !credentials.password.matches(&request.password) {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let record = SessionRecord {
            token: SessionToken::generate(),
            user_id: credentials.user_id,
            role: request.role,
            created_at: self.clock.utc(),
        };
        self.sessions
            .insert(&record)
            .await
            .map_err(map_session_store_error)?;

        Ok(LoginOutcome {
            token: record.token,
            role: record.role,
        })
    }

    async fn register(&self, request: RegistrationRequest) -> Result<(), Error> {
        match request {
            RegistrationRequest::Student {
                student_id,
                name,
                batch,
                dept,
                email,
                password,
            } => {
                let id = UserId::new(student_id)
                    .map_err(|err| Error::invalid_request(err.to_string()))?;
                let student = Student {
                    id,
                    name,
                    batch,
                    dept,
                    email,
                    password: PasswordDigest::from_raw(&password),
                };
                self.users
                    .insert_student(&student)
                    .await
                    .map_err(map_user_store_error)
            }
            RegistrationRequest::Teacher {
                name,
                email,
                password,
            } => {
                let id = UserId::new(Uuid::new_v4().to_string())
                    .map_err(|err| Error::internal(format!("generated teacher id: {err}")))?;
                let teacher = Teacher {
                    id,
                    name,
                    email,
                    password: PasswordDigest::from_raw(&password),
                };
                self.users
                    .insert_teacher(&teacher)
                    .await
                    .map_err(map_user_store_error)
            }
        }
    }

    async fn validate(&self, token: &SessionToken) -> Result<SessionIdentity, Error> {
        let record = self
            .sessions
            .find(token)
            .await
            .map_err(map_session_store_error)?
            .ok_or_else(|| Error::unauthorized("unknown session"))?;

        if record.is_expired_at(self.clock.utc()) {
            // Purge lazily; an expired session must never validate again.
            self.sessions
                .delete(token)
                .await
                .map_err(map_session_store_error)?;
            return Err(Error::unauthorized("session expired"));
        }

        Ok(SessionIdentity {
            user_id: record.user_id,
            role: record.role,
        })
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions
            .delete(token)
            .await
            .map_err(map_session_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockSessionRepository, MockUserRepository, StoredCredentials};
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use mockable::MockClock;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);
        Arc::new(clock)
    }

    fn student_identity() -> SessionIdentity {
        SessionIdentity {
            user_id: UserId::new("CSE2025001").expect("valid id"),
            role: Role::Student,
        }
    }

    fn record_created_at(created_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            token: SessionToken::generate(),
            user_id: UserId::new("CSE2025001").expect("valid id"),
            role: Role::Student,
            created_at,
        }
    }

    #[test]
    fn generated_tokens_are_unique_hex() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn require_role_rejects_wrong_role_as_unauthorized() {
        let identity = student_identity();
        assert!(identity.require_role(Role::Student).is_ok());
        let err = identity
            .require_role(Role::Teacher)
            .expect_err("wrong role");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn validate_just_inside_ttl_is_active() {
        let record = record_created_at(t0());
        let token = record.token.clone();
        let mut sessions = MockSessionRepository::new();
        let found = record.clone();
        sessions
            .expect_find()
            .returning(move |_| Ok(Some(found.clone())));
        sessions.expect_delete().times(0);

        let now = t0() + Duration::seconds(SESSION_TTL_SECONDS - 1);
        let service = SessionService::new(
            Arc::new(sessions),
            Arc::new(MockUserRepository::new()),
            fixed_clock(now),
        );

        let identity = service.validate(&token).await.expect("still active");
        assert_eq!(identity, student_identity());
    }

    #[tokio::test]
    async fn validate_just_past_ttl_expires_and_purges() {
        let record = record_created_at(t0());
        let token = record.token.clone();
        let mut sessions = MockSessionRepository::new();
        let found = record.clone();
        sessions
            .expect_find()
            .returning(move |_| Ok(Some(found.clone())));
        sessions
            .expect_delete()
            .times(1)
            .returning(|_| Ok(()));

        let now = t0() + Duration::seconds(SESSION_TTL_SECONDS + 1);
        let service = SessionService::new(
            Arc::new(sessions),
            Arc::new(MockUserRepository::new()),
            fixed_clock(now),
        );

        let err = service.validate(&token).await.expect_err("expired");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn validate_unknown_token_is_unauthorized() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find().returning(|_| Ok(None));
        let service = SessionService::new(
            Arc::new(sessions),
            Arc::new(MockUserRepository::new()),
            fixed_clock(t0()),
        );

        let err = service
            .validate(&SessionToken::generate())
            .await
            .expect_err("unknown");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_delete().times(2).returning(|_| Ok(()));
        let service = SessionService::new(
            Arc::new(sessions),
            Arc::new(MockUserRepository::new()),
            fixed_clock(t0()),
        );

        let token = SessionToken::generate();
        service.logout(&token).await.expect("first logout");
        service.logout(&token).await.expect("second logout");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_find_credentials().returning(|_, _| {
            Ok(Some(StoredCredentials {
                user_id: UserId::new("CSE2025001").expect("valid id"),
                password: PasswordDigest::from_raw("password123"),
            }))
        });
        let service = SessionService::new(
            Arc::new(MockSessionRepository::new()),
            Arc::new(users),
            fixed_clock(t0()),
        );

        let err = service
            .login(LoginRequest {
                email: "safin@university.edu".to_owned(),
                password: "wrong".to_owned(),
                role: Role::Student,
            })
            .await
            .expect_err("bad password");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn login_issues_session_bound_to_user_and_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_credentials().returning(|_, _| {
            Ok(Some(StoredCredentials {
                user_id: UserId::new("CSE2025001").expect("valid id"),
                password: PasswordDigest::from_raw("password123"),
            }))
        });
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_insert()
            .times(1)
            .withf(|record: &SessionRecord| {
                record.user_id.as_ref() == "CSE2025001"
                    && record.role == Role::Student
                    && record.created_at == t0()
            })
            .returning(|_| Ok(()));

        let service =
            SessionService::new(Arc::new(sessions), Arc::new(users), fixed_clock(t0()));

        let outcome = service
            .login(LoginRequest {
                email: "safin@university.edu".to_owned(),
                password: "password123".to_owned(),
                role: Role::Student,
            })
            .await
            .expect("login succeeds");
        assert_eq!(outcome.role, Role::Student);
    }

    #[tokio::test]
    async fn register_duplicate_email_is_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_insert_teacher().returning(|_| {
            Err(UserRepositoryError::DuplicateEmail {
                email: "smith@university.edu".to_owned(),
            })
        });
        let service = SessionService::new(
            Arc::new(MockSessionRepository::new()),
            Arc::new(users),
            fixed_clock(t0()),
        );

        let err = service
            .register(RegistrationRequest::Teacher {
                name: "Dr. Smith".to_owned(),
                email: "smith@university.edu".to_owned(),
                password: "password123".to_owned(),
            })
            .await
            .expect_err("duplicate");
        assert_eq!(err.code, ErrorCode::Conflict);
    }
}
