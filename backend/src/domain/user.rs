//! User identity, roles, and credential digests.
//!
//! The service distinguishes two actor roles. Students claim slots; teachers
//! define bookable capacity. Identity values are opaque strings issued at
//! registration time (e.g. `CSE2025001` for students).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Actor role bound to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Requests and holds slot reservations.
    Student,
    /// Defines rooms and reviews all bookings.
    Teacher,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Teacher => write!(f, "teacher"),
        }
    }
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("role must be 'student' or 'teacher', got '{0}'")]
pub struct RoleParseError(String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

/// Opaque user identifier.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Validation failures raised when constructing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// The identifier is empty or whitespace.
    #[error("user id must not be empty")]
    Empty,
}

impl UserId {
    /// Construct a validated user identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hex-encoded SHA-256 digest of a password.
///
/// Credential-scheme strength is out of scope; the digest only keeps raw
/// passwords out of the store and out of logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a raw password.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        Self(hex::encode(Sha256::digest(raw.as_bytes())))
    }

    /// Constant-shape comparison against a raw candidate password.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        *self == Self::from_raw(candidate)
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: UserId,
    pub name: String,
    pub batch: String,
    pub dept: String,
    pub email: String,
    pub password: PasswordDigest,
}

/// A registered teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: PasswordDigest,
}
