//! User identity and profile model.
//!
//! Users are keyed by the identity string issued by the external identity
//! provider, not by a store-generated identifier. Profile statistics are
//! never stored on the user document; they are recomputed on read by
//! [`crate::domain::ProfileService`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors for user identities and profiles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must not contain whitespace")]
    InvalidId,
    #[error("user name must not be empty")]
    EmptyName,
    #[error("user email must be a plausible address")]
    InvalidEmail,
}

/// Externally issued identity string used as the user primary key.
///
/// ## Invariants
/// - Non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
}

/// Application user profile.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `email` contains an `@`; full address validation is the identity
///   provider's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Validate and construct a user profile, stamping creation time.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        if draft.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if !draft.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        let now = Utc::now();
        Ok(Self {
            id: draft.id,
            name: draft.name,
            email: draft.email,
            photo_url: draft.photo_url,
            bio: draft.bio,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> UserDraft {
        UserDraft {
            id: UserId::new("uid-1").expect("valid id"),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            photo_url: None,
            bio: None,
        }
    }

    #[rstest]
    #[case("")]
    #[case("uid 1")]
    #[case("uid\t1")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert!(UserId::new(raw).is_err());
    }

    #[test]
    fn accepts_opaque_ids() {
        let id = UserId::new("y4PSpk2SsWOmxCDnXGkE").expect("valid id");
        assert_eq!(id.as_ref(), "y4PSpk2SsWOmxCDnXGkE");
    }

    #[test]
    fn rejects_blank_name() {
        let mut input = draft();
        input.name = "   ".to_owned();
        assert_eq!(User::new(input), Err(UserValidationError::EmptyName));
    }

    #[test]
    fn rejects_email_without_at() {
        let mut input = draft();
        input.email = "ada.example.com".to_owned();
        assert_eq!(User::new(input), Err(UserValidationError::InvalidEmail));
    }

    #[test]
    fn stamps_timestamps_on_creation() {
        let user = User::new(draft()).expect("valid draft");
        assert_eq!(user.created_at, user.updated_at);
    }
}
