//! Port for user profile persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::StorageError;

/// Port for identity-keyed user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the profile or refresh an existing one in place; registration
    /// is idempotent per identity.
    async fn upsert(&self, user: &User) -> Result<(), StorageError>;

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, StorageError>;

    /// Persist the editable profile fields. Returns `false` when the user is
    /// not registered.
    async fn update_profile(&self, user: &User) -> Result<bool, StorageError>;
}
