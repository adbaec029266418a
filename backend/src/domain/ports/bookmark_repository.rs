//! Port for bookmark persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Bookmark, Page, UserId};

use super::StorageError;

/// Port for existence-based bookmarks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// The bookmark `user_id` holds on `book_id`, if any.
    async fn find(
        &self,
        book_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Bookmark>, StorageError>;

    async fn insert(&self, bookmark: &Bookmark) -> Result<(), StorageError>;

    /// Returns `true` when a bookmark was deleted.
    async fn delete(&self, book_id: &Uuid, user_id: &UserId) -> Result<bool, StorageError>;

    /// Delete every bookmark referencing `book_id`; returns the number
    /// removed. Used by book cascade deletion.
    async fn delete_by_book(&self, book_id: &Uuid) -> Result<u64, StorageError>;

    /// One page of the user's bookmarks, newest first.
    async fn list_by_user(&self, user_id: &UserId, page: Page)
    -> Result<Vec<Bookmark>, StorageError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, StorageError>;
}
