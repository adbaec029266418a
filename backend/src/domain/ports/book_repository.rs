//! Port for book persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Book, BookStatus, Page, UserId};

use super::StorageError;

/// Optional filters applied when listing a shelf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookListFilter {
    /// Case-insensitive match against title or author.
    pub search: Option<String>,
    /// Restrict to one lifecycle status.
    pub status: Option<BookStatus>,
}

/// Port for book storage and retrieval.
///
/// Aggregate fields (`rating`, `total_reviews`, `upvotes`) have dedicated
/// write operations so recomputation passes never race with owner edits over
/// the whole document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, book: &Book) -> Result<(), StorageError>;

    async fn find_by_id(&self, book_id: &Uuid) -> Result<Option<Book>, StorageError>;

    /// Fetch several books at once, preserving the requested order where
    /// possible. Missing identifiers are skipped.
    async fn find_by_ids(&self, book_ids: &[Uuid]) -> Result<Vec<Book>, StorageError>;

    /// One shelf page for `owner_id`, newest first.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        filter: &BookListFilter,
        page: Page,
    ) -> Result<Vec<Book>, StorageError>;

    /// One page of books across all users ordered by upvotes descending.
    async fn list_trending(&self, page: Page) -> Result<Vec<Book>, StorageError>;

    /// Persist the owner-editable fields of `book`. Returns `false` when the
    /// book no longer exists.
    async fn update_details(&self, book: &Book) -> Result<bool, StorageError>;

    /// Persist a freshly recomputed rating aggregate.
    async fn set_rating_aggregate(
        &self,
        book_id: &Uuid,
        rating: f64,
        total_reviews: u64,
    ) -> Result<bool, StorageError>;

    /// Add `voter_id` to the upvoter set and increment the counter.
    async fn add_upvote(&self, book_id: &Uuid, voter_id: &UserId) -> Result<bool, StorageError>;

    /// Remove `voter_id` from the upvoter set and decrement the counter.
    async fn remove_upvote(&self, book_id: &Uuid, voter_id: &UserId)
    -> Result<bool, StorageError>;

    /// Returns `true` when a book was deleted.
    async fn delete(&self, book_id: &Uuid) -> Result<bool, StorageError>;

    /// Count books owned by `owner_id`, optionally restricted to one status.
    async fn count_by_owner(
        &self,
        owner_id: &UserId,
        status: Option<BookStatus>,
    ) -> Result<u64, StorageError>;

    /// Sum of the upvote counters across all books owned by `owner_id`.
    async fn sum_upvotes_by_owner(&self, owner_id: &UserId) -> Result<u64, StorageError>;
}
