//! Port for review persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Page, Review, UserId};

use super::StorageError;

/// Port for review storage and retrieval.
///
/// `list_all_by_book` exists alongside the paginated listing because rating
/// recomputation is defined as a full re-read of the review set, never an
/// incremental adjustment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: &Review) -> Result<(), StorageError>;

    async fn find_by_id(&self, review_id: &Uuid) -> Result<Option<Review>, StorageError>;

    /// The review `reviewer_id` wrote for `book_id`, if any. Backs the
    /// one-review-per-user guard.
    async fn find_by_book_and_reviewer(
        &self,
        book_id: &Uuid,
        reviewer_id: &UserId,
    ) -> Result<Option<Review>, StorageError>;

    /// One page of reviews for a book, newest first.
    async fn list_by_book(&self, book_id: &Uuid, page: Page) -> Result<Vec<Review>, StorageError>;

    /// Every review for a book; the recomputation-pass read.
    async fn list_all_by_book(&self, book_id: &Uuid) -> Result<Vec<Review>, StorageError>;

    /// Identifiers of every review for a book; used by cascade deletion to
    /// clean up vote records.
    async fn list_ids_by_book(&self, book_id: &Uuid) -> Result<Vec<Uuid>, StorageError>;

    /// Persist the author-editable fields of `review`. Returns `false` when
    /// the review no longer exists.
    async fn update_content(&self, review: &Review) -> Result<bool, StorageError>;

    /// Apply increments to the denormalized vote counters.
    async fn adjust_vote_counters(
        &self,
        review_id: &Uuid,
        likes_delta: i64,
        dislikes_delta: i64,
    ) -> Result<bool, StorageError>;

    /// Returns `true` when a review was deleted.
    async fn delete(&self, review_id: &Uuid) -> Result<bool, StorageError>;

    /// Delete every review for a book; returns the number removed.
    async fn delete_by_book(&self, book_id: &Uuid) -> Result<u64, StorageError>;

    /// Reviews authored by `reviewer_id` across all books.
    async fn count_by_reviewer(&self, reviewer_id: &UserId) -> Result<u64, StorageError>;

    /// Ratings given by `reviewer_id` across all books.
    async fn count_ratings_by_reviewer(&self, reviewer_id: &UserId) -> Result<u64, StorageError>;
}
