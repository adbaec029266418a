//! Port for vote record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{UserId, VoteRecord};

use super::StorageError;

/// Port for the tagged vote-record relation.
///
/// The relation is keyed on (review, voter): a voter's record carries its
/// kind rather than living in per-kind collections, so the "at most one vote
/// per user per review" invariant is structural.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// The vote `voter_id` holds on `review_id`, if any.
    async fn find(
        &self,
        review_id: &Uuid,
        voter_id: &UserId,
    ) -> Result<Option<VoteRecord>, StorageError>;

    async fn insert(&self, record: &VoteRecord) -> Result<(), StorageError>;

    /// Returns `true` when a record was deleted.
    async fn delete(&self, review_id: &Uuid, voter_id: &UserId) -> Result<bool, StorageError>;

    /// Delete every record referencing the given reviews; returns the number
    /// removed. Used by book cascade deletion.
    async fn delete_by_reviews(&self, review_ids: &[Uuid]) -> Result<u64, StorageError>;
}
