//! Document-store `VoteRepository` adapter.

use async_trait::async_trait;
use bson::doc;
use mongodb::Collection;
use uuid::Uuid;

use crate::domain::ports::{StorageError, VoteRepository};
use crate::domain::{UserId, VoteRecord};

use super::client::DocumentStore;
use super::documents::VoteRecordDocument;
use super::error_mapping::map_driver_error;

/// Name of the backing collection.
pub const REVIEW_VOTES_COLLECTION: &str = "review_votes";

/// MongoDB-backed implementation of the `VoteRepository` port.
///
/// A unique index on (`review_id`, `voter_id`) backs the at-most-one-vote
/// invariant at the store level.
#[derive(Clone)]
pub struct MongoVoteRepository {
    collection: Collection<VoteRecordDocument>,
}

impl MongoVoteRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(REVIEW_VOTES_COLLECTION),
        }
    }
}

#[async_trait]
impl VoteRepository for MongoVoteRepository {
    async fn find(
        &self,
        review_id: &Uuid,
        voter_id: &UserId,
    ) -> Result<Option<VoteRecord>, StorageError> {
        self.collection
            .find_one(doc! {
                "review_id": review_id.to_string(),
                "voter_id": voter_id.as_ref(),
            })
            .await
            .map_err(map_driver_error)?
            .map(VoteRecord::try_from)
            .transpose()
    }

    async fn insert(&self, record: &VoteRecord) -> Result<(), StorageError> {
        self.collection
            .insert_one(VoteRecordDocument::from(record))
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn delete(&self, review_id: &Uuid, voter_id: &UserId) -> Result<bool, StorageError> {
        let result = self
            .collection
            .delete_one(doc! {
                "review_id": review_id.to_string(),
                "voter_id": voter_id.as_ref(),
            })
            .await
            .map_err(map_driver_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_by_reviews(&self, review_ids: &[Uuid]) -> Result<u64, StorageError> {
        let ids: Vec<String> = review_ids.iter().map(ToString::to_string).collect();
        let result = self
            .collection
            .delete_many(doc! { "review_id": { "$in": ids } })
            .await
            .map_err(map_driver_error)?;
        Ok(result.deleted_count)
    }
}
