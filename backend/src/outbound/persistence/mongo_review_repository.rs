//! Document-store `ReviewRepository` adapter.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::Collection;
use uuid::Uuid;

use crate::domain::ports::{ReviewRepository, StorageError};
use crate::domain::{Page, Review, UserId};

use super::client::DocumentStore;
use super::documents::ReviewDocument;
use super::error_mapping::map_driver_error;

/// Name of the backing collection.
pub const REVIEWS_COLLECTION: &str = "reviews";

/// MongoDB-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct MongoReviewRepository {
    collection: Collection<ReviewDocument>,
}

impl MongoReviewRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(REVIEWS_COLLECTION),
        }
    }

    async fn collect_reviews(
        &self,
        cursor: mongodb::Cursor<ReviewDocument>,
    ) -> Result<Vec<Review>, StorageError> {
        let documents: Vec<ReviewDocument> =
            cursor.try_collect().await.map_err(map_driver_error)?;
        documents.into_iter().map(Review::try_from).collect()
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), StorageError> {
        self.collection
            .insert_one(ReviewDocument::from(review))
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn find_by_id(&self, review_id: &Uuid) -> Result<Option<Review>, StorageError> {
        self.collection
            .find_one(doc! { "_id": review_id.to_string() })
            .await
            .map_err(map_driver_error)?
            .map(Review::try_from)
            .transpose()
    }

    async fn find_by_book_and_reviewer(
        &self,
        book_id: &Uuid,
        reviewer_id: &UserId,
    ) -> Result<Option<Review>, StorageError> {
        self.collection
            .find_one(doc! {
                "book_id": book_id.to_string(),
                "reviewer_id": reviewer_id.as_ref(),
            })
            .await
            .map_err(map_driver_error)?
            .map(Review::try_from)
            .transpose()
    }

    async fn list_by_book(&self, book_id: &Uuid, page: Page) -> Result<Vec<Review>, StorageError> {
        let cursor = self
            .collection
            .find(doc! { "book_id": book_id.to_string() })
            .sort(doc! { "created_at": -1 })
            .skip(page.offset())
            .limit(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .await
            .map_err(map_driver_error)?;
        self.collect_reviews(cursor).await
    }

    async fn list_all_by_book(&self, book_id: &Uuid) -> Result<Vec<Review>, StorageError> {
        let cursor = self
            .collection
            .find(doc! { "book_id": book_id.to_string() })
            .await
            .map_err(map_driver_error)?;
        self.collect_reviews(cursor).await
    }

    async fn list_ids_by_book(&self, book_id: &Uuid) -> Result<Vec<Uuid>, StorageError> {
        let reviews = self.list_all_by_book(book_id).await?;
        Ok(reviews.into_iter().map(|review| review.id).collect())
    }

    async fn update_content(&self, review: &Review) -> Result<bool, StorageError> {
        let update = doc! {
            "$set": {
                "body": &review.body,
                "rating": i32::from(review.rating.value()),
                "updated_at": bson::DateTime::from_chrono(review.updated_at),
            }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": review.id.to_string() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn adjust_vote_counters(
        &self,
        review_id: &Uuid,
        likes_delta: i64,
        dislikes_delta: i64,
    ) -> Result<bool, StorageError> {
        let update = doc! {
            "$inc": { "likes": likes_delta, "dislikes": dislikes_delta }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": review_id.to_string() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, review_id: &Uuid) -> Result<bool, StorageError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": review_id.to_string() })
            .await
            .map_err(map_driver_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_by_book(&self, book_id: &Uuid) -> Result<u64, StorageError> {
        let result = self
            .collection
            .delete_many(doc! { "book_id": book_id.to_string() })
            .await
            .map_err(map_driver_error)?;
        Ok(result.deleted_count)
    }

    async fn count_by_reviewer(&self, reviewer_id: &UserId) -> Result<u64, StorageError> {
        self.collection
            .count_documents(doc! { "reviewer_id": reviewer_id.as_ref() })
            .await
            .map_err(map_driver_error)
    }

    async fn count_ratings_by_reviewer(&self, reviewer_id: &UserId) -> Result<u64, StorageError> {
        self.collection
            .count_documents(doc! {
                "reviewer_id": reviewer_id.as_ref(),
                "rating": { "$gte": 1_i32 },
            })
            .await
            .map_err(map_driver_error)
    }
}
