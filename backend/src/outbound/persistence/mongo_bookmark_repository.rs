//! Document-store `BookmarkRepository` adapter.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::Collection;
use uuid::Uuid;

use crate::domain::ports::{BookmarkRepository, StorageError};
use crate::domain::{Bookmark, Page, UserId};

use super::client::DocumentStore;
use super::documents::BookmarkDocument;
use super::error_mapping::map_driver_error;

/// Name of the backing collection.
pub const BOOKMARKS_COLLECTION: &str = "bookmarks";

/// MongoDB-backed implementation of the `BookmarkRepository` port.
#[derive(Clone)]
pub struct MongoBookmarkRepository {
    collection: Collection<BookmarkDocument>,
}

impl MongoBookmarkRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(BOOKMARKS_COLLECTION),
        }
    }
}

#[async_trait]
impl BookmarkRepository for MongoBookmarkRepository {
    async fn find(
        &self,
        book_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Bookmark>, StorageError> {
        self.collection
            .find_one(doc! {
                "book_id": book_id.to_string(),
                "user_id": user_id.as_ref(),
            })
            .await
            .map_err(map_driver_error)?
            .map(Bookmark::try_from)
            .transpose()
    }

    async fn insert(&self, bookmark: &Bookmark) -> Result<(), StorageError> {
        self.collection
            .insert_one(BookmarkDocument::from(bookmark))
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn delete(&self, book_id: &Uuid, user_id: &UserId) -> Result<bool, StorageError> {
        let result = self
            .collection
            .delete_one(doc! {
                "book_id": book_id.to_string(),
                "user_id": user_id.as_ref(),
            })
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

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: Page,
    ) -> Result<Vec<Bookmark>, StorageError> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id.as_ref() })
            .sort(doc! { "created_at": -1 })
            .skip(page.offset())
            .limit(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .await
            .map_err(map_driver_error)?;
        let documents: Vec<BookmarkDocument> =
            cursor.try_collect().await.map_err(map_driver_error)?;
        documents.into_iter().map(Bookmark::try_from).collect()
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, StorageError> {
        self.collection
            .count_documents(doc! { "user_id": user_id.as_ref() })
            .await
            .map_err(map_driver_error)
    }
}
