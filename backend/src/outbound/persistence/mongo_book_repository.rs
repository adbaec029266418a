//! Document-store `BookRepository` adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::Collection;
use uuid::Uuid;

use crate::domain::ports::{BookListFilter, BookRepository, StorageError};
use crate::domain::{Book, BookStatus, Page, UserId};

use super::client::DocumentStore;
use super::documents::{BookDocument, counter_for_db, parse_counter};
use super::error_mapping::map_driver_error;

/// Name of the backing collection.
pub const BOOKS_COLLECTION: &str = "books";

/// MongoDB-backed implementation of the `BookRepository` port.
#[derive(Clone)]
pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(BOOKS_COLLECTION),
        }
    }

    async fn collect_books(
        &self,
        cursor: mongodb::Cursor<BookDocument>,
    ) -> Result<Vec<Book>, StorageError> {
        let documents: Vec<BookDocument> =
            cursor.try_collect().await.map_err(map_driver_error)?;
        documents.into_iter().map(Book::try_from).collect()
    }
}

fn shelf_filter(owner_id: &UserId, filter: &BookListFilter) -> bson::Document {
    let mut query = doc! { "owner_id": owner_id.as_ref() };
    if let Some(status) = filter.status {
        query.insert("status", status.as_str());
    }
    if let Some(term) = &filter.search {
        query.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": term, "$options": "i" } },
                doc! { "author": { "$regex": term, "$options": "i" } },
            ],
        );
    }
    query
}

fn page_limit(page: Page) -> i64 {
    i64::try_from(page.limit()).unwrap_or(i64::MAX)
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn insert(&self, book: &Book) -> Result<(), StorageError> {
        self.collection
            .insert_one(BookDocument::from(book))
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn find_by_id(&self, book_id: &Uuid) -> Result<Option<Book>, StorageError> {
        self.collection
            .find_one(doc! { "_id": book_id.to_string() })
            .await
            .map_err(map_driver_error)?
            .map(Book::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, book_ids: &[Uuid]) -> Result<Vec<Book>, StorageError> {
        let ids: Vec<String> = book_ids.iter().map(ToString::to_string).collect();
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(map_driver_error)?;
        let mut books = self.collect_books(cursor).await?;

        let positions: HashMap<Uuid, usize> = book_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();
        books.sort_by_key(|book| positions.get(&book.id).copied().unwrap_or(usize::MAX));
        Ok(books)
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        filter: &BookListFilter,
        page: Page,
    ) -> Result<Vec<Book>, StorageError> {
        let cursor = self
            .collection
            .find(shelf_filter(owner_id, filter))
            .sort(doc! { "created_at": -1 })
            .skip(page.offset())
            .limit(page_limit(page))
            .await
            .map_err(map_driver_error)?;
        self.collect_books(cursor).await
    }

    async fn list_trending(&self, page: Page) -> Result<Vec<Book>, StorageError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "upvotes": -1, "created_at": -1 })
            .skip(page.offset())
            .limit(page_limit(page))
            .await
            .map_err(map_driver_error)?;
        self.collect_books(cursor).await
    }

    async fn update_details(&self, book: &Book) -> Result<bool, StorageError> {
        let update = doc! {
            "$set": {
                "title": &book.title,
                "author": &book.author,
                "category": &book.category,
                "overview": &book.overview,
                "status": book.status.as_str(),
                "updated_at": bson::DateTime::from_chrono(book.updated_at),
            }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": book.id.to_string() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn set_rating_aggregate(
        &self,
        book_id: &Uuid,
        rating: f64,
        total_reviews: u64,
    ) -> Result<bool, StorageError> {
        let update = doc! {
            "$set": {
                "rating": rating,
                "total_reviews": counter_for_db(total_reviews),
            }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": book_id.to_string() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn add_upvote(&self, book_id: &Uuid, voter_id: &UserId) -> Result<bool, StorageError> {
        let update = doc! {
            "$addToSet": { "upvoter_ids": voter_id.as_ref() },
            "$inc": { "upvotes": 1_i64 },
        };
        let result = self
            .collection
            .update_one(doc! { "_id": book_id.to_string() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn remove_upvote(
        &self,
        book_id: &Uuid,
        voter_id: &UserId,
    ) -> Result<bool, StorageError> {
        let update = doc! {
            "$pull": { "upvoter_ids": voter_id.as_ref() },
            "$inc": { "upvotes": -1_i64 },
        };
        let result = self
            .collection
            .update_one(doc! { "_id": book_id.to_string() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, book_id: &Uuid) -> Result<bool, StorageError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": book_id.to_string() })
            .await
            .map_err(map_driver_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn count_by_owner(
        &self,
        owner_id: &UserId,
        status: Option<BookStatus>,
    ) -> Result<u64, StorageError> {
        let mut filter = doc! { "owner_id": owner_id.as_ref() };
        if let Some(status) = status {
            filter.insert("status", status.as_str());
        }
        self.collection
            .count_documents(filter)
            .await
            .map_err(map_driver_error)
    }

    async fn sum_upvotes_by_owner(&self, owner_id: &UserId) -> Result<u64, StorageError> {
        let mut cursor = self
            .collection
            .find(doc! { "owner_id": owner_id.as_ref() })
            .await
            .map_err(map_driver_error)?;
        let mut sum: u64 = 0;
        while let Some(document) = cursor.try_next().await.map_err(map_driver_error)? {
            sum += parse_counter(document.upvotes);
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("owner-1").expect("valid user id")
    }

    #[test]
    fn shelf_filter_is_owner_scoped() {
        let query = shelf_filter(&owner(), &BookListFilter::default());
        assert_eq!(query.get_str("owner_id").expect("owner filter"), "owner-1");
        assert!(!query.contains_key("status"));
        assert!(!query.contains_key("$or"));
    }

    #[test]
    fn shelf_filter_adds_status_and_search() {
        let query = shelf_filter(
            &owner(),
            &BookListFilter {
                search: Some("le guin".to_owned()),
                status: Some(BookStatus::Reading),
            },
        );
        assert_eq!(query.get_str("status").expect("status filter"), "Reading");
        assert!(query.get_array("$or").expect("search clauses").len() == 2);
    }
}
