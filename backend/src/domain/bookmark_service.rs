//! Bookmark toggling and the bookmarked-books listing.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{BookRepository, BookmarkRepository, StorageError};
use crate::domain::{Book, Bookmark, Error, Page, UserId};

fn map_storage_error(error: StorageError) -> Error {
    match error {
        StorageError::Connection { message } => {
            Error::service_unavailable(format!("bookmark storage unavailable: {message}"))
        }
        StorageError::Query { message } => {
            Error::internal(format!("bookmark storage error: {message}"))
        }
    }
}

/// Result of a bookmark toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkOutcome {
    /// Whether the caller now bookmarks the book.
    pub bookmarked: bool,
}

/// Bookmark use-cases over the bookmark and book repositories.
#[derive(Clone)]
pub struct BookmarkService {
    bookmarks: Arc<dyn BookmarkRepository>,
    books: Arc<dyn BookRepository>,
}

impl BookmarkService {
    pub fn new(bookmarks: Arc<dyn BookmarkRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { bookmarks, books }
    }

    /// Toggle the caller's bookmark on a book.
    ///
    /// At most one bookmark per (book, user) pair holds by construction:
    /// an existing bookmark is removed, an absent one is created.
    pub async fn toggle(&self, book_id: Uuid, user_id: UserId) -> Result<BookmarkOutcome, Error> {
        self.books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;

        let existing = self
            .bookmarks
            .find(&book_id, &user_id)
            .await
            .map_err(map_storage_error)?;
        if existing.is_some() {
            self.bookmarks
                .delete(&book_id, &user_id)
                .await
                .map_err(map_storage_error)?;
            Ok(BookmarkOutcome { bookmarked: false })
        } else {
            let bookmark = Bookmark::new(book_id, user_id);
            self.bookmarks
                .insert(&bookmark)
                .await
                .map_err(map_storage_error)?;
            Ok(BookmarkOutcome { bookmarked: true })
        }
    }

    /// One page of the books the caller has bookmarked, newest bookmark
    /// first.
    pub async fn list_books(&self, user_id: &UserId, page: Page) -> Result<Vec<Book>, Error> {
        let bookmarks = self
            .bookmarks
            .list_by_user(user_id, page)
            .await
            .map_err(map_storage_error)?;
        let book_ids: Vec<Uuid> = bookmarks.iter().map(|bookmark| bookmark.book_id).collect();
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.books
            .find_by_ids(&book_ids)
            .await
            .map_err(map_storage_error)
    }
}

#[cfg(test)]
#[path = "bookmark_service_tests.rs"]
mod tests;
