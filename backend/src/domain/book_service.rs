//! Book use-cases: shelf CRUD, discovery, upvoting, and cascade deletion.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{
    BookListFilter, BookRepository, BookmarkRepository, ReviewRepository, StorageError,
    VoteRepository,
};
use crate::domain::review::mean_rating;
use crate::domain::{Book, BookDraft, BookUpdate, Error, Page, UserId};

fn map_storage_error(error: StorageError) -> Error {
    match error {
        StorageError::Connection { message } => {
            Error::service_unavailable(format!("book storage unavailable: {message}"))
        }
        StorageError::Query { message } => Error::internal(format!("book storage error: {message}")),
    }
}

/// Result of an upvote toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpvoteOutcome {
    /// New upvote count for the book.
    pub upvotes: u64,
    /// Whether the caller now upvotes the book.
    pub upvoted: bool,
}

/// Book use-cases over the four detail repositories.
///
/// The review, vote, and bookmark repositories are only consulted for the
/// live-aggregate read path and for cascade deletion.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
    reviews: Arc<dyn ReviewRepository>,
    votes: Arc<dyn VoteRepository>,
    bookmarks: Arc<dyn BookmarkRepository>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        reviews: Arc<dyn ReviewRepository>,
        votes: Arc<dyn VoteRepository>,
        bookmarks: Arc<dyn BookmarkRepository>,
    ) -> Self {
        Self {
            books,
            reviews,
            votes,
            bookmarks,
        }
    }

    /// Add a book to the caller's shelf.
    pub async fn create_book(&self, draft: BookDraft) -> Result<Book, Error> {
        let book = Book::new(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.books.insert(&book).await.map_err(map_storage_error)?;
        Ok(book)
    }

    /// One page of the caller's shelf with optional search/status filters.
    pub async fn list_shelf(
        &self,
        owner_id: &UserId,
        filter: BookListFilter,
        page: Page,
    ) -> Result<Vec<Book>, Error> {
        self.books
            .list_by_owner(owner_id, &filter, page)
            .await
            .map_err(map_storage_error)
    }

    /// One page of books across all users ordered by upvotes descending.
    pub async fn trending(&self, page: Page) -> Result<Vec<Book>, Error> {
        self.books
            .list_trending(page)
            .await
            .map_err(map_storage_error)
    }

    /// Fetch a single book with its rating aggregate recomputed live.
    ///
    /// The live values are served in place of the persisted ones; a failed
    /// or skipped recomputation write therefore never shows a stale rating
    /// on the detail view. Nothing is written back here.
    pub async fn get_book(&self, book_id: Uuid) -> Result<Book, Error> {
        let mut book = self
            .books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;

        let reviews = self
            .reviews
            .list_all_by_book(&book_id)
            .await
            .map_err(map_storage_error)?;
        book.rating = mean_rating(&reviews);
        book.total_reviews = reviews.len() as u64;
        Ok(book)
    }

    /// Update a book's details; owner only.
    pub async fn update_book(
        &self,
        book_id: Uuid,
        actor: &UserId,
        update: BookUpdate,
    ) -> Result<Book, Error> {
        let mut book = self
            .books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;
        if !book.is_owned_by(actor) {
            return Err(Error::forbidden("only the book owner may edit it"));
        }

        book.apply_update(update)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let updated = self
            .books
            .update_details(&book)
            .await
            .map_err(map_storage_error)?;
        if !updated {
            return Err(Error::not_found(format!("book {book_id} not found")));
        }
        Ok(book)
    }

    /// Delete a book and everything referencing it; owner only.
    ///
    /// Cascade order: vote records of the book's reviews, then the reviews,
    /// then bookmarks, then the book itself, so detail rows never outlive
    /// the rows they reference.
    pub async fn delete_book(&self, book_id: Uuid, actor: &UserId) -> Result<(), Error> {
        let book = self
            .books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;
        if !book.is_owned_by(actor) {
            return Err(Error::forbidden("only the book owner may delete it"));
        }

        let review_ids = self
            .reviews
            .list_ids_by_book(&book_id)
            .await
            .map_err(map_storage_error)?;
        if !review_ids.is_empty() {
            self.votes
                .delete_by_reviews(&review_ids)
                .await
                .map_err(map_storage_error)?;
        }
        self.reviews
            .delete_by_book(&book_id)
            .await
            .map_err(map_storage_error)?;
        self.bookmarks
            .delete_by_book(&book_id)
            .await
            .map_err(map_storage_error)?;
        self.books
            .delete(&book_id)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }

    /// Toggle the caller's upvote on a book.
    ///
    /// Owners cannot upvote their own book; the guard runs before any
    /// counter mutation and holds on every repetition of the request.
    pub async fn toggle_upvote(
        &self,
        book_id: Uuid,
        actor: &UserId,
    ) -> Result<UpvoteOutcome, Error> {
        let book = self
            .books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;
        if book.is_owned_by(actor) {
            return Err(Error::conflict("you cannot upvote your own book"));
        }

        if book.has_upvote_from(actor) {
            self.books
                .remove_upvote(&book_id, actor)
                .await
                .map_err(map_storage_error)?;
            Ok(UpvoteOutcome {
                upvotes: book.upvotes.saturating_sub(1),
                upvoted: false,
            })
        } else {
            self.books
                .add_upvote(&book_id, actor)
                .await
                .map_err(map_storage_error)?;
            Ok(UpvoteOutcome {
                upvotes: book.upvotes + 1,
                upvoted: true,
            })
        }
    }
}

#[cfg(test)]
#[path = "book_service_tests.rs"]
mod tests;
