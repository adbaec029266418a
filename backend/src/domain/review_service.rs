//! Review use-cases and the rating aggregate recomputation pass.
//!
//! Every mutation that can change a book's mean rating re-reads the full
//! review set for that book and writes the derived `rating`/`total_reviews`
//! pair back onto the book. Recomputation after a committed review write is
//! best-effort: its failure is logged, never propagated, because the review
//! itself is already durable (the book read path recomputes live as a
//! fallback).

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{BookRepository, ReviewRepository, StorageError};
use crate::domain::review::mean_rating;
use crate::domain::{Error, Page, Rating, Review, ReviewDraft, UserId};

fn map_storage_error(error: StorageError) -> Error {
    match error {
        StorageError::Connection { message } => {
            Error::service_unavailable(format!("review storage unavailable: {message}"))
        }
        StorageError::Query { message } => {
            Error::internal(format!("review storage error: {message}"))
        }
    }
}

/// Author-editable review fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewUpdate {
    pub body: Option<String>,
    pub rating: Option<Rating>,
}

/// Review use-cases over the review and book repositories.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    books: Arc<dyn BookRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { reviews, books }
    }

    /// Create a review for a book.
    ///
    /// Fails with not-found when the book is absent and with conflict when
    /// the caller already reviewed it (one review per (book, user) pair).
    pub async fn create_review(&self, draft: ReviewDraft) -> Result<Review, Error> {
        let book_id = draft.book_id;
        self.books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;

        let existing = self
            .reviews
            .find_by_book_and_reviewer(&book_id, &draft.reviewer_id)
            .await
            .map_err(map_storage_error)?;
        if existing.is_some() {
            return Err(Error::conflict("you have already reviewed this book"));
        }

        let review = Review::new(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.reviews
            .insert(&review)
            .await
            .map_err(map_storage_error)?;

        self.recompute_rating(&book_id).await;
        Ok(review)
    }

    /// One page of a book's reviews, newest first.
    pub async fn list_reviews(&self, book_id: Uuid, page: Page) -> Result<Vec<Review>, Error> {
        self.books
            .find_by_id(&book_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;

        self.reviews
            .list_by_book(&book_id, page)
            .await
            .map_err(map_storage_error)
    }

    /// Update a review's body and/or rating; author only.
    ///
    /// The rating aggregate is recomputed only when the rating actually
    /// changed.
    pub async fn update_review(
        &self,
        review_id: Uuid,
        actor: &UserId,
        update: ReviewUpdate,
    ) -> Result<Review, Error> {
        let mut review = self
            .reviews
            .find_by_id(&review_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("review {review_id} not found")))?;
        if !review.is_authored_by(actor) {
            return Err(Error::forbidden("only the review author may edit it"));
        }

        if let Some(body) = update.body {
            if body.trim().is_empty() {
                return Err(Error::invalid_request("review body must not be empty"));
            }
            review.body = body;
        }
        let rating_changed = match update.rating {
            Some(rating) if rating != review.rating => {
                review.rating = rating;
                true
            }
            _ => false,
        };
        review.updated_at = chrono::Utc::now();

        let updated = self
            .reviews
            .update_content(&review)
            .await
            .map_err(map_storage_error)?;
        if !updated {
            return Err(Error::not_found(format!("review {review_id} not found")));
        }

        if rating_changed {
            self.recompute_rating(&review.book_id).await;
        }
        Ok(review)
    }

    /// Delete a review; author only. Recomputes the book's rating afterwards.
    pub async fn delete_review(&self, review_id: Uuid, actor: &UserId) -> Result<(), Error> {
        let review = self
            .reviews
            .find_by_id(&review_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("review {review_id} not found")))?;
        if !review.is_authored_by(actor) {
            return Err(Error::forbidden("only the review author may delete it"));
        }

        self.reviews
            .delete(&review_id)
            .await
            .map_err(map_storage_error)?;

        self.recompute_rating(&review.book_id).await;
        Ok(())
    }

    /// Full recomputation pass for a book's rating aggregate.
    ///
    /// Best-effort by design: the triggering mutation is already committed,
    /// so a failed pass is logged and the stale aggregate stands until the
    /// next pass or a live read.
    async fn recompute_rating(&self, book_id: &Uuid) {
        if let Err(error) = self.try_recompute_rating(book_id).await {
            warn!(
                %book_id,
                error = %error,
                "rating recomputation failed; review write already committed"
            );
        }
    }

    async fn try_recompute_rating(&self, book_id: &Uuid) -> Result<(), StorageError> {
        let reviews = self.reviews.list_all_by_book(book_id).await?;
        let rating = mean_rating(&reviews);
        let total_reviews = reviews.len() as u64;
        self.books
            .set_rating_aggregate(book_id, rating, total_reviews)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
