//! Review entity, rating bounds, and the rating mean.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Validation errors returned by review constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("review body must not be empty")]
    EmptyBody,
}

/// Star rating bounded to the 1–5 range.
///
/// The bound is enforced at construction so the mean in
/// [`mean_rating`] never ingests out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest permitted rating.
    pub const MIN: u8 = 1;
    /// Highest permitted rating.
    pub const MAX: u8 = 5;

    /// Validate and construct a rating.
    pub fn new(value: u8) -> Result<Self, ReviewValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ReviewValidationError::RatingOutOfRange);
        }
        Ok(Self(value))
    }

    /// Numeric rating value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`Review::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub book_id: Uuid,
    pub reviewer_id: UserId,
    pub body: String,
    pub rating: Rating,
}

/// Review of a book by one user.
///
/// ## Invariants
/// - At most one review per (book, reviewer) pair; enforced by
///   [`crate::domain::ReviewService`] before insert.
/// - `likes`/`dislikes` are denormalized counters derived from the vote
///   record collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub reviewer_id: UserId,
    pub body: String,
    pub rating: Rating,
    pub likes: u64,
    pub dislikes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Validate and construct a review with a fresh identifier and zeroed
    /// vote counters.
    pub fn new(draft: ReviewDraft) -> Result<Self, ReviewValidationError> {
        if draft.body.trim().is_empty() {
            return Err(ReviewValidationError::EmptyBody);
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            book_id: draft.book_id,
            reviewer_id: draft.reviewer_id,
            body: draft.body,
            rating: draft.rating,
            likes: 0,
            dislikes: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether `user_id` authored this review.
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.reviewer_id == *user_id
    }
}

/// Arithmetic mean of the ratings in `reviews`, 0 when the set is empty.
///
/// This is the recomputation-pass kernel: callers re-read the full review set
/// for a book and derive both the mean and the cardinality from it, never
/// adjusting the stored mean incrementally.
pub fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u64 = reviews.iter().map(|review| u64::from(review.rating.value())).sum();
    sum as f64 / reviews.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn review_with_rating(value: u8) -> Review {
        Review::new(ReviewDraft {
            book_id: Uuid::new_v4(),
            reviewer_id: UserId::new("reader-1").expect("valid id"),
            body: "Readable.".to_owned(),
            rating: Rating::new(value).expect("valid rating"),
        })
        .expect("valid draft")
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(255)]
    fn rating_rejects_out_of_range(#[case] value: u8) {
        assert_eq!(
            Rating::new(value),
            Err(ReviewValidationError::RatingOutOfRange)
        );
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn rating_accepts_in_range(#[case] value: u8) {
        assert_eq!(Rating::new(value).expect("valid").value(), value);
    }

    #[test]
    fn review_rejects_blank_body() {
        let result = Review::new(ReviewDraft {
            book_id: Uuid::new_v4(),
            reviewer_id: UserId::new("reader-1").expect("valid id"),
            body: "  ".to_owned(),
            rating: Rating::new(4).expect("valid rating"),
        });
        assert_eq!(result, Err(ReviewValidationError::EmptyBody));
    }

    #[test]
    fn mean_of_empty_set_is_zero() {
        assert_eq!(mean_rating(&[]), 0.0);
    }

    #[test]
    fn mean_is_arithmetic() {
        let reviews = vec![review_with_rating(4), review_with_rating(2)];
        assert_eq!(mean_rating(&reviews), 3.0);
    }

    #[test]
    fn mean_keeps_fractional_part() {
        let reviews = vec![
            review_with_rating(5),
            review_with_rating(4),
            review_with_rating(4),
        ];
        let mean = mean_rating(&reviews);
        assert!((mean - 13.0 / 3.0).abs() < f64::EPSILON);
    }
}
