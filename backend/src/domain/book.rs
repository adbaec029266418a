//! Book entity and lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Validation errors returned by [`Book::new`] and [`BookUpdate`] application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Reading lifecycle status of a book on a user's shelf.
///
/// Wire names match the stored values (`Want-to-Read`, `Reading`, `Read`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    #[serde(rename = "Want-to-Read")]
    WantToRead,
    #[serde(rename = "Reading")]
    Reading,
    #[serde(rename = "Read")]
    Read,
}

impl BookStatus {
    /// Stored string form, used in storage filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WantToRead => "Want-to-Read",
            Self::Reading => "Reading",
            Self::Read => "Read",
        }
    }
}

/// Input payload for [`Book::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub owner_id: UserId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub overview: String,
    pub status: BookStatus,
}

/// Owner-editable fields applied by [`Book::apply_update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub overview: Option<String>,
    pub status: Option<BookStatus>,
}

/// Book on a user's shelf.
///
/// `rating` and `total_reviews` are denormalized aggregates derived from the
/// review collection; `upvotes` must equal the cardinality of `upvoter_ids`.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub owner_id: UserId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub overview: String,
    pub status: BookStatus,
    pub upvotes: u64,
    pub upvoter_ids: Vec<UserId>,
    pub rating: f64,
    pub total_reviews: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), BookValidationError> {
    if value.trim().is_empty() {
        return Err(BookValidationError::EmptyField { field });
    }
    Ok(())
}

impl Book {
    /// Validate and construct a book with a fresh identifier and zeroed
    /// aggregates.
    pub fn new(draft: BookDraft) -> Result<Self, BookValidationError> {
        require_non_empty(&draft.title, "title")?;
        require_non_empty(&draft.author, "author")?;
        require_non_empty(&draft.category, "category")?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id: draft.owner_id,
            title: draft.title,
            author: draft.author,
            category: draft.category,
            overview: draft.overview,
            status: draft.status,
            upvotes: 0,
            upvoter_ids: Vec::new(),
            rating: 0.0,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether `user_id` owns this book.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }

    /// Whether `user_id` currently upvotes this book.
    pub fn has_upvote_from(&self, user_id: &UserId) -> bool {
        self.upvoter_ids.contains(user_id)
    }

    /// Apply owner-editable fields, refreshing `updated_at`.
    pub fn apply_update(&mut self, update: BookUpdate) -> Result<(), BookValidationError> {
        if let Some(title) = update.title {
            require_non_empty(&title, "title")?;
            self.title = title;
        }
        if let Some(author) = update.author {
            require_non_empty(&author, "author")?;
            self.author = author;
        }
        if let Some(category) = update.category {
            require_non_empty(&category, "category")?;
            self.category = category;
        }
        if let Some(overview) = update.overview {
            self.overview = overview;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> BookDraft {
        BookDraft {
            owner_id: UserId::new("owner-1").expect("valid id"),
            title: "The Dispossessed".to_owned(),
            author: "Ursula K. Le Guin".to_owned(),
            category: "Science Fiction".to_owned(),
            overview: "An ambiguous utopia.".to_owned(),
            status: BookStatus::WantToRead,
        }
    }

    #[test]
    fn new_book_starts_with_zeroed_aggregates() {
        let book = Book::new(draft()).expect("valid draft");
        assert_eq!(book.upvotes, 0);
        assert!(book.upvoter_ids.is_empty());
        assert_eq!(book.rating, 0.0);
        assert_eq!(book.total_reviews, 0);
    }

    #[rstest]
    #[case("title")]
    #[case("author")]
    #[case("category")]
    fn rejects_blank_required_fields(#[case] field: &str) {
        let mut input = draft();
        match field {
            "title" => input.title = " ".to_owned(),
            "author" => input.author = " ".to_owned(),
            _ => input.category = " ".to_owned(),
        }
        assert!(Book::new(input).is_err());
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        let json = serde_json::to_string(&BookStatus::WantToRead).expect("serialise");
        assert_eq!(json, "\"Want-to-Read\"");
        let parsed: BookStatus = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(parsed, BookStatus::WantToRead);
    }

    #[test]
    fn apply_update_keeps_unset_fields() {
        let mut book = Book::new(draft()).expect("valid draft");
        book.apply_update(BookUpdate {
            status: Some(BookStatus::Read),
            ..BookUpdate::default()
        })
        .expect("valid update");
        assert_eq!(book.status, BookStatus::Read);
        assert_eq!(book.title, "The Dispossessed");
    }

    #[test]
    fn apply_update_rejects_blank_title() {
        let mut book = Book::new(draft()).expect("valid draft");
        let result = book.apply_update(BookUpdate {
            title: Some("  ".to_owned()),
            ..BookUpdate::default()
        });
        assert_eq!(
            result,
            Err(BookValidationError::EmptyField { field: "title" })
        );
    }

    #[test]
    fn ownership_and_upvote_membership() {
        let mut book = Book::new(draft()).expect("valid draft");
        let owner = UserId::new("owner-1").expect("valid id");
        let other = UserId::new("other-1").expect("valid id");
        assert!(book.is_owned_by(&owner));
        assert!(!book.is_owned_by(&other));

        book.upvoter_ids.push(other.clone());
        assert!(book.has_upvote_from(&other));
        assert!(!book.has_upvote_from(&owner));
    }
}
