//! BSON document shapes and their domain conversions.
//!
//! Documents keep identifiers as plain strings (`users` uses the externally
//! supplied identity string as `_id`; everything else a UUID string) and
//! counters as `i64`, the store's native integer. Reading a document that
//! fails domain validation is reported as a query error rather than a panic:
//! a corrupt row must not take the process down.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::StorageError;
use crate::domain::{
    Book, BookStatus, Bookmark, Rating, Review, User, UserId, VoteKind, VoteRecord,
};

fn corrupt(entity: &'static str, detail: impl std::fmt::Display) -> StorageError {
    StorageError::query(format!("corrupt {entity} document: {detail}"))
}

fn parse_entity_id(raw: &str, entity: &'static str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(raw).map_err(|_| corrupt(entity, format_args!("bad id {raw}")))
}

fn parse_user_ref(raw: &str, entity: &'static str) -> Result<UserId, StorageError> {
    UserId::new(raw).map_err(|err| corrupt(entity, err))
}

/// Counters can drift negative under the accepted write races; reads clamp
/// them to zero.
pub(super) fn parse_counter(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub(super) fn counter_for_db(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct BookDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub overview: String,
    pub status: BookStatus,
    pub upvotes: i64,
    pub upvoter_ids: Vec<String>,
    pub rating: f64,
    pub total_reviews: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            owner_id: book.owner_id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            overview: book.overview.clone(),
            status: book.status,
            upvotes: counter_for_db(book.upvotes),
            upvoter_ids: book
                .upvoter_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            rating: book.rating,
            total_reviews: counter_for_db(book.total_reviews),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

impl TryFrom<BookDocument> for Book {
    type Error = StorageError;

    fn try_from(document: BookDocument) -> Result<Self, Self::Error> {
        let upvoter_ids = document
            .upvoter_ids
            .iter()
            .map(|raw| parse_user_ref(raw, "book"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: parse_entity_id(&document.id, "book")?,
            owner_id: parse_user_ref(&document.owner_id, "book")?,
            title: document.title,
            author: document.author,
            category: document.category,
            overview: document.overview,
            status: document.status,
            upvotes: parse_counter(document.upvotes),
            upvoter_ids,
            rating: document.rating,
            total_reviews: parse_counter(document.total_reviews),
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ReviewDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub book_id: String,
    pub reviewer_id: String,
    pub body: String,
    pub rating: i32,
    pub likes: i64,
    pub dislikes: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewDocument {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            book_id: review.book_id.to_string(),
            reviewer_id: review.reviewer_id.to_string(),
            body: review.body.clone(),
            rating: i32::from(review.rating.value()),
            likes: counter_for_db(review.likes),
            dislikes: counter_for_db(review.dislikes),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl TryFrom<ReviewDocument> for Review {
    type Error = StorageError;

    fn try_from(document: ReviewDocument) -> Result<Self, Self::Error> {
        let rating = u8::try_from(document.rating)
            .ok()
            .and_then(|value| Rating::new(value).ok())
            .ok_or_else(|| {
                corrupt("review", format_args!("rating {} out of range", document.rating))
            })?;
        Ok(Self {
            id: parse_entity_id(&document.id, "review")?,
            book_id: parse_entity_id(&document.book_id, "review")?,
            reviewer_id: parse_user_ref(&document.reviewer_id, "review")?,
            body: document.body,
            rating,
            likes: parse_counter(document.likes),
            dislikes: parse_counter(document.dislikes),
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

/// Vote rows carry no domain identifier; the store assigns its own `_id`,
/// which reads ignore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct VoteRecordDocument {
    pub review_id: String,
    pub voter_id: String,
    pub kind: VoteKind,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<&VoteRecord> for VoteRecordDocument {
    fn from(record: &VoteRecord) -> Self {
        Self {
            review_id: record.review_id.to_string(),
            voter_id: record.voter_id.to_string(),
            kind: record.kind,
            created_at: record.created_at,
        }
    }
}

impl TryFrom<VoteRecordDocument> for VoteRecord {
    type Error = StorageError;

    fn try_from(document: VoteRecordDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            review_id: parse_entity_id(&document.review_id, "vote record")?,
            voter_id: parse_user_ref(&document.voter_id, "vote record")?,
            kind: document.kind,
            created_at: document.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct BookmarkDocument {
    pub book_id: String,
    pub user_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<&Bookmark> for BookmarkDocument {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            book_id: bookmark.book_id.to_string(),
            user_id: bookmark.user_id.to_string(),
            created_at: bookmark.created_at,
        }
    }
}

impl TryFrom<BookmarkDocument> for Bookmark {
    type Error = StorageError;

    fn try_from(document: BookmarkDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            book_id: parse_entity_id(&document.book_id, "bookmark")?,
            user_id: parse_user_ref(&document.user_id, "bookmark")?,
            created_at: document.created_at,
        })
    }
}

/// Users are keyed by the externally supplied identity string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            photo_url: user.photo_url.clone(),
            bio: user.bio.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = StorageError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_user_ref(&document.id, "user")?,
            name: document.name,
            email: document.email,
            photo_url: document.photo_url,
            bio: document.bio,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}
