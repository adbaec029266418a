//! Existence-based bookmarks on books.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::UserId;

/// Marker recording that one user bookmarked one book.
///
/// At most one per (book, user) pair; uniqueness is preserved by the toggle
/// in [`crate::domain::BookmarkService`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub book_id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Construct a bookmark stamped with the current time.
    pub fn new(book_id: Uuid, user_id: UserId) -> Self {
        Self {
            book_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
