//! Profile statistics read model.
//!
//! Pure values derived on every read from the detail collections; nothing
//! here is persisted.

use serde::Serialize;
use utoipa::ToSchema;

/// Counts of a user's books partitioned by lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookStatusCounts {
    pub total: u64,
    pub read: u64,
    pub reading: u64,
    pub want_to_read: u64,
}

/// Full statistics block served on the profile statistics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub books: BookStatusCounts,
    /// Bookmarks made by the user.
    pub bookmarks: u64,
    /// Reviews authored by the user.
    pub reviews: u64,
    /// Ratings given by the user.
    pub ratings: u64,
    /// Sum of the upvote counters across the user's own books.
    pub upvotes_received: u64,
}
