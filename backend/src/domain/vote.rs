//! Existence-based vote records on reviews.
//!
//! A vote is the existence of a record, not a counter: the `likes` and
//! `dislikes` fields on a review are derived from these records and the
//! record set stays authoritative under partial failure (see
//! [`crate::domain::VoteService`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Axis of a vote on a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    Like,
    Dislike,
}

impl VoteKind {
    /// The opposing axis.
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// Stored string form, used in storage filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Marker recording that one user likes or dislikes one review.
///
/// ## Invariants
/// - At most one record per (review, voter) pair, whatever its kind; the
///   tagged-kind shape makes holding both a like and a dislike structurally
///   impossible.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRecord {
    pub review_id: Uuid,
    pub voter_id: UserId,
    pub kind: VoteKind,
    pub created_at: DateTime<Utc>,
}

impl VoteRecord {
    /// Construct a record stamped with the current time.
    pub fn new(review_id: Uuid, voter_id: UserId, kind: VoteKind) -> Self {
        Self {
            review_id,
            voter_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_swaps_axes() {
        assert_eq!(VoteKind::Like.opposite(), VoteKind::Dislike);
        assert_eq!(VoteKind::Dislike.opposite(), VoteKind::Like);
    }

    #[test]
    fn stored_names_are_snake_case() {
        assert_eq!(VoteKind::Like.as_str(), "like");
        assert_eq!(
            serde_json::to_string(&VoteKind::Dislike).expect("serialise"),
            "\"dislike\""
        );
    }
}
