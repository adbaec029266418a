//! Like/dislike toggling and the vote counter aggregate.
//!
//! Vote records are the source of truth; the `likes`/`dislikes` counters on
//! a review are derived. Every toggle mutates the record first and the
//! counter second, so a crash between the two leaves the record set
//! authoritative and counters resynchronisable from it.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ReviewRepository, StorageError, VoteRepository};
use crate::domain::{Error, Review, UserId, VoteKind, VoteRecord};

fn map_storage_error(error: StorageError) -> Error {
    match error {
        StorageError::Connection { message } => {
            Error::service_unavailable(format!("vote storage unavailable: {message}"))
        }
        StorageError::Query { message } => Error::internal(format!("vote storage error: {message}")),
    }
}

/// Result of a vote toggle on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// New counter value for the toggled axis.
    pub count: u64,
    /// Whether the caller now holds a vote on that axis.
    pub active: bool,
}

/// Vote toggling use-cases over the vote and review repositories.
#[derive(Clone)]
pub struct VoteService {
    votes: Arc<dyn VoteRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

fn counter_for(review: &Review, kind: VoteKind) -> u64 {
    match kind {
        VoteKind::Like => review.likes,
        VoteKind::Dislike => review.dislikes,
    }
}

impl VoteService {
    pub fn new(votes: Arc<dyn VoteRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { votes, reviews }
    }

    /// Toggle the caller's vote on `kind` for a review.
    ///
    /// - Holding a vote on the same axis removes it (pure un-vote).
    /// - Holding a vote on the opposing axis clears that vote first, then
    ///   records the new one, so a caller never holds both.
    /// - Holding nothing records the vote.
    pub async fn toggle(
        &self,
        review_id: Uuid,
        voter_id: UserId,
        kind: VoteKind,
    ) -> Result<VoteOutcome, Error> {
        let review = self
            .reviews
            .find_by_id(&review_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found(format!("review {review_id} not found")))?;

        let existing = self
            .votes
            .find(&review_id, &voter_id)
            .await
            .map_err(map_storage_error)?;
        let current = counter_for(&review, kind);

        match existing {
            Some(record) if record.kind == kind => {
                self.votes
                    .delete(&review_id, &voter_id)
                    .await
                    .map_err(map_storage_error)?;
                self.adjust_counter(&review_id, kind, -1).await;
                Ok(VoteOutcome {
                    count: current.saturating_sub(1),
                    active: false,
                })
            }
            Some(record) => {
                self.votes
                    .delete(&review_id, &voter_id)
                    .await
                    .map_err(map_storage_error)?;
                self.adjust_counter(&review_id, record.kind, -1).await;

                let record = VoteRecord::new(review_id, voter_id, kind);
                self.votes.insert(&record).await.map_err(map_storage_error)?;
                self.adjust_counter(&review_id, kind, 1).await;
                Ok(VoteOutcome {
                    count: current + 1,
                    active: true,
                })
            }
            None => {
                let record = VoteRecord::new(review_id, voter_id, kind);
                self.votes.insert(&record).await.map_err(map_storage_error)?;
                self.adjust_counter(&review_id, kind, 1).await;
                Ok(VoteOutcome {
                    count: current + 1,
                    active: true,
                })
            }
        }
    }

    /// Apply a counter increment for an already-committed record mutation.
    ///
    /// Best-effort: the record set is authoritative, so a failed increment
    /// is logged and left for a reconciliation pass rather than propagated.
    async fn adjust_counter(&self, review_id: &Uuid, kind: VoteKind, delta: i64) {
        let (likes_delta, dislikes_delta) = match kind {
            VoteKind::Like => (delta, 0),
            VoteKind::Dislike => (0, delta),
        };
        if let Err(error) = self
            .reviews
            .adjust_vote_counters(review_id, likes_delta, dislikes_delta)
            .await
        {
            warn!(
                %review_id,
                axis = kind.as_str(),
                delta,
                error = %error,
                "vote counter adjustment failed; vote records remain authoritative"
            );
        }
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
