//! Profile registration, updates, and the statistics aggregation read.

use std::sync::Arc;

use crate::domain::ports::{
    BookRepository, BookmarkRepository, ReviewRepository, StorageError, UserRepository,
    VerifiedIdentity,
};
use crate::domain::stats::{BookStatusCounts, UserStatistics};
use crate::domain::{BookStatus, Error, User, UserDraft, UserId};

fn map_storage_error(error: StorageError) -> Error {
    match error {
        StorageError::Connection { message } => {
            Error::service_unavailable(format!("profile storage unavailable: {message}"))
        }
        StorageError::Query { message } => {
            Error::internal(format!("profile storage error: {message}"))
        }
    }
}

/// Caller-editable profile fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

/// Profile use-cases over the user repository plus the three detail
/// repositories consulted by the statistics read.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    books: Arc<dyn BookRepository>,
    reviews: Arc<dyn ReviewRepository>,
    bookmarks: Arc<dyn BookmarkRepository>,
}

impl ProfileService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        books: Arc<dyn BookRepository>,
        reviews: Arc<dyn ReviewRepository>,
        bookmarks: Arc<dyn BookmarkRepository>,
    ) -> Self {
        Self {
            users,
            books,
            reviews,
            bookmarks,
        }
    }

    /// Create or refresh the caller's profile from their verified identity.
    ///
    /// Registration is idempotent per identity: repeating it refreshes the
    /// provider-sourced fields in place. Falls back to the email address
    /// when the provider supplies no display name.
    pub async fn register(
        &self,
        identity: VerifiedIdentity,
        bio: Option<String>,
    ) -> Result<User, Error> {
        let id = UserId::new(&identity.uid)
            .map_err(|err| Error::invalid_request(format!("invalid identity: {err}")))?;
        let name = identity
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| identity.email.clone());
        let user = User::new(UserDraft {
            id,
            name,
            email: identity.email,
            photo_url: identity.photo_url,
            bio,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.users.upsert(&user).await.map_err(map_storage_error)?;
        Ok(user)
    }

    /// Fetch the stored profile for an identity.
    pub async fn get_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| Error::not_found("user not registered"))
    }

    /// Update the caller's editable profile fields.
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let mut user = self.get_profile(user_id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(Error::invalid_request("user name must not be empty"));
            }
            user.name = name;
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        if let Some(photo_url) = update.photo_url {
            user.photo_url = Some(photo_url);
        }
        user.updated_at = chrono::Utc::now();

        let updated = self
            .users
            .update_profile(&user)
            .await
            .map_err(map_storage_error)?;
        if !updated {
            return Err(Error::not_found("user not registered"));
        }
        Ok(user)
    }

    /// Recompute the caller's statistics from the detail collections.
    ///
    /// Pure function of current storage state: no caching, no staleness
    /// window, nothing persisted.
    pub async fn statistics(&self, user_id: &UserId) -> Result<UserStatistics, Error> {
        let total = self
            .books
            .count_by_owner(user_id, None)
            .await
            .map_err(map_storage_error)?;
        let read = self
            .books
            .count_by_owner(user_id, Some(BookStatus::Read))
            .await
            .map_err(map_storage_error)?;
        let reading = self
            .books
            .count_by_owner(user_id, Some(BookStatus::Reading))
            .await
            .map_err(map_storage_error)?;
        let want_to_read = self
            .books
            .count_by_owner(user_id, Some(BookStatus::WantToRead))
            .await
            .map_err(map_storage_error)?;

        let bookmarks = self
            .bookmarks
            .count_by_user(user_id)
            .await
            .map_err(map_storage_error)?;
        let reviews = self
            .reviews
            .count_by_reviewer(user_id)
            .await
            .map_err(map_storage_error)?;
        let ratings = self
            .reviews
            .count_ratings_by_reviewer(user_id)
            .await
            .map_err(map_storage_error)?;
        let upvotes_received = self
            .books
            .sum_upvotes_by_owner(user_id)
            .await
            .map_err(map_storage_error)?;

        Ok(UserStatistics {
            books: BookStatusCounts {
                total,
                read,
                reading,
                want_to_read,
            },
            bookmarks,
            reviews,
            ratings,
            upvotes_received,
        })
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
