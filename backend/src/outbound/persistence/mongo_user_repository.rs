//! Document-store `UserRepository` adapter.

use async_trait::async_trait;
use bson::doc;
use mongodb::Collection;

use crate::domain::ports::{StorageError, UserRepository};
use crate::domain::{User, UserId};

use super::client::DocumentStore;
use super::documents::UserDocument;
use super::error_mapping::map_driver_error;

/// Name of the backing collection.
pub const USERS_COLLECTION: &str = "users";

/// MongoDB-backed implementation of the `UserRepository` port.
///
/// `_id` is the externally supplied identity string, so upserts are keyed by
/// identity rather than a store-generated id.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), StorageError> {
        let update = doc! {
            "$set": {
                "name": &user.name,
                "email": &user.email,
                "photo_url": user.photo_url.clone(),
                "bio": user.bio.clone(),
                "updated_at": bson::DateTime::from_chrono(user.updated_at),
            },
            "$setOnInsert": {
                "created_at": bson::DateTime::from_chrono(user.created_at),
            },
        };
        self.collection
            .update_one(doc! { "_id": user.id.as_ref() }, update)
            .upsert(true)
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, StorageError> {
        self.collection
            .find_one(doc! { "_id": user_id.as_ref() })
            .await
            .map_err(map_driver_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn update_profile(&self, user: &User) -> Result<bool, StorageError> {
        let update = doc! {
            "$set": {
                "name": &user.name,
                "photo_url": user.photo_url.clone(),
                "bio": user.bio.clone(),
                "updated_at": bson::DateTime::from_chrono(user.updated_at),
            }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": user.id.as_ref() }, update)
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }
}
