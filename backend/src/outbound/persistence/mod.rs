//! MongoDB persistence adapters implementing the repository ports.

mod client;
mod documents;
mod error_mapping;
mod mongo_book_repository;
mod mongo_bookmark_repository;
mod mongo_review_repository;
mod mongo_user_repository;
mod mongo_vote_repository;

pub use client::{DocumentStore, StoreConfig, StoreError};
pub use mongo_book_repository::{BOOKS_COLLECTION, MongoBookRepository};
pub use mongo_bookmark_repository::{BOOKMARKS_COLLECTION, MongoBookmarkRepository};
pub use mongo_review_repository::{MongoReviewRepository, REVIEWS_COLLECTION};
pub use mongo_user_repository::{MongoUserRepository, USERS_COLLECTION};
pub use mongo_vote_repository::{MongoVoteRepository, REVIEW_VOTES_COLLECTION};
