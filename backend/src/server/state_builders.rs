//! Wiring from adapters to the HTTP state bundle.

use std::sync::Arc;

use crate::domain::ports::{
    BookRepository, BookmarkRepository, ReviewRepository, TokenVerifier, UserRepository,
    VoteRepository,
};
use crate::domain::{BookService, BookmarkService, ProfileService, ReviewService, VoteService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DocumentStore, MongoBookRepository, MongoBookmarkRepository, MongoReviewRepository,
    MongoUserRepository, MongoVoteRepository,
};

/// Build the handler state over MongoDB-backed repositories.
pub(crate) fn build_http_state(
    store: &DocumentStore,
    token_verifier: Arc<dyn TokenVerifier>,
) -> HttpState {
    let books: Arc<dyn BookRepository> = Arc::new(MongoBookRepository::new(store));
    let reviews: Arc<dyn ReviewRepository> = Arc::new(MongoReviewRepository::new(store));
    let votes: Arc<dyn VoteRepository> = Arc::new(MongoVoteRepository::new(store));
    let bookmarks: Arc<dyn BookmarkRepository> = Arc::new(MongoBookmarkRepository::new(store));
    let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(store));

    HttpState {
        books: Arc::new(BookService::new(
            books.clone(),
            reviews.clone(),
            votes.clone(),
            bookmarks.clone(),
        )),
        reviews: Arc::new(ReviewService::new(reviews.clone(), books.clone())),
        votes: Arc::new(VoteService::new(votes, reviews.clone())),
        bookmarks: Arc::new(BookmarkService::new(bookmarks.clone(), books.clone())),
        profiles: Arc::new(ProfileService::new(users, books, reviews, bookmarks)),
        token_verifier,
    }
}
