//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! domain services and the token verifier port only, and remain testable
//! without real I/O.

use std::sync::Arc;

use crate::domain::ports::TokenVerifier;
use crate::domain::{BookService, BookmarkService, ProfileService, ReviewService, VoteService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub books: Arc<BookService>,
    pub reviews: Arc<ReviewService>,
    pub votes: Arc<VoteService>,
    pub bookmarks: Arc<BookmarkService>,
    pub profiles: Arc<ProfileService>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}
