//! Domain entities, services, and ports.
//!
//! Everything here is transport and storage agnostic. The services form the
//! aggregate consistency engine: each mutation to a detail collection
//! (reviews, vote records, books) triggers a recomputation pass that derives
//! summary fields on the parent entity, and the profile statistics read is a
//! pure aggregation over the detail collections.

pub mod book;
pub mod book_service;
pub mod bookmark;
pub mod bookmark_service;
pub mod error;
pub mod page;
pub mod ports;
pub mod profile_service;
pub mod review;
pub mod review_service;
pub mod stats;
pub mod user;
pub mod vote;
pub mod vote_service;

pub use self::book::{Book, BookDraft, BookStatus, BookUpdate, BookValidationError};
pub use self::book_service::{BookService, UpvoteOutcome};
pub use self::bookmark::Bookmark;
pub use self::bookmark_service::{BookmarkOutcome, BookmarkService};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::page::Page;
pub use self::profile_service::{ProfileService, ProfileUpdate};
pub use self::review::{Rating, Review, ReviewDraft, ReviewValidationError};
pub use self::review_service::{ReviewService, ReviewUpdate};
pub use self::stats::{BookStatusCounts, UserStatistics};
pub use self::user::{User, UserDraft, UserId, UserValidationError};
pub use self::vote::{VoteKind, VoteRecord};
pub use self::vote_service::{VoteOutcome, VoteService};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
