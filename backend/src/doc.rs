//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, stats};
use crate::inbound::http::{books, health, reviews, users};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::current_user,
        users::update_profile,
        users::statistics,
        users::bookmarked_books,
        books::create_book,
        books::list_books,
        books::trending_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        books::toggle_upvote,
        books::toggle_bookmark,
        reviews::create_review,
        reviews::list_reviews,
        reviews::update_review,
        reviews::delete_review,
        reviews::toggle_like,
        reviews::toggle_dislike,
        health::live,
        health::ready,
    ),
    components(schemas(
        Error,
        ErrorCode,
        stats::UserStatistics,
        stats::BookStatusCounts,
        users::RegisterRequest,
        users::UpdateProfileRequest,
        users::UserResponse,
        books::CreateBookRequest,
        books::UpdateBookRequest,
        books::BookResponse,
        books::UpvoteResponse,
        books::BookmarkResponse,
        reviews::CreateReviewRequest,
        reviews::UpdateReviewRequest,
        reviews::ReviewResponse,
        reviews::LikeResponse,
        reviews::DislikeResponse,
    )),
    tags(
        (name = "users", description = "Registration, profiles, statistics"),
        (name = "books", description = "Shelf management and discovery"),
        (name = "reviews", description = "Reviews and votes"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;
