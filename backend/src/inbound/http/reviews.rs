//! Review and vote HTTP handlers.
//!
//! ```text
//! POST   /api/v1/books/{book_id}/reviews
//! GET    /api/v1/books/{book_id}/reviews
//! PUT    /api/v1/reviews/{review_id}
//! DELETE /api/v1/reviews/{review_id}
//! POST   /api/v1/reviews/{review_id}/like
//! POST   /api/v1/reviews/{review_id}/dislike
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Review, ReviewDraft, ReviewUpdate, VoteKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::books::{PageQuery, page_from};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_rating, parse_uuid};

#[derive(Debug, Deserialize)]
struct BookPath {
    book_id: String,
}

#[derive(Debug, Deserialize)]
struct ReviewPath {
    review_id: String,
}

/// Request payload for creating a review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub body: Option<String>,
    pub rating: Option<u8>,
}

/// Request payload for updating a review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub body: Option<String>,
    pub rating: Option<u8>,
}

/// Response payload for a review.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub book_id: String,
    pub reviewer_id: String,
    pub body: String,
    pub rating: u8,
    pub likes: u64,
    pub dislikes: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            book_id: review.book_id.to_string(),
            reviewer_id: review.reviewer_id.to_string(),
            body: review.body,
            rating: review.rating.value(),
            likes: review.likes,
            dislikes: review.dislikes,
            created_at: review.created_at.to_rfc3339(),
            updated_at: review.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload for a like toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub likes: u64,
    pub liked: bool,
}

/// Response payload for a dislike toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DislikeResponse {
    pub dislikes: u64,
    pub disliked: bool,
}

/// Review a book; one review per caller per book.
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid request or duplicate review", body = Error),
        (status = 404, description = "Book not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/books/{book_id}/reviews")]
pub async fn create_review(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
    payload: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    let payload = payload.into_inner();
    let body = payload.body.ok_or_else(|| missing_field_error("body"))?;
    let rating = parse_rating(payload.rating.ok_or_else(|| missing_field_error("rating"))?)?;

    let review = state
        .reviews
        .create_review(ReviewDraft {
            book_id,
            reviewer_id: user.user_id,
            body,
            rating,
        })
        .await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

/// List a book's reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/reviews",
    responses(
        (status = 200, description = "Review page", body = [ReviewResponse]),
        (status = 404, description = "Book not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/books/{book_id}/reviews")]
pub async fn list_reviews(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    let page = page_from(query.page, query.limit);
    let reviews = state.reviews.list_reviews(book_id, page).await?;
    Ok(web::Json(reviews.into_iter().map(Into::into).collect()))
}

/// Update a review; author only.
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{review_id}",
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
#[put("/reviews/{review_id}")]
pub async fn update_review(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<ReviewPath>,
    payload: web::Json<UpdateReviewRequest>,
) -> ApiResult<web::Json<ReviewResponse>> {
    let review_id = parse_uuid(&path.review_id, "reviewId")?;
    let payload = payload.into_inner();
    let update = ReviewUpdate {
        body: payload.body,
        rating: payload.rating.map(parse_rating).transpose()?,
    };
    let review = state
        .reviews
        .update_review(review_id, &user.user_id, update)
        .await?;
    Ok(web::Json(review.into()))
}

/// Delete a review; author only.
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}",
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{review_id}")]
pub async fn delete_review(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<ReviewPath>,
) -> ApiResult<HttpResponse> {
    let review_id = parse_uuid(&path.review_id, "reviewId")?;
    state
        .reviews
        .delete_review(review_id, &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "review deleted" })))
}

/// Toggle the caller's like on a review.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{review_id}/like",
    responses(
        (status = 200, description = "New like state", body = LikeResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "toggleLike"
)]
#[post("/reviews/{review_id}/like")]
pub async fn toggle_like(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<ReviewPath>,
) -> ApiResult<web::Json<LikeResponse>> {
    let review_id = parse_uuid(&path.review_id, "reviewId")?;
    let outcome = state
        .votes
        .toggle(review_id, user.user_id, VoteKind::Like)
        .await?;
    Ok(web::Json(LikeResponse {
        likes: outcome.count,
        liked: outcome.active,
    }))
}

/// Toggle the caller's dislike on a review.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{review_id}/dislike",
    responses(
        (status = 200, description = "New dislike state", body = DislikeResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "toggleDislike"
)]
#[post("/reviews/{review_id}/dislike")]
pub async fn toggle_dislike(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<ReviewPath>,
) -> ApiResult<web::Json<DislikeResponse>> {
    let review_id = parse_uuid(&path.review_id, "reviewId")?;
    let outcome = state
        .votes
        .toggle(review_id, user.user_id, VoteKind::Dislike)
        .await?;
    Ok(web::Json(DislikeResponse {
        dislikes: outcome.count,
        disliked: outcome.active,
    }))
}
