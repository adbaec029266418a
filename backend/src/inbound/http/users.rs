//! User profile HTTP handlers.
//!
//! ```text
//! POST /api/v1/users/register
//! POST /api/v1/users/login
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me
//! GET  /api/v1/users/me/statistics
//! GET  /api/v1/users/me/bookmarks
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProfileUpdate, User, UserStatistics};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::books::{BookResponse, PageQuery, page_from};
use crate::inbound::http::state::HttpState;

/// Request payload for registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub bio: Option<String>,
}

/// Request payload for profile updates.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

/// Response payload for a user profile.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            photo_url: user.photo_url,
            bio: user.bio,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Register the caller, creating or refreshing their profile from the
/// verified identity.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Profile created", body = UserResponse),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/users/register")]
pub async fn register(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state
        .profiles
        .register(user.identity, payload.into_inner().bio)
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(profile)))
}

/// Verify the caller's credential and return their stored profile.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Not registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/users/login")]
pub async fn login(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserResponse>> {
    let profile = state.profiles.get_profile(&user.user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 404, description = "Not registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserResponse>> {
    let profile = state.profiles.get_profile(&user.user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Update the caller's editable profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me")]
pub async fn update_profile(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    let profile = state
        .profiles
        .update_profile(
            &user.user_id,
            ProfileUpdate {
                name: payload.name,
                bio: payload.bio,
                photo_url: payload.photo_url,
            },
        )
        .await?;
    Ok(web::Json(profile.into()))
}

/// Recompute the caller's statistics from the detail collections.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/statistics",
    responses(
        (status = 200, description = "Statistics", body = UserStatistics),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["users"],
    operation_id = "userStatistics"
)]
#[get("/users/me/statistics")]
pub async fn statistics(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserStatistics>> {
    let stats = state.profiles.statistics(&user.user_id).await?;
    Ok(web::Json(stats))
}

/// List the books the caller has bookmarked.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/bookmarks",
    responses(
        (status = 200, description = "Bookmarked books", body = [BookResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["users"],
    operation_id = "bookmarkedBooks"
)]
#[get("/users/me/bookmarks")]
pub async fn bookmarked_books(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let page = page_from(query.page, query.limit);
    let books = state.bookmarks.list_books(&user.user_id, page).await?;
    Ok(web::Json(books.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{
        MockBookRepository, MockBookmarkRepository, MockReviewRepository, MockTokenVerifier,
        MockUserRepository, MockVoteRepository, VerifiedIdentity,
    };
    use crate::domain::{BookService, BookmarkService, ProfileService, ReviewService, VoteService};

    fn verified_identity() -> VerifiedIdentity {
        VerifiedIdentity {
            uid: "uid-1".to_owned(),
            email: "ada@example.com".to_owned(),
            name: Some("Ada".to_owned()),
            photo_url: None,
        }
    }

    /// State over strict mocks; only the expectations a test sets may fire.
    fn state_with(verifier: MockTokenVerifier, users: MockUserRepository) -> web::Data<HttpState> {
        let books = Arc::new(MockBookRepository::new());
        let reviews = Arc::new(MockReviewRepository::new());
        let votes = Arc::new(MockVoteRepository::new());
        let bookmarks = Arc::new(MockBookmarkRepository::new());
        let users = Arc::new(users);

        web::Data::new(HttpState {
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
            token_verifier: Arc::new(verifier),
        })
    }

    #[actix_web::test]
    async fn register_creates_profile_for_verified_caller() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Ok(verified_identity()));
        let mut users = MockUserRepository::new();
        users.expect_upsert().times(1).returning(|_| Ok(()));

        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(verifier, users))
                .service(register),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/users/register")
            .insert_header(("Authorization", "Bearer token-1"))
            .set_json(json!({ "bio": "Reads widely." }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body["id"], "uid-1");
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["bio"], "Reads widely.");
    }

    #[actix_web::test]
    async fn missing_authorization_header_is_unauthorized() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(verifier, MockUserRepository::new()))
                .service(register),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/users/register")
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );

        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "missing Authorization header");
    }

    #[actix_web::test]
    async fn login_returns_404_for_unregistered_identity() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Ok(verified_identity()));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(verifier, users))
                .service(login),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/users/login")
            .insert_header(("Authorization", "Bearer token-1"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
