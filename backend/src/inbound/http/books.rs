//! Book HTTP handlers.
//!
//! ```text
//! POST   /api/v1/books
//! GET    /api/v1/books
//! GET    /api/v1/books/trending
//! GET    /api/v1/books/{book_id}
//! PUT    /api/v1/books/{book_id}
//! DELETE /api/v1/books/{book_id}
//! POST   /api/v1/books/{book_id}/upvote
//! POST   /api/v1/books/{book_id}/bookmark
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::BookListFilter;
use crate::domain::{Book, BookDraft, BookStatus, BookUpdate, Error, Page};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_uuid};

#[derive(Debug, Deserialize)]
struct BookPath {
    book_id: String,
}

/// Request payload for creating a book.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub overview: Option<String>,
    pub status: Option<BookStatus>,
}

/// Request payload for updating a book.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub overview: Option<String>,
    pub status: Option<BookStatus>,
}

/// Shelf listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ShelfQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<BookStatus>,
}

/// Plain pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Response payload for a book.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub overview: String,
    pub status: BookStatus,
    pub upvotes: u64,
    pub rating: f64,
    pub total_reviews: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            owner_id: book.owner_id.to_string(),
            title: book.title,
            author: book.author,
            category: book.category,
            overview: book.overview,
            status: book.status,
            upvotes: book.upvotes,
            rating: book.rating,
            total_reviews: book.total_reviews,
            created_at: book.created_at.to_rfc3339(),
            updated_at: book.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload for an upvote toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResponse {
    pub upvotes: u64,
    pub upvoted: bool,
}

/// Response payload for a bookmark toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub bookmarked: bool,
}

pub(crate) fn page_from(page: Option<u64>, limit: Option<u64>) -> Page {
    Page::new(page.unwrap_or(1), limit.unwrap_or(Page::DEFAULT_LIMIT))
}

fn parse_create_request(
    payload: CreateBookRequest,
    owner: &AuthenticatedUser,
) -> Result<BookDraft, Error> {
    Ok(BookDraft {
        owner_id: owner.user_id.clone(),
        title: payload.title.ok_or_else(|| missing_field_error("title"))?,
        author: payload.author.ok_or_else(|| missing_field_error("author"))?,
        category: payload
            .category
            .ok_or_else(|| missing_field_error("category"))?,
        overview: payload.overview.unwrap_or_default(),
        status: payload.status.unwrap_or(BookStatus::WantToRead),
    })
}

/// Add a book to the caller's shelf.
#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_request(payload.into_inner(), &user)?;
    let book = state.books.create_book(draft).await?;
    Ok(HttpResponse::Created().json(BookResponse::from(book)))
}

/// List the caller's shelf with optional search and status filters.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    responses(
        (status = 200, description = "Shelf page", body = [BookResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<ShelfQuery>,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let query = query.into_inner();
    let filter = BookListFilter {
        search: query.search.filter(|term| !term.trim().is_empty()),
        status: query.status,
    };
    let page = page_from(query.page, query.limit);
    let books = state.books.list_shelf(&user.user_id, filter, page).await?;
    Ok(web::Json(books.into_iter().map(Into::into).collect()))
}

/// List books across all users ordered by upvotes.
#[utoipa::path(
    get,
    path = "/api/v1/books/trending",
    responses(
        (status = 200, description = "Trending page", body = [BookResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["books"],
    operation_id = "trendingBooks"
)]
#[get("/books/trending")]
pub async fn trending_books(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let page = page_from(query.page, query.limit);
    let books = state.books.trending(page).await?;
    Ok(web::Json(books.into_iter().map(Into::into).collect()))
}

/// Fetch a single book with live rating aggregates.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}",
    responses(
        (status = 200, description = "Book", body = BookResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{book_id}")]
pub async fn get_book(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
) -> ApiResult<web::Json<BookResponse>> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    let book = state.books.get_book(book_id).await?;
    Ok(web::Json(book.into()))
}

/// Update a book; owner only.
#[utoipa::path(
    put,
    path = "/api/v1/books/{book_id}",
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Updated book", body = BookResponse),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{book_id}")]
pub async fn update_book(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
    payload: web::Json<UpdateBookRequest>,
) -> ApiResult<web::Json<BookResponse>> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    let payload = payload.into_inner();
    let update = BookUpdate {
        title: payload.title,
        author: payload.author,
        category: payload.category,
        overview: payload.overview,
        status: payload.status,
    };
    let book = state
        .books
        .update_book(book_id, &user.user_id, update)
        .await?;
    Ok(web::Json(book.into()))
}

/// Delete a book and everything referencing it; owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/books/{book_id}",
    responses(
        (status = 200, description = "Book deleted"),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{book_id}")]
pub async fn delete_book(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
) -> ApiResult<HttpResponse> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    state.books.delete_book(book_id, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "book deleted" })))
}

/// Toggle the caller's upvote on a book.
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/upvote",
    responses(
        (status = 200, description = "New upvote state", body = UpvoteResponse),
        (status = 400, description = "Self-upvote", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["books"],
    operation_id = "toggleUpvote"
)]
#[post("/books/{book_id}/upvote")]
pub async fn toggle_upvote(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
) -> ApiResult<web::Json<UpvoteResponse>> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    let outcome = state.books.toggle_upvote(book_id, &user.user_id).await?;
    Ok(web::Json(UpvoteResponse {
        upvotes: outcome.upvotes,
        upvoted: outcome.upvoted,
    }))
}

/// Toggle the caller's bookmark on a book.
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/bookmark",
    responses(
        (status = 200, description = "New bookmark state", body = BookmarkResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["books"],
    operation_id = "toggleBookmark"
)]
#[post("/books/{book_id}/bookmark")]
pub async fn toggle_bookmark(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<BookPath>,
) -> ApiResult<web::Json<BookmarkResponse>> {
    let book_id = parse_uuid(&path.book_id, "bookId")?;
    let outcome = state.bookmarks.toggle(book_id, user.user_id).await?;
    Ok(web::Json(BookmarkResponse {
        bookmarked: outcome.bookmarked,
    }))
}
