//! Tests for profile registration, updates, and statistics aggregation.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockBookRepository, MockBookmarkRepository, MockReviewRepository, MockUserRepository,
    VerifiedIdentity,
};
use crate::domain::{BookStatus, ErrorCode};

fn user_id(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn identity() -> VerifiedIdentity {
    VerifiedIdentity {
        uid: "uid-1".to_owned(),
        email: "ada@example.com".to_owned(),
        name: Some("Ada".to_owned()),
        photo_url: None,
    }
}

fn service_with(
    users: MockUserRepository,
    books: MockBookRepository,
    reviews: MockReviewRepository,
    bookmarks: MockBookmarkRepository,
) -> ProfileService {
    ProfileService::new(
        Arc::new(users),
        Arc::new(books),
        Arc::new(reviews),
        Arc::new(bookmarks),
    )
}

fn service_with_users(users: MockUserRepository) -> ProfileService {
    service_with(
        users,
        MockBookRepository::new(),
        MockReviewRepository::new(),
        MockBookmarkRepository::new(),
    )
}

#[tokio::test]
async fn register_upserts_profile_from_identity() {
    let mut users = MockUserRepository::new();
    users
        .expect_upsert()
        .times(1)
        .withf(|user| user.name == "Ada" && user.email == "ada@example.com")
        .returning(|_| Ok(()));

    let service = service_with_users(users);
    let user = service
        .register(identity(), Some("Reads widely.".to_owned()))
        .await
        .expect("register succeeds");
    assert_eq!(user.id, user_id("uid-1"));
    assert_eq!(user.bio.as_deref(), Some("Reads widely."));
}

#[tokio::test]
async fn register_falls_back_to_email_for_nameless_identity() {
    let mut users = MockUserRepository::new();
    users
        .expect_upsert()
        .times(1)
        .withf(|user| user.name == "ada@example.com")
        .returning(|_| Ok(()));

    let service = service_with_users(users);
    let mut nameless = identity();
    nameless.name = None;
    service
        .register(nameless, None)
        .await
        .expect("register succeeds");
}

#[tokio::test]
async fn unregistered_profile_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with_users(users);
    let error = service
        .get_profile(&user_id("uid-9"))
        .await
        .expect_err("missing profile rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_profile_applies_partial_fields() {
    let stored = User::new(UserDraft {
        id: user_id("uid-1"),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        photo_url: None,
        bio: None,
    })
    .expect("valid draft");

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    users
        .expect_update_profile()
        .times(1)
        .withf(|user| user.name == "Ada" && user.bio.as_deref() == Some("New bio"))
        .returning(|_| Ok(true));

    let service = service_with_users(users);
    let updated = service
        .update_profile(
            &user_id("uid-1"),
            ProfileUpdate {
                bio: Some("New bio".to_owned()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.bio.as_deref(), Some("New bio"));
}

#[tokio::test]
async fn update_profile_rejects_blank_name() {
    let stored = User::new(UserDraft {
        id: user_id("uid-1"),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        photo_url: None,
        bio: None,
    })
    .expect("valid draft");

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    users.expect_update_profile().times(0);

    let service = service_with_users(users);
    let error = service
        .update_profile(
            &user_id("uid-1"),
            ProfileUpdate {
                name: Some("  ".to_owned()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .expect_err("blank name rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

/// Three books (1 Read, 2 Reading), no engagement: the partition sums and
/// every engagement counter is zero.
#[tokio::test]
async fn statistics_partition_books_by_status() {
    let mut books = MockBookRepository::new();
    books
        .expect_count_by_owner()
        .times(4)
        .returning(|_, status| {
            Ok(match status {
                None => 3,
                Some(BookStatus::Read) => 1,
                Some(BookStatus::Reading) => 2,
                Some(BookStatus::WantToRead) => 0,
            })
        });
    books.expect_sum_upvotes_by_owner().returning(|_| Ok(0));

    let mut reviews = MockReviewRepository::new();
    reviews.expect_count_by_reviewer().returning(|_| Ok(0));
    reviews
        .expect_count_ratings_by_reviewer()
        .returning(|_| Ok(0));

    let mut bookmarks = MockBookmarkRepository::new();
    bookmarks.expect_count_by_user().returning(|_| Ok(0));

    let service = service_with(MockUserRepository::new(), books, reviews, bookmarks);
    let stats = service
        .statistics(&user_id("uid-1"))
        .await
        .expect("statistics succeed");
    assert_eq!(stats.books.total, 3);
    assert_eq!(stats.books.read, 1);
    assert_eq!(stats.books.reading, 2);
    assert_eq!(stats.books.want_to_read, 0);
    assert_eq!(stats.bookmarks, 0);
    assert_eq!(stats.reviews, 0);
    assert_eq!(stats.ratings, 0);
    assert_eq!(stats.upvotes_received, 0);
}

#[tokio::test]
async fn statistics_sum_upvotes_across_owned_books() {
    let mut books = MockBookRepository::new();
    books.expect_count_by_owner().returning(|_, _| Ok(2));
    books.expect_sum_upvotes_by_owner().returning(|_| Ok(7));

    let mut reviews = MockReviewRepository::new();
    reviews.expect_count_by_reviewer().returning(|_| Ok(5));
    reviews
        .expect_count_ratings_by_reviewer()
        .returning(|_| Ok(5));

    let mut bookmarks = MockBookmarkRepository::new();
    bookmarks.expect_count_by_user().returning(|_| Ok(4));

    let service = service_with(MockUserRepository::new(), books, reviews, bookmarks);
    let stats = service
        .statistics(&user_id("uid-1"))
        .await
        .expect("statistics succeed");
    assert_eq!(stats.upvotes_received, 7);
    assert_eq!(stats.bookmarks, 4);
    assert_eq!(stats.reviews, 5);
    assert_eq!(stats.ratings, 5);
}
