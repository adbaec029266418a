//! Tests for book use-cases: guards, cascade deletion, live aggregates.

use std::sync::Arc;

use mockall::Sequence;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockBookRepository, MockBookmarkRepository, MockReviewRepository, MockVoteRepository,
};
use crate::domain::{BookStatus, ErrorCode, Rating, Review, ReviewDraft};

fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn draft(owner: &str) -> BookDraft {
    BookDraft {
        owner_id: user(owner),
        title: "A Memory Called Empire".to_owned(),
        author: "Arkady Martine".to_owned(),
        category: "Science Fiction".to_owned(),
        overview: "Teixcalaan #1".to_owned(),
        status: BookStatus::Reading,
    }
}

fn book(owner: &str) -> Book {
    Book::new(draft(owner)).expect("valid book draft")
}

fn review_for(book_id: Uuid, rating: u8) -> Review {
    Review::new(ReviewDraft {
        book_id,
        reviewer_id: user("reader-1"),
        body: "Dense, rewarding.".to_owned(),
        rating: Rating::new(rating).expect("valid rating"),
    })
    .expect("valid review draft")
}

fn service_with(
    books: MockBookRepository,
    reviews: MockReviewRepository,
    votes: MockVoteRepository,
    bookmarks: MockBookmarkRepository,
) -> BookService {
    BookService::new(
        Arc::new(books),
        Arc::new(reviews),
        Arc::new(votes),
        Arc::new(bookmarks),
    )
}

fn service_with_books(books: MockBookRepository) -> BookService {
    service_with(
        books,
        MockReviewRepository::new(),
        MockVoteRepository::new(),
        MockBookmarkRepository::new(),
    )
}

#[tokio::test]
async fn create_book_starts_with_zeroed_aggregates() {
    let mut books = MockBookRepository::new();
    books.expect_insert().times(1).returning(|_| Ok(()));

    let service = service_with_books(books);
    let book = service
        .create_book(draft("owner-1"))
        .await
        .expect("create book succeeds");
    assert_eq!(book.rating, 0.0);
    assert_eq!(book.total_reviews, 0);
    assert_eq!(book.upvotes, 0);
}

#[tokio::test]
async fn create_book_rejects_blank_title() {
    let mut invalid = draft("owner-1");
    invalid.title = "  ".to_owned();

    let mut books = MockBookRepository::new();
    books.expect_insert().times(0);

    let service = service_with_books(books);
    let error = service
        .create_book(invalid)
        .await
        .expect_err("blank title rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

/// The detail read serves live aggregates even when the persisted ones are
/// stale.
#[tokio::test]
async fn get_book_recomputes_aggregates_live() {
    let mut stored = book("owner-1");
    stored.rating = 0.0;
    stored.total_reviews = 0;
    let book_id = stored.id;

    let mut books = MockBookRepository::new();
    books
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_list_all_by_book()
        .times(1)
        .returning(move |_| Ok(vec![review_for(book_id, 4), review_for(book_id, 2)]));

    let service = service_with(
        books,
        reviews,
        MockVoteRepository::new(),
        MockBookmarkRepository::new(),
    );
    let fetched = service.get_book(book_id).await.expect("get book succeeds");
    assert_eq!(fetched.rating, 3.0);
    assert_eq!(fetched.total_reviews, 2);
}

#[tokio::test]
async fn update_requires_ownership() {
    let stored = book("owner-1");
    let book_id = stored.id;

    let mut books = MockBookRepository::new();
    books
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    books.expect_update_details().times(0);

    let service = service_with_books(books);
    let error = service
        .update_book(book_id, &user("intruder"), BookUpdate::default())
        .await
        .expect_err("non-owner rejected");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

/// Deletion removes vote records, reviews, and bookmarks before the book,
/// in that order.
#[tokio::test]
async fn delete_cascades_to_all_referencing_collections() {
    let stored = book("owner-1");
    let book_id = stored.id;
    let review_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let expected_review_ids = review_ids.clone();

    let mut seq = Sequence::new();
    let mut books = MockBookRepository::new();
    let mut reviews = MockReviewRepository::new();
    let mut votes = MockVoteRepository::new();
    let mut bookmarks = MockBookmarkRepository::new();

    books
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_| Ok(Some(stored)));
    reviews
        .expect_list_ids_by_book()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_| Ok(review_ids));
    votes
        .expect_delete_by_reviews()
        .times(1)
        .in_sequence(&mut seq)
        .withf(move |ids| ids == expected_review_ids.as_slice())
        .returning(|_| Ok(2));
    reviews
        .expect_delete_by_book()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(2));
    bookmarks
        .expect_delete_by_book()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(1));
    books
        .expect_delete()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(true));

    let service = service_with(books, reviews, votes, bookmarks);
    service
        .delete_book(book_id, &user("owner-1"))
        .await
        .expect("delete book succeeds");
}

#[tokio::test]
async fn delete_without_reviews_skips_vote_cleanup() {
    let stored = book("owner-1");
    let book_id = stored.id;

    let mut books = MockBookRepository::new();
    books
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    books.expect_delete().times(1).returning(|_| Ok(true));

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_list_ids_by_book()
        .returning(|_| Ok(Vec::new()));
    reviews.expect_delete_by_book().times(1).returning(|_| Ok(0));

    let mut votes = MockVoteRepository::new();
    votes.expect_delete_by_reviews().times(0);

    let mut bookmarks = MockBookmarkRepository::new();
    bookmarks
        .expect_delete_by_book()
        .times(1)
        .returning(|_| Ok(0));

    let service = service_with(books, reviews, votes, bookmarks);
    service
        .delete_book(book_id, &user("owner-1"))
        .await
        .expect("delete book succeeds");
}

/// Owners cannot upvote their own book, however often they retry.
#[tokio::test]
async fn self_upvote_is_a_conflict() {
    let book_id = {
        let stored = book("owner-1");
        stored.id
    };

    for _ in 0..2 {
        let stored = book("owner-1");
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        books.expect_add_upvote().times(0);
        books.expect_remove_upvote().times(0);

        let service = service_with_books(books);
        let error = service
            .toggle_upvote(book_id, &user("owner-1"))
            .await
            .expect_err("self-upvote rejected");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }
}

#[tokio::test]
async fn upvote_toggle_adds_then_removes() {
    // First toggle: not yet an upvoter.
    let stored = book("owner-1");
    let book_id = stored.id;
    let mut books = MockBookRepository::new();
    books
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    books.expect_add_upvote().times(1).returning(|_, _| Ok(true));

    let service = service_with_books(books);
    let outcome = service
        .toggle_upvote(book_id, &user("reader-1"))
        .await
        .expect("toggle succeeds");
    assert_eq!(
        outcome,
        UpvoteOutcome {
            upvotes: 1,
            upvoted: true
        }
    );

    // Second toggle: the set now contains the caller.
    let mut stored = book("owner-1");
    stored.id = book_id;
    stored.upvotes = 1;
    stored.upvoter_ids = vec![user("reader-1")];
    let mut books = MockBookRepository::new();
    books
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    books
        .expect_remove_upvote()
        .times(1)
        .returning(|_, _| Ok(true));

    let service = service_with_books(books);
    let outcome = service
        .toggle_upvote(book_id, &user("reader-1"))
        .await
        .expect("toggle succeeds");
    assert_eq!(
        outcome,
        UpvoteOutcome {
            upvotes: 0,
            upvoted: false
        }
    );
}

#[tokio::test]
async fn missing_book_is_not_found() {
    let mut books = MockBookRepository::new();
    books.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with_books(books);
    let error = service
        .delete_book(Uuid::new_v4(), &user("owner-1"))
        .await
        .expect_err("missing book rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
