//! HTTP-level integration tests for the checkout/return/fine workflow.

mod common;

use axum::http::StatusCode;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use common::{body_json, create_test_user, get, login, post_json};
use sqlx::PgPool;
use libris_db::models::user::User;

/// Create a member with an active membership, plus a catalog book, and
/// return (member, member_token, admin_token, book_id).
async fn setup(pool: &PgPool, app: Router) -> (User, String, String, i64) {
    create_test_user(pool, "txadmin", "admin").await;
    let admin_token = login(app.clone(), "txadmin@test.com").await;

    let member = create_test_user(pool, "borrower", "user").await;
    let member_token = login(app.clone(), "borrower@test.com").await;

    let body = serde_json::json!({ "user_id": member.id, "term": "1year" });
    let response = post_json(app.clone(), "/api/v1/membership", Some(&admin_token), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let book = serde_json::json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "category": "scifi",
        "serial_no": "SN-TX-1",
        "cost": 25
    });
    let response = post_json(app, "/api/v1/books", Some(&admin_token), book).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let book_id = body_json(response).await["id"].as_i64().unwrap();

    (member, member_token, admin_token, book_id)
}

/// Issue a book and return the transaction JSON.
async fn issue(app: Router, token: &str, user_id: i64, book_id: i64) -> serde_json::Value {
    let body = serde_json::json!({ "user_id": user_id, "book_id": book_id });
    let response = post_json(app, "/api/v1/issue-book", Some(token), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["transaction"].clone()
}

fn parse_date(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("value must be an RFC 3339 timestamp")
}

/// Issuing computes due date = issue date + 15 days and flips the book to
/// `issued`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_issue_sets_due_date_and_book_status(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, _admin, book_id) = setup(&pool, app.clone()).await;

    let transaction = issue(app.clone(), &member_token, member.id, book_id).await;

    let issued_at = parse_date(&transaction["issue_date"]);
    let due_at = parse_date(&transaction["expected_return_date"]);
    assert_eq!(due_at - issued_at, Duration::days(15));
    assert_eq!(transaction["book_name"], "Dune");
    assert_eq!(transaction["serial_no"], "SN-TX-1");

    let book = body_json(get(app, &format!("/api/v1/books/{book_id}"), Some(&member_token)).await).await;
    assert_eq!(book["status"], "issued");
}

/// Issuing the same copy twice before return fails the second time.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_double_issue_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, _admin, book_id) = setup(&pool, app.clone()).await;

    issue(app.clone(), &member_token, member.id, book_id).await;

    let body = serde_json::json!({ "user_id": member.id, "book_id": book_id });
    let response = post_json(app, "/api/v1/issue-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A cancelled or absent membership blocks checkout.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_membership_required_for_issue(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, admin_token, book_id) = setup(&pool, app.clone()).await;

    // No membership at all.
    let stranger = create_test_user(&pool, "stranger", "user").await;
    let body = serde_json::json!({ "user_id": stranger.id, "book_id": book_id });
    let response = post_json(app.clone(), "/api/v1/issue-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Cancelled membership.
    let number: String =
        sqlx::query_scalar("SELECT membership_number FROM memberships WHERE user_id = $1")
            .bind(member.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let cancel = serde_json::json!({ "status": "cancelled" });
    common::put_json(app.clone(), &format!("/api/v1/membership/{number}"), Some(&admin_token), cancel)
        .await;

    let body = serde_json::json!({ "user_id": member.id, "book_id": book_id });
    let response = post_json(app, "/api/v1/issue-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// On-time return carries a zero fine and frees the book.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_on_time_return(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, _admin, book_id) = setup(&pool, app.clone()).await;

    let transaction = issue(app.clone(), &member_token, member.id, book_id).await;

    let body = serde_json::json!({
        "transaction_id": transaction["id"],
        "actual_return_date": transaction["expected_return_date"],
    });
    let response = post_json(app.clone(), "/api/v1/return-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["transaction"]["fine_amount"], 0);
    assert_eq!(json["transaction"]["fine_paid"], true);

    let book = body_json(get(app, &format!("/api/v1/books/{book_id}"), Some(&member_token)).await).await;
    assert_eq!(book["status"], "available");
}

/// Four late days charge 4 x 10 = 40, and the return is refused until the
/// fine is flagged paid.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_late_return_fine_must_be_paid(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, _admin, book_id) = setup(&pool, app.clone()).await;

    let transaction = issue(app.clone(), &member_token, member.id, book_id).await;
    let due_at = parse_date(&transaction["expected_return_date"]);
    let returned_at = (due_at + Duration::days(4)).to_rfc3339();

    // Fine unpaid: rejected, nothing persisted.
    let body = serde_json::json!({
        "transaction_id": transaction["id"],
        "actual_return_date": returned_at,
        "fine_paid": false,
    });
    let response = post_json(app.clone(), "/api/v1/return-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let book = body_json(get(app.clone(), &format!("/api/v1/books/{book_id}"), Some(&member_token)).await)
        .await;
    assert_eq!(book["status"], "issued", "rejected return must not free the book");

    // Fine paid: accepted with the computed amount.
    let body = serde_json::json!({
        "transaction_id": transaction["id"],
        "actual_return_date": returned_at,
        "fine_paid": true,
    });
    let response = post_json(app, "/api/v1/return-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["transaction"]["fine_amount"], 40);
    assert_eq!(json["transaction"]["fine_paid"], true);
}

/// A transaction can only be returned once.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_double_return_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, _admin, book_id) = setup(&pool, app.clone()).await;

    let transaction = issue(app.clone(), &member_token, member.id, book_id).await;
    let body = serde_json::json!({
        "transaction_id": transaction["id"],
        "actual_return_date": transaction["expected_return_date"],
    });

    let first = post_json(app.clone(), "/api/v1/return-book", Some(&member_token), body.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(app, "/api/v1/return-book", Some(&member_token), body).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

/// Only the transaction's owner or an admin may return it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_return_ownership(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, admin_token, book_id) = setup(&pool, app.clone()).await;

    create_test_user(&pool, "other", "user").await;
    let other_token = login(app.clone(), "other@test.com").await;

    let transaction = issue(app.clone(), &member_token, member.id, book_id).await;
    let body = serde_json::json!({
        "transaction_id": transaction["id"],
        "actual_return_date": transaction["expected_return_date"],
    });

    let forbidden = post_json(app.clone(), "/api/v1/return-book", Some(&other_token), body.clone()).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // An admin may complete the return on the member's behalf.
    let allowed = post_json(app, "/api/v1/return-book", Some(&admin_token), body).await;
    assert_eq!(allowed.status(), StatusCode::OK);
}

/// Returning an unknown transaction id is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_return_unknown_transaction(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_member, member_token, _admin, _book_id) = setup(&pool, app.clone()).await;

    let body = serde_json::json!({
        "transaction_id": 999_999,
        "actual_return_date": Utc::now().to_rfc3339(),
    });
    let response = post_json(app, "/api/v1/return-book", Some(&member_token), body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// `/my-issued-books` lists only the caller's open checkouts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_my_issued_books(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (member, member_token, _admin, book_id) = setup(&pool, app.clone()).await;

    let before = body_json(get(app.clone(), "/api/v1/my-issued-books", Some(&member_token)).await).await;
    assert_eq!(before["data"].as_array().unwrap().len(), 0);

    issue(app.clone(), &member_token, member.id, book_id).await;

    let after = body_json(get(app, "/api/v1/my-issued-books", Some(&member_token)).await).await;
    assert_eq!(after["data"].as_array().unwrap().len(), 1);
    assert_eq!(after["data"][0]["book_id"], book_id);
}
