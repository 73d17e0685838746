//! API integration tests

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use library_server::{
    api, config::DatabaseConfig, repository::Repository, services::Services, AppConfig, AppState,
};

/// Serve the router on an ephemeral port backed by a fresh in-memory database
async fn spawn_server() -> String {
    let repository = Repository::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open database");

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(repository)),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, api::router(state)).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn add_member(client: &Client, base: &str, name: &str) {
    let response = client
        .post(format!("{}/member", base))
        .json(&json!({ "name": name, "email": format!("{}@example.com", name), "age": 30 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn add_book(client: &Client, base: &str, title: &str, year: i32, pages: i32, copies: i32) {
    let response = client
        .post(format!("{}/book", base))
        .json(&json!({
            "title": title,
            "author": "Jane Doe",
            "year_published": year,
            "num_pages": pages,
            "num_copies": copies
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn borrow(client: &Client, base: &str, name: &str, title: &str) -> reqwest::Response {
    client
        .post(format!("{}/borrow", base))
        .json(&json!({ "name": name, "title": title, "author": "Jane Doe" }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn copies(client: &Client, base: &str, title: &str) -> i64 {
    let body: Value = client
        .get(format!("{}/book/{}/Jane%20Doe", base, title))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body["num_copies"].as_i64().expect("No copy count")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");

    let response = client
        .get(format!("{}/ready", base))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_member_crud() {
    let base = spawn_server().await;
    let client = Client::new();

    add_member(&client, &base, "alice").await;

    let response = client
        .post(format!("{}/member", base))
        .json(&json!({ "name": "alice2", "email": "alice@example.com", "age": 22 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Conflict");

    let response = client
        .put(format!("{}/member/alice", base))
        .json(&json!({ "age": 31 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["age"], 31);
    assert_eq!(body["email"], "alice@example.com");

    let members: Value = client
        .get(format!("{}/members", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(members.as_array().map(Vec::len), Some(1));

    let response = client
        .delete(format!("{}/member/alice", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Member deleted successfully");

    let response = client
        .get(format!("{}/member/alice", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_validation_errors() {
    let base = spawn_server().await;
    let client = Client::new();

    // Missing required field
    let response = client
        .post(format!("{}/member", base))
        .json(&json!({ "name": "bob", "age": 20 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "ValidationError");

    // Invalid email
    let response = client
        .post(format!("{}/member", base))
        .json(&json!({ "name": "bob", "email": "not-an-email", "age": 20 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative copy count
    let response = client
        .post(format!("{}/book", base))
        .json(&json!({
            "title": "T", "author": "A", "year_published": 2000, "num_pages": 10, "num_copies": -1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Wrong type
    let response = client
        .post(format!("{}/borrow", base))
        .json(&json!({ "name": 5, "title": "T", "author": "A" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_crud() {
    let base = spawn_server().await;
    let client = Client::new();

    add_book(&client, &base, "Rivers", 1999, 250, 2).await;

    let response = client
        .put(format!("{}/book/Rivers/Jane%20Doe", base))
        .json(&json!({ "num_pages": 260 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["num_pages"], 260);
    assert_eq!(body["num_copies"], 2);
    assert_eq!(body["year_published"], 1999);

    let response = client
        .put(format!("{}/book/Missing/Jane%20Doe", base))
        .json(&json!({ "num_pages": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{}/book/Rivers/Jane%20Doe", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let books: Value = client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(books.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_borrow_and_return_flow() {
    let base = spawn_server().await;
    let client = Client::new();

    add_member(&client, &base, "alice").await;
    add_member(&client, &base, "bob").await;
    add_book(&client, &base, "Rivers", 1999, 250, 1).await;

    let response = borrow(&client, &base, "alice", "Rivers").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "alice");
    assert_eq!(body["title"], "Rivers");
    assert_eq!(copies(&client, &base, "Rivers").await, 0);

    let response = borrow(&client, &base, "bob", "Rivers").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "OutOfStock");
    assert_eq!(body["message"], "No copies available");

    let response = borrow(&client, &base, "nobody", "Rivers").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = borrow(&client, &base, "bob", "Missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Blocked while on loan
    let response = client
        .delete(format!("{}/member/alice", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let borrows: Value = client
        .get(format!("{}/borrows", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(borrows.as_array().map(Vec::len), Some(1));

    let response = client
        .delete(format!("{}/borrow/alice/Rivers/Jane%20Doe", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book returned successfully");
    assert_eq!(copies(&client, &base, "Rivers").await, 1);

    let response = client
        .delete(format!("{}/borrow/alice/Rivers/Jane%20Doe", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(copies(&client, &base, "Rivers").await, 1);

    // Same member borrows again, then tries a duplicate
    let response = borrow(&client, &base, "alice", "Rivers").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    client
        .put(format!("{}/book/Rivers/Jane%20Doe", base))
        .json(&json!({ "num_copies": 3 }))
        .send()
        .await
        .expect("Failed to send request");
    let response = borrow(&client, &base, "alice", "Rivers").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "AlreadyBorrowed");
    assert_eq!(copies(&client, &base, "Rivers").await, 3);
}

#[tokio::test]
async fn test_concurrent_borrow_of_last_copy() {
    let base = spawn_server().await;
    let client = Client::new();

    add_member(&client, &base, "alice").await;
    add_member(&client, &base, "bob").await;
    add_book(&client, &base, "Rivers", 1999, 250, 1).await;

    let (first, second) = tokio::join!(
        borrow(&client, &base, "alice", "Rivers"),
        borrow(&client, &base, "bob", "Rivers"),
    );

    let statuses = [first.status(), second.status()];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(), 1);
    assert_eq!(copies(&client, &base, "Rivers").await, 0);
}

#[tokio::test]
async fn test_member_report() {
    let base = spawn_server().await;
    let client = Client::new();

    add_member(&client, &base, "alice").await;

    let report: Value = client
        .get(format!("{}/member-report/alice", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(report["member_details"]["name"], "alice");
    assert_eq!(report["statistics"]["books_borrowed"], 0);
    assert!(report["statistics"]["avg_book_length"].is_null());
    assert!(report["statistics"]["avg_book_year"].is_null());

    add_book(&client, &base, "Old", 2000, 100, 1).await;
    add_book(&client, &base, "New", 2020, 300, 1).await;
    assert_eq!(borrow(&client, &base, "alice", "Old").await.status(), StatusCode::CREATED);
    assert_eq!(borrow(&client, &base, "alice", "New").await.status(), StatusCode::CREATED);

    let report: Value = client
        .get(format!("{}/member-report/alice", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(report["statistics"]["books_borrowed"], 2);
    assert_eq!(report["statistics"]["avg_book_length"], 200.0);
    assert_eq!(report["statistics"]["avg_book_year"], 2010.0);
    assert_eq!(report["borrowed_books"].as_array().map(Vec::len), Some(2));

    let response = client
        .get(format!("{}/member-report/nobody", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_entities() {
    let base = spawn_server().await;
    let client = Client::new();

    for path in ["member/ghost", "book/Nothing/Nobody", "borrow/ghost/Nothing/Nobody"] {
        let response = client
            .delete(format!("{}/{}", base, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "DELETE /{}", path);
    }
}
