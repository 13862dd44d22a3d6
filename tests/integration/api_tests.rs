//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api, config::AppConfig, repository::Repository, AppState};

fn app() -> Router {
    let state = AppState::new(AppConfig::default(), Repository::in_memory());
    api::create_router(state)
}

/// Send a request and return status plus parsed JSON body
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn dune() -> Value {
    json!({
        "title": "Dune",
        "authorName": "Herbert",
        "publishedYear": 1965,
        "isbn": "999",
        "availableCopies": 3
    })
}

async fn create(app: &Router, book: Value) -> i64 {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().expect("No book ID")
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(dune())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Book registered successfully");
    assert!(body["data"]["id"].is_number());
    assert_eq!(body["data"]["title"], "Dune");
    assert_eq!(body["data"]["authorName"], "Herbert");
    assert_eq!(body["data"]["isAvailable"], true);
}

#[tokio::test]
async fn test_duplicate_title_envelope() {
    let app = app();
    create(&app, dune()).await;

    let (status, body) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to register book");
    assert_eq!(body["error"], "Book with title Dune already exists");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_lookups() {
    let app = app();
    let id = create(&app, dune()).await;

    let (_, by_id) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let (_, by_title) = send(&app, Method::GET, "/books/title/Dune", None).await;
    let (_, by_isbn) = send(&app, Method::GET, "/books/isbn/999", None).await;

    assert_eq!(by_id["message"], "Book retrieved successfully");
    assert_eq!(by_id["data"], by_title["data"]);
    assert_eq!(by_id["data"], by_isbn["data"]);
}

#[tokio::test]
async fn test_title_lookup_is_percent_decoded() {
    let app = app();
    let mut book = dune();
    book["title"] = json!("Children of Dune");
    create(&app, book).await;

    let (_, body) = send(&app, Method::GET, "/books/title/Children%20of%20Dune", None).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Children of Dune");
}

#[tokio::test]
async fn test_unknown_lookups() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to retrieve book");
    assert_eq!(body["error"], "Book with id 42 not found");

    let (_, body) = send(&app, Method::GET, "/books/title/Nope", None).await;
    assert_eq!(body["error"], "Book with title Nope not found");

    let (_, body) = send(&app, Method::GET, "/books/isbn/000", None).await;
    assert_eq!(body["error"], "Book with ISBN 000 not found");
}

#[tokio::test]
async fn test_list_excludes_deactivated() {
    let app = app();
    let dune_id = create(&app, dune()).await;
    let mut emma = dune();
    emma["title"] = json!("Emma");
    emma["isbn"] = json!("123");
    create(&app, emma).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", dune_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        format!("Book with id {} has been deactivated.", dune_id)
    );

    for uri in ["/books", "/books?active=active"] {
        let (_, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(body["message"], "Retrieved 1 books");
        let titles: Vec<&str> = body["data"]
            .as_array()
            .expect("data is not an array")
            .iter()
            .filter_map(|b| b["title"].as_str())
            .collect();
        assert_eq!(titles, vec!["Emma"]);
    }

    // Still reachable by id
    let (_, body) = send(&app, Method::GET, &format!("/books/{}", dune_id), None).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["isAvailable"], false);
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, dune()).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/books/{}", id),
        Some(json!({ "availableCopies": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated successfully");

    let mut expected = dune();
    expected["id"] = json!(id);
    expected["availableCopies"] = json!(5);
    expected["isAvailable"] = json!(true);
    assert_eq!(body["data"], expected);
}

#[tokio::test]
async fn test_update_title_conflict() {
    let app = app();
    let id = create(&app, dune()).await;
    let mut emma = dune();
    emma["title"] = json!("Emma");
    create(&app, emma).await;

    let (_, body) = send(
        &app,
        Method::PATCH,
        &format!("/books/{}", id),
        Some(json!({ "title": "Emma" })),
    )
    .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to update book");
    assert_eq!(body["error"], "Another book with the same title already exists");

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["title"], "Dune");
}

#[tokio::test]
async fn test_hard_delete() {
    let app = app();
    let id = create(&app, dune()).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/books/{}/permanent", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap_or_default().contains("Dune"));

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["success"], false);

    let (_, body) = send(
        &app,
        Method::DELETE,
        &format!("/books/{}/permanent", id),
        None,
    )
    .await;
    assert_eq!(body["message"], "Failed to permanently delete book");
}

#[tokio::test]
async fn test_invalid_requests() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "title": "No author" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut negative = dune();
    negative["availableCopies"] = json!(-1);
    let (status, body) = send(&app, Method::POST, "/books", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to register book");
}

#[tokio::test]
async fn test_openapi_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{id}/permanent"].is_object());
}

/// Requires a PostgreSQL database at DATABASE_URL.
/// Run with: cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_postgres_lifecycle() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    sqlx::query("DELETE FROM books WHERE title = 'Dune (pg test)'")
        .execute(&pool)
        .await
        .expect("Failed to clean up");

    let state = AppState::new(AppConfig::default(), Repository::postgres(pool));
    let app = api::create_router(state);

    let mut book = dune();
    book["title"] = json!("Dune (pg test)");
    let id = create(&app, book.clone()).await;

    let (_, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert!(body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .all(|b| b["id"] != json!(id)));

    let (_, body) = send(&app, Method::DELETE, &format!("/books/{}/permanent", id), None).await;
    assert_eq!(body["success"], true);
    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["success"], false);
}
