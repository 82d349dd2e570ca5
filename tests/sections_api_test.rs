use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use shelfmark::api;
use shelfmark::db;
use shelfmark::infrastructure::AppState;
use shelfmark::models::{book, section};

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn test_app(state: AppState) -> Router {
    api::api_router(state)
}

// Helper to create a test section
async fn create_test_section(db: &DatabaseConnection, name: &str, description: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let section = section::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = section.insert(db).await.expect("Failed to create section");
    model.id
}

// Helper to create a test book
async fn create_test_book(db: &DatabaseConnection, title: &str, author: &str, section_id: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let book = book::ActiveModel {
        title: Set(title.to_string()),
        author: Set(author.to_string()),
        date: Set("2020-01-01".to_string()),
        summary: Set("A test book".to_string()),
        cover: Set("https://example.com/cover.jpg".to_string()),
        copies: Set(1),
        section_id: Set(section_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = book.insert(db).await.expect("Failed to create book");
    model.id
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn send_json(app: &Router, method: &str, uri: &str, payload: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn delete(app: &Router, uri: &str) -> StatusCode {
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}

fn row_names(body: &Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_sections_paginated_envelope() {
    let state = setup_test_state().await;
    create_test_section(state.db(), "Fiction", "Books that tell imaginary stories").await;
    create_test_section(state.db(), "Children", "Books for young readers").await;
    let app = test_app(state);

    let (status, body) = get_json(&app, "/sections").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_sections_pagination_false_returns_bare_array() {
    let state = setup_test_state().await;
    create_test_section(state.db(), "Fiction", "Books that tell imaginary stories").await;
    create_test_section(state.db(), "Children", "Books for young readers").await;
    let app = test_app(state);

    let (status, body) = get_json(&app, "/sections?pagination=false").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("expected a bare array");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_search_sections_case_insensitive_substring() {
    let state = setup_test_state().await;
    create_test_section(state.db(), "Fiction", "Books that tell imaginary stories").await;
    create_test_section(
        state.db(),
        "Non-fiction",
        "Books that provide factual information",
    )
    .await;
    create_test_section(state.db(), "Children", "Books for young readers").await;
    let app = test_app(state);

    // Substring match over name and description; "Fic" also hits "Non-fiction"
    let (status, body) = get_json(&app, "/sections?search=Fic").await;
    assert_eq!(status, StatusCode::OK);
    let names = row_names(&body);
    assert!(names.contains(&"Fiction".to_string()));
    assert!(names.contains(&"Non-fiction".to_string()));
    assert!(!names.contains(&"Children".to_string()));

    // A description-only match
    let (status, body) = get_json(&app, "/sections?search=factual").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_names(&body), vec!["Non-fiction"]);

    // No match
    let (_, body) = get_json(&app, "/sections?search=zzz").await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_page_overrides_offset() {
    let state = setup_test_state().await;
    for i in 1..=12 {
        create_test_section(state.db(), &format!("Section {:02}", i), "A shelf").await;
    }
    let app = test_app(state);

    // page=3&limit=5 means offset 10 even with a competing explicit offset
    let (status, body) =
        get_json(&app, "/sections?page=3&limit=5&offset=999&order=name:asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(12));
    assert_eq!(row_names(&body), vec!["Section 11", "Section 12"]);
}

#[tokio::test]
async fn test_order_by_name_descending() {
    let state = setup_test_state().await;
    create_test_section(state.db(), "Art", "Art books").await;
    create_test_section(state.db(), "Zoology", "Animal books").await;
    create_test_section(state.db(), "Maths", "Number books").await;
    let app = test_app(state);

    let (status, body) = get_json(&app, "/sections?order=name:desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_names(&body), vec!["Zoology", "Maths", "Art"]);
}

#[tokio::test]
async fn test_order_with_unknown_field_does_not_fail() {
    let state = setup_test_state().await;
    create_test_section(state.db(), "Art", "Art books").await;
    let app = test_app(state);

    // Unknown sort field degrades to createdAt:desc instead of erroring
    let (status, body) = get_json(&app, "/sections?order=colour:asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn test_section_crud_roundtrip() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let (status, created) = send_json(
        &app,
        "POST",
        "/sections",
        json!({ "name": "Poetry", "description": "Verse collections" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Poetry");

    let (status, fetched) = get_json(&app, &format!("/sections/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["description"], "Verse collections");

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/sections/{}", id),
        json!({ "name": "Poetry", "description": "Verse and prose poems" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Verse and prose poems");

    assert_eq!(delete(&app, &format!("/sections/{}", id)).await, StatusCode::OK);
    let (status, _) = get_json(&app, &format!("/sections/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_section_not_found_names_id() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let (status, body) = get_json(&app, "/sections/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (status, _) = send_json(
        &app,
        "PUT",
        "/sections/999",
        json!({ "name": "Ghost", "description": "Missing" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(delete(&app, "/sections/999").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_section_name_conflicts() {
    let state = setup_test_state().await;
    create_test_section(state.db(), "Fiction", "Imaginary stories").await;
    let other = create_test_section(state.db(), "Children", "Young readers").await;
    let app = test_app(state);

    let (status, body) = send_json(
        &app,
        "POST",
        "/sections",
        json!({ "name": "Fiction", "description": "Another one" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Fiction"));

    // Renaming a different section onto the taken name also conflicts
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/sections/{}", other),
        json!({ "name": "Fiction", "description": "Young readers" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A section may keep its own name on update
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/sections/{}", other),
        json!({ "name": "Children", "description": "For young readers" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_section_with_books_is_blocked() {
    let state = setup_test_state().await;
    let section_id = create_test_section(state.db(), "Fiction", "Imaginary stories").await;
    let book_id = create_test_book(state.db(), "Dune", "Frank Herbert", section_id).await;
    let app = test_app(state.clone());

    assert_eq!(
        delete(&app, &format!("/sections/{}", section_id)).await,
        StatusCode::CONFLICT
    );

    // Both the section and its book are still there
    let (status, _) = get_json(&app, &format!("/sections/{}", section_id)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_json(&app, &format!("/books/{}", book_id)).await;
    assert_eq!(status, StatusCode::OK);

    // Once the book is gone the section can be deleted
    assert_eq!(delete(&app, &format!("/books/{}", book_id)).await, StatusCode::OK);
    assert_eq!(
        delete(&app, &format!("/sections/{}", section_id)).await,
        StatusCode::OK
    );
    let (status, _) = get_json(&app, &format!("/sections/{}", section_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_section_rejects_empty_fields() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let (status, _) = send_json(
        &app,
        "POST",
        "/sections",
        json!({ "name": "", "description": "Something" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/sections",
        json!({ "name": "Oversized", "description": "d".repeat(256) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
