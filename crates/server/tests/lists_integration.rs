//! Integration tests for list management endpoints.

mod common;

use axum::http::StatusCode;
use common::TestFixture;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_lists() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
        .await;
    assert_status!(response, StatusCode::CREATED);

    let response = fixture.get("/api/v1/users/alice/lists").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["lists"], json!(["Reading"]));
}

#[tokio::test]
async fn test_create_duplicate_list_conflicts() {
    let fixture = TestFixture::new().await;

    fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
        .await;

    // Case-insensitive duplicate check
    let response = fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "reading" }))
        .await;
    assert_status!(response, StatusCode::CONFLICT);

    let response = fixture.get("/api/v1/users/alice/lists").await;
    assert_eq!(response.body["lists"], json!(["Reading"]));
}

#[tokio::test]
async fn test_create_blank_list_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "   " }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lists_are_per_user() {
    let fixture = TestFixture::new().await;

    fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
        .await;

    let response = fixture.get("/api/v1/users/bob/lists").await;
    assert_eq!(response.body["lists"], json!([]));
}

#[tokio::test]
async fn test_empty_list_has_no_visible_books() {
    let fixture = TestFixture::new().await;

    fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
        .await;

    // The backing placeholder entry must never surface
    let response = fixture
        .get("/api/v1/users/alice/lists/Reading/books")
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["books"], json!([]));

    let response = fixture.get("/api/v1/users/alice/books").await;
    assert_eq!(response.body["books"], json!([]));
}

#[tokio::test]
async fn test_selectable_lists_exclude_added_books_bucket() {
    let fixture = TestFixture::new().await;

    fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
        .await;
    fixture
        .post(
            "/api/v1/users/alice/books",
            json!({
                "book": { "id": "vol1", "title": "Dune", "authors": ["Frank Herbert"] },
                "list": "Reading"
            }),
        )
        .await;

    let response = fixture.get("/api/v1/users/alice/lists").await;
    let all: Vec<String> = serde_json::from_value(response.body["lists"].clone()).unwrap();
    assert!(all.contains(&"Добавленные книги".to_string()));

    let response = fixture
        .get("/api/v1/users/alice/lists?selectable=true")
        .await;
    assert_eq!(response.body["lists"], json!(["Reading"]));
}

#[tokio::test]
async fn test_rename_list_preserves_other_tags() {
    let fixture = TestFixture::new().await;

    fixture
        .post(
            "/api/v1/users/alice/books",
            json!({
                "book": { "id": "vol1", "title": "Dune", "authors": ["Frank Herbert"] },
                "list": "Reading"
            }),
        )
        .await;

    let response = fixture
        .put(
            "/api/v1/users/alice/lists/Reading",
            json!({ "new_name": "Currently Reading" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["renamed"], json!(1));

    let response = fixture.get("/api/v1/users/alice/lists").await;
    let lists: Vec<String> = serde_json::from_value(response.body["lists"].clone()).unwrap();
    assert!(lists.contains(&"Currently Reading".to_string()));
    assert!(lists.contains(&"Добавленные книги".to_string()));
    assert!(!lists.contains(&"Reading".to_string()));
}

#[tokio::test]
async fn test_rename_unknown_list_touches_nothing() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .put(
            "/api/v1/users/alice/lists/Missing",
            json!({ "new_name": "New" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["renamed"], json!(0));
}

#[tokio::test]
async fn test_delete_list_removes_single_tag_entries() {
    let fixture = TestFixture::new().await;

    fixture
        .post(
            "/api/v1/users/alice/books",
            json!({
                "book": { "id": "vol1", "title": "Dune", "authors": ["Frank Herbert"] },
                "list": "Reading"
            }),
        )
        .await;

    // The entry carries "Reading, Добавленные книги"; deleting the bucket
    // keeps it, deleting both removes it.
    let response = fixture.delete("/api/v1/users/alice/lists/Reading").await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get("/api/v1/users/alice/books").await;
    assert_eq!(response.body["books"].as_array().unwrap().len(), 1);

    let response = fixture
        .delete("/api/v1/users/alice/lists/Добавленные книги")
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get("/api/v1/users/alice/books").await;
    assert_eq!(response.body["books"], json!([]));
}

#[tokio::test]
async fn test_delete_list_strips_tag_from_compound_entries() {
    let fixture = TestFixture::new().await;

    fixture
        .post(
            "/api/v1/users/alice/books",
            json!({
                "book": { "id": "vol1", "title": "Dune", "authors": ["Frank Herbert"] },
                "list": "Reading"
            }),
        )
        .await;

    fixture.delete("/api/v1/users/alice/lists/Reading").await;

    let response = fixture.get("/api/v1/users/alice/books").await;
    let entry = &response.body["books"][0];
    assert_eq!(entry["list_tags"], json!("Добавленные книги"));
}

#[tokio::test]
async fn test_delete_empty_list_removes_placeholder() {
    let fixture = TestFixture::new().await;

    fixture
        .post("/api/v1/users/alice/lists", json!({ "name": "Reading" }))
        .await;
    fixture.delete("/api/v1/users/alice/lists/Reading").await;

    let response = fixture.get("/api/v1/users/alice/lists").await;
    assert_eq!(response.body["lists"], json!([]));
}

#[tokio::test]
async fn test_categories_deduplicate_tags() {
    let fixture = TestFixture::new().await;

    fixture
        .post(
            "/api/v1/users/alice/books",
            json!({
                "book": { "id": "vol1", "title": "Dune", "authors": ["Frank Herbert"] },
                "list": "Sci-Fi"
            }),
        )
        .await;
    fixture
        .post(
            "/api/v1/users/alice/books",
            json!({
                "book": { "id": "vol2", "title": "Emma", "authors": ["Jane Austen"] },
                "list": "Sci-Fi"
            }),
        )
        .await;

    let response = fixture.get("/api/v1/users/alice/lists").await;
    assert_eq!(
        response.body["lists"],
        json!(["Sci-Fi", "Добавленные книги"])
    );
}
