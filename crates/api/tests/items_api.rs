mod common;

use serde_json::json;

use common::{body_json, build_test_app, create_item, create_user, delete, get, patch, post};

#[tokio::test]
async fn create_requires_sharer_header() {
    let app = build_test_app();

    let response = post(
        &app,
        "/items",
        None,
        json!({ "name": "Drill", "description": "Cordless drill", "available": true }),
    )
    .await;
    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_requires_existing_owner() {
    let app = build_test_app();

    let response = post(
        &app,
        "/items",
        Some(42),
        json!({ "name": "Drill", "description": "Cordless drill", "available": true }),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn create_and_fetch_item() {
    let app = build_test_app();
    let owner = create_user(&app, "Alice", "alice@example.com").await;

    let id = create_item(&app, owner, "Drill", "Cordless drill", true).await;

    let response = get(&app, &format!("/items/{id}"), None).await;
    assert_eq!(response.status(), 200);
    let item = body_json(response).await;
    assert_eq!(item["name"], "Drill");
    assert_eq!(item["owner_id"], owner);
    assert_eq!(item["available"], true);
}

#[tokio::test]
async fn list_shows_only_own_items() {
    let app = build_test_app();
    let alice = create_user(&app, "Alice", "alice@example.com").await;
    let bob = create_user(&app, "Bob", "bob@example.com").await;
    create_item(&app, alice, "Drill", "Cordless drill", true).await;
    create_item(&app, alice, "Ladder", "Step ladder", true).await;
    create_item(&app, bob, "Tent", "Two-person tent", true).await;

    let response = get(&app, "/items", Some(alice)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_owner_update_is_disguised_as_404() {
    let app = build_test_app();
    let alice = create_user(&app, "Alice", "alice@example.com").await;
    let bob = create_user(&app, "Bob", "bob@example.com").await;
    let id = create_item(&app, alice, "Drill", "Cordless drill", true).await;

    let response = patch(
        &app,
        &format!("/items/{id}"),
        Some(bob),
        Some(json!({ "name": "Stolen drill" })),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn search_matches_name_and_description() {
    let app = build_test_app();
    let owner = create_user(&app, "Alice", "alice@example.com").await;
    let drill = create_item(&app, owner, "Power Drill", "Cordless", true).await;
    let ladder = create_item(&app, owner, "Ladder", "Reaches drill bits on top shelf", true).await;
    create_item(&app, owner, "Tent", "Two-person tent", true).await;

    let response = get(&app, "/items/search?text=DRILL", None).await;
    assert_eq!(response.status(), 200);
    let found = body_json(response).await;
    let ids: Vec<i64> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![drill, ladder]);
}

#[tokio::test]
async fn blank_search_is_empty() {
    let app = build_test_app();
    let owner = create_user(&app, "Alice", "alice@example.com").await;
    create_item(&app, owner, "Drill", "Cordless drill", true).await;

    let response = get(&app, "/items/search?text=", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    let response = get(&app, "/items/search", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unavailable_items_are_not_searchable() {
    let app = build_test_app();
    let owner = create_user(&app, "Alice", "alice@example.com").await;
    create_item(&app, owner, "Drill", "Cordless drill", false).await;

    let response = get(&app, "/items/search?text=drill", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn toggling_availability_drives_the_index() {
    let app = build_test_app();
    let owner = create_user(&app, "Alice", "alice@example.com").await;
    let id = create_item(&app, owner, "Drill", "Cordless drill", true).await;

    let response = patch(
        &app,
        &format!("/items/{id}"),
        Some(owner),
        Some(json!({ "available": false })),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = get(&app, "/items/search?text=drill", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    let response = patch(
        &app,
        &format!("/items/{id}"),
        Some(owner),
        Some(json!({ "available": true })),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = get(&app, "/items/search?text=drill", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_evicts_from_search() {
    let app = build_test_app();
    let owner = create_user(&app, "Alice", "alice@example.com").await;
    let id = create_item(&app, owner, "Drill", "Cordless drill", true).await;

    let response = delete(&app, &format!("/items/{id}"), Some(owner)).await;
    assert_eq!(response.status(), 204);

    let response = get(&app, "/items/search?text=drill", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    let response = get(&app, &format!("/items/{id}"), None).await;
    assert_eq!(response.status(), 404);
}
