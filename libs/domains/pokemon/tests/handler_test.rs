//! Handler tests for the Pokemon domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They exercise only the pokemon router against the in-memory
//! repository, not the full application with global middleware.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_pokemon::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

const DEFAULT_LIMIT: i64 = 6;

fn app() -> Router {
    let repo = InMemoryPokemonRepository::new();
    let service = PokemonService::new(Arc::new(repo), DEFAULT_LIMIT);
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn patch_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seed(app: &Router, name: &str, no: i64) -> Pokemon {
    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({ "name": name, "no": no, "type": ["electric"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_and_lowercases_name() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({ "name": "Pikachu", "no": 25, "type": ["electric"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let pokemon: Pokemon = json_body(response.into_body()).await;
    assert_eq!(pokemon.name, "pikachu");
    assert_eq!(pokemon.no, 25);
    assert_eq!(pokemon.types, vec!["electric".to_string()]);
    assert_eq!(pokemon.id.len(), 24);
}

#[tokio::test]
async fn test_create_validates_input() {
    let app = app();

    // Empty name fails the length validation
    let response = app
        .oneshot(post_json("/", json!({ "name": "", "no": 25 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_returns_409() {
    let app = app();
    seed(&app, "pikachu", 25).await;

    let response = app
        .oneshot(post_json("/", json!({ "name": "pikachu", "no": 26 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Pokemon already exists in db")
    );
}

#[tokio::test]
async fn test_list_returns_sorted_page() {
    let app = app();
    seed(&app, "squirtle", 7).await;
    seed(&app, "bulbasaur", 1).await;
    seed(&app, "charmander", 4).await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let pokemon: Vec<Pokemon> = json_body(response.into_body()).await;
    let nos: Vec<i64> = pokemon.iter().map(|p| p.no).collect();
    assert_eq!(nos, vec![1, 4, 7]);

    let response = app.oneshot(get("/?limit=1&offset=1")).await.unwrap();
    let pokemon: Vec<Pokemon> = json_body(response.into_body()).await;
    assert_eq!(pokemon.len(), 1);
    assert_eq!(pokemon[0].no, 4);
}

#[tokio::test]
async fn test_get_by_no_name_and_id() {
    let app = app();
    let created = seed(&app, "pikachu", 25).await;

    for uri in [
        "/25".to_string(),
        "/Pikachu".to_string(),
        format!("/{}", created.id),
    ] {
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "lookup via {uri}");
        let pokemon: Pokemon = json_body(response.into_body()).await;
        assert_eq!(pokemon.id, created.id);
    }
}

#[tokio::test]
async fn test_get_missing_returns_404_with_message() {
    let app = app();

    let response = app.oneshot(get("/missingno")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "Pokemon with id, name or no \"missingno\" not found"
    );
}

#[tokio::test]
async fn test_patch_merges_and_persists() {
    let app = app();
    seed(&app, "pikachu", 25).await;

    let response = app
        .clone()
        .oneshot(patch_json("/25", json!({ "name": "Raichu" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let pokemon: Pokemon = json_body(response.into_body()).await;
    assert_eq!(pokemon.name, "raichu");
    assert_eq!(pokemon.no, 25);

    let response = app.oneshot(get("/raichu")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_patch_missing_returns_404() {
    let app = app();

    let response = app
        .oneshot(patch_json("/25", json!({ "name": "raichu" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_204() {
    let app = app();
    let created = seed(&app, "pikachu", 25).await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/25")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_rejects_non_object_id() {
    let app = app();
    seed(&app, "pikachu", 25).await;

    // Delete resolves by ObjectId only; names and numbers are rejected
    let response = app.oneshot(delete("/pikachu")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_returns_400() {
    let app = app();

    let response = app
        .oneshot(delete("/507f1f77bcf86cd799439011"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "Pokemon with id \"507f1f77bcf86cd799439011\" not found"
    );
}
