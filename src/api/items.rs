use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use itemshelf_backend::search;
use itemshelf_backend::{Item, ItemDraft};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/items - 获取所有物品
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list_all().await.map_err(error_response)?;
    Ok(Json(items))
}

/// POST /api/items - 添加新物品
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ItemDraft>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.store.create(draft).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items/search?q= - 搜索物品
///
/// Missing `q` behaves like an empty query and returns every item.
pub async fn search_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let query = params.q.unwrap_or_default();
    let items = state.store.list_all().await.map_err(error_response)?;
    let total = items.len();

    let hits = search::search_owned(items, &query);
    tracing::debug!("Search {:?}: {} of {} items matched", query, hits.len(), total);

    Ok(Json(hits))
}

#[cfg(test)]
mod tests {
    use crate::api::{router, STORAGE_ERROR_MESSAGE};
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use itemshelf_backend::store::{ItemRepository, SqliteItemRepository};
    use itemshelf_backend::{CatalogError, Item, ItemStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FailingRepository;

    #[async_trait]
    impl ItemRepository for FailingRepository {
        async fn put(&self, _item: Item) -> itemshelf_backend::error::Result<Item> {
            Err(CatalogError::StorageUnavailable("disk I/O error".to_string()))
        }

        async fn get_all(&self) -> itemshelf_backend::error::Result<Vec<Item>> {
            Err(CatalogError::StorageUnavailable("disk I/O error".to_string()))
        }
    }

    async fn test_app() -> Router {
        let repo = SqliteItemRepository::connect("sqlite::memory:").await.unwrap();
        repo.run_migrations().await.unwrap();
        router(Arc::new(AppState { store: ItemStore::new(Arc::new(repo)) }))
    }

    fn failing_app() -> Router {
        router(Arc::new(AppState { store: ItemStore::new(Arc::new(FailingRepository)) }))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn seed(app: &Router) {
        let drill = json!({"name": "Drill", "category": "Tools", "location": "Garage shelf B", "tags": ["power"]});
        let scarf = json!({"name": "Scarf", "category": "Clothing", "location": "Closet", "tags": ["winter", "red"]});
        for body in [drill, scarf] {
            let (status, _) = send(app, post_json("/api/items", body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }
    }

    fn names(body: &Value) -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_create_returns_full_record() {
        let app = test_app().await;
        let body = json!({
            "name": "Drill",
            "category": "Tools",
            "location": "Garage shelf B",
            "image": "file:///photos/drill.jpg",
            "tags": ["power"]
        });

        let (status, item) = send(&app, post_json("/api/items", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(item["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(item["createdAt"].is_string());
        assert_eq!(item["image"], "file:///photos/drill.jpg");
        assert_eq!(item["tags"], json!(["power"]));
    }

    #[tokio::test]
    async fn test_create_without_image_or_tags() {
        let app = test_app().await;
        let body = json!({"name": "Scarf", "category": "Clothing", "location": "Closet"});

        let (status, item) = send(&app, post_json("/api/items", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(item["image"].is_null());
        assert_eq!(item["tags"], json!([]));
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let app = test_app().await;
        let body = json!({"name": "Drill", "category": "", "tags": []});

        let (status, error) = send(&app, post_json("/api/items", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].as_str().unwrap().contains("category"));

        let (_, list) = send(&app, get("/api/items")).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_null_required_field_is_validation_error() {
        let app = test_app().await;
        let body = json!({"name": null, "category": "Tools", "location": "Garage", "tags": []});

        let (status, error) = send(&app, post_json("/api/items", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].as_str().unwrap().contains("name"));

        let (_, list) = send(&app, get("/api/items")).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_null_tags_and_image_stored_empty() {
        let app = test_app().await;
        let body = json!({"name": "Scarf", "category": "Clothing", "location": "Closet", "image": null, "tags": null});

        let (status, item) = send(&app, post_json("/api/items", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["tags"], json!([]));
        assert!(item["image"].is_null());
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let app = test_app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/items")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let app = test_app().await;
        seed(&app).await;

        let (status, list) = send(&app, get("/api/items")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&list), vec!["Drill", "Scarf"]);
    }

    #[tokio::test]
    async fn test_search_scenario() {
        let app = test_app().await;
        seed(&app).await;

        let (_, red) = send(&app, get("/api/items/search?q=red")).await;
        assert_eq!(names(&red), vec!["Scarf"]);

        let (_, garage) = send(&app, get("/api/items/search?q=garage")).await;
        assert_eq!(names(&garage), vec!["Drill"]);

        let (_, both) = send(&app, get("/api/items/search?q=o")).await;
        assert_eq!(names(&both), vec!["Drill", "Scarf"]);

        let (_, none) = send(&app, get("/api/items/search?q=zzz_no_such_token")).await;
        assert_eq!(none, json!([]));
    }

    #[tokio::test]
    async fn test_search_empty_or_missing_query_returns_all() {
        let app = test_app().await;
        seed(&app).await;

        for uri in ["/api/items/search", "/api/items/search?q=", "/api/items/search?q=%20%20"] {
            let (status, list) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(names(&list), vec!["Drill", "Scarf"]);
        }
    }

    #[tokio::test]
    async fn test_search_treats_pattern_characters_literally() {
        let app = test_app().await;
        seed(&app).await;

        let (status, list) = send(&app, get("/api/items/search?q=.%2A")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_search_matches_client_side_filter() {
        let app = test_app().await;
        seed(&app).await;

        let (_, all) = send(&app, get("/api/items")).await;
        let snapshot: Vec<Item> = serde_json::from_value(all).unwrap();

        for q in ["BOX", "winter", "shelf", "o"] {
            let (_, remote) = send(&app, get(&format!("/api/items/search?q={}", q))).await;
            let remote: Vec<Item> = serde_json::from_value(remote).unwrap();
            assert_eq!(remote, itemshelf_backend::search::search(&snapshot, q));
        }
    }

    #[tokio::test]
    async fn test_storage_failures_are_500() {
        let app = failing_app();

        let body = json!({"name": "Drill", "category": "Tools", "location": "Garage"});
        let (status, error) = send(&app, post_json("/api/items", body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error["message"], STORAGE_ERROR_MESSAGE);
        assert!(!error["message"].as_str().unwrap().contains("disk I/O"));

        let (status, _) = send(&app, get("/api/items")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&app, get("/api/items/search?q=drill")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
