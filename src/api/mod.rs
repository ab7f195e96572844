pub mod items;
pub mod server;

use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use itemshelf_backend::CatalogError;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

pub type ApiError = (StatusCode, Json<Value>);

/// Storage details stay in the log, not the response body.
pub const STORAGE_ERROR_MESSAGE: &str = "Storage unavailable, please retry later";

/// Map a catalog error to a `{message}` response / 错误转换为响应
pub fn error_response(err: CatalogError) -> ApiError {
    match err {
        CatalogError::Validation(message) => {
            tracing::warn!("Rejected item: {}", message);
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message })))
        }
        CatalogError::StorageUnavailable(detail) => {
            tracing::error!("Storage failure: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": STORAGE_ERROR_MESSAGE })),
            )
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route("/api/items/search", get(items::search_items))
        .with_state(state)
}
