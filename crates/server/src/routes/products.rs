use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use models::product::{Product, ProductInput};
use service::product::store::ProductStore;

use crate::errors::ApiError;
use crate::extract::JsonOrForm;

/// List the whole collection. Never fails: an absent or corrupt backing file
/// reads as an empty collection.
pub async fn list(State(store): State<Arc<dyn ProductStore>>) -> Json<Vec<Product>> {
    Json(store.list().await)
}

/// Create a record from a JSON or form body.
pub async fn create(
    State(store): State<Arc<dyn ProductStore>>,
    JsonOrForm(input): JsonOrForm<ProductInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let product = store.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "product": product })),
    ))
}

/// Delete by id. The path segment is taken as a string and parsed here so
/// that a non-numeric id behaves as "no such record" rather than surfacing a
/// parse failure.
pub async fn remove(
    State(store): State<Arc<dyn ProductStore>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::new(StatusCode::NOT_FOUND, "Product not found"))?;
    store.delete(id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
