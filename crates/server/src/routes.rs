use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::product::store::ProductStore;

pub mod products;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health probe plus the product API.
///
/// Handlers only see the `ProductStore` capability, so the file-backed store
/// can be swapped for a database without touching them.
pub fn build_router(store: Arc<dyn ProductStore>, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/product", get(products::list).post(products::create))
        .route("/api/product/:id", delete(products::remove));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
