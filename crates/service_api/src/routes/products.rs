//! Saved product endpoints
//!
//! A product snapshot is a cost model, its analysis, and the headline
//! figures at the moment of saving. The handler runs the engine inline
//! and persists the snapshot on the blocking pool.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};

use precio_core::model::CostModel;
use precio_engine::analysis::Analyzer;

use super::AppState;
use crate::error::ApiError;

/// Build the product routes
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/organizations/{org_id}/products",
        post(save_product_handler).get(list_products_handler),
    )
}

/// POST /api/v1/organizations/{org_id}/products - Analyze and persist
///
/// Validation failures surface as 422 before anything is written.
async fn save_product_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    Json(model): Json<CostModel>,
) -> Result<impl IntoResponse, ApiError> {
    let analyzer = Analyzer::new();
    let analysis = analyzer.analyze(&model)?;

    let store = state.store.clone();
    let saved =
        tokio::task::spawn_blocking(move || store.save_product(&org_id, &model, &analysis))
            .await??;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/organizations/{org_id}/products - List snapshots, newest first
async fn list_products_handler(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let products = tokio::task::spawn_blocking(move || store.list_products(&org_id)).await??;

    Ok((StatusCode::OK, Json(products)))
}
