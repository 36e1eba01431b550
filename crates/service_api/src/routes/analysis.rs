//! Cost analysis endpoint
//!
//! Runs the pricing pipeline on a posted cost model and returns the
//! derived figures together with the recommendation list.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use serde::Serialize;

use precio_core::model::CostModel;
use precio_engine::analysis::{AnalysisResult, Analyzer, Recommendation};

use super::AppState;
use crate::error::ApiError;

/// Analysis response: the derived figures plus suggested actions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Full per-unit cost and price breakdown
    pub analysis: AnalysisResult,
    /// Suggested actions, empty for sustainable models
    pub recommendations: Vec<Recommendation>,
}

/// Build the analysis routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/analysis", post(analyze_handler))
}

/// POST /api/v1/analysis - Run the pricing pipeline on a cost model
///
/// The engine is pure and bounded, so it runs inline on the request task.
async fn analyze_handler(Json(model): Json<CostModel>) -> Result<impl IntoResponse, ApiError> {
    let analyzer = Analyzer::new();
    let analysis = analyzer.analyze(&model)?;
    let recommendations = analyzer.recommend(&analysis, &model);

    Ok((
        StatusCode::OK,
        Json(AnalysisResponse {
            analysis,
            recommendations,
        }),
    ))
}
