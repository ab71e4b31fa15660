use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::RecommendationResult,
    routes::AppState,
};

/// Handler for the per-user recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(username): Path<String>,
) -> AppResult<Json<RecommendationResult>> {
    tracing::info!(
        request_id = %request_id,
        username = %username,
        "Processing recommendation request"
    );

    let result = state.recommender.recommend(&username).await?;

    tracing::info!(
        request_id = %request_id,
        source = ?result.source,
        count = result.recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(result))
}
