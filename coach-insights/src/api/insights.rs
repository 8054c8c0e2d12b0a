//! POST /api/chess/insights

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use coach_common::insight::INSIGHTS_PATH;
use coach_common::{Insight, InsightRequest};
use tracing::{error, info};

use crate::{ApiError, ApiResult, AppState};

/// Generate coach commentary for a position
///
/// 400 `{error}` for a missing or empty `fen` or an unreadable body, 500
/// with fallback text when no model could answer.
pub async fn generate_insights(
    State(state): State<AppState>,
    payload: Result<Json<InsightRequest>, JsonRejection>,
) -> ApiResult<Json<Insight>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if request.fen.trim().is_empty() {
        return Err(ApiError::BadRequest("FEN string is required".to_string()));
    }

    info!(
        fen = %request.fen,
        san = request.move_san.as_deref().unwrap_or(""),
        skill = %request.skill_level(),
        "Insight requested"
    );

    match state.generator.generate(&request).await {
        Ok(insight) => Ok(Json(insight)),
        Err(e) => {
            error!("Insight generation failed: {}", e);
            let message = e.to_string();
            *state.last_error.write().await = Some(message.clone());
            Err(ApiError::Generation(message))
        }
    }
}

pub fn insight_routes() -> Router<AppState> {
    Router::new().route(INSIGHTS_PATH, post(generate_insights))
}
