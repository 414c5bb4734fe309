use axum::extract::State;
use axum::Json;
use metrics::counter;

use crate::db::trade_repo;
use crate::errors::AppError;
use crate::services::coach::CoachAnalysis;
use crate::AppState;

use super::trades::ApiResponse;

/// POST /api/coach/analysis — narrative feedback over the closed-trade
/// history. A coach failure surfaces as an error response and leaves the
/// journal untouched.
pub async fn analyze(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CoachAnalysis>>, AppError> {
    let Some(coach) = state.coach.as_ref() else {
        return Err(AppError::Unavailable(
            "coach is not configured (GEMINI_API_KEY unset)".into(),
        ));
    };

    let trades = trade_repo::get_all_trades(&state.db).await?;
    let closed = trades.iter().filter(|t| t.is_closed()).count();
    if closed < state.config.coach_min_closed_trades {
        return Err(AppError::BadRequest(format!(
            "log at least {} closed trades to unlock coach analysis",
            state.config.coach_min_closed_trades
        )));
    }

    counter!("coach_requests_total").increment(1);
    match coach.analyze(&trades).await {
        Ok(analysis) => Ok(Json(ApiResponse::ok(analysis))),
        Err(e) => {
            counter!("coach_failures_total").increment(1);
            tracing::warn!(error = %e, "coach analysis failed");
            Err(AppError::Internal(e))
        }
    }
}
