use axum::extract::State;
use axum::Json;
use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::api::ws_types::WsMessage;
use crate::db::{challenge_repo, trade_repo};
use crate::errors::AppError;
use crate::models::{ChallengeProgress, GrowthChallenge};
use crate::AppState;

use super::trades::ApiResponse;

/// Active challenge with live progress derived from the trade list.
#[derive(Serialize)]
pub struct ChallengeView {
    pub challenge: GrowthChallenge,
    pub progress: ChallengeProgress,
}

#[derive(Deserialize)]
pub struct UpdateChallengeRequest {
    pub title: String,
    pub starting_capital: Decimal,
    pub target_capital: Decimal,
}

#[derive(Serialize)]
pub struct ArchiveResult {
    pub completed: GrowthChallenge,
    pub next: GrowthChallenge,
}

/// GET /api/challenge — active challenge + live progress
pub async fn get(State(state): State<AppState>) -> Result<Json<ChallengeView>, AppError> {
    let challenge = challenge_repo::get_active_challenge(&state.db).await?;
    let trades = trade_repo::get_all_trades(&state.db).await?;
    let progress = challenge.progress(analytics::net_pnl(&trades));

    Ok(Json(ChallengeView {
        challenge,
        progress,
    }))
}

/// PUT /api/challenge — edit the active challenge's goal fields
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateChallengeRequest>,
) -> Result<Json<ApiResponse<GrowthChallenge>>, AppError> {
    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    let challenge = challenge_repo::update_active_challenge(
        &state.db,
        body.title.trim(),
        body.starting_capital,
        body.target_capital,
    )
    .await?;

    let _ = state.ws_tx.send(WsMessage::ChallengeUpdate(challenge.clone()));

    Ok(Json(ApiResponse::ok(challenge)))
}

/// POST /api/challenge/archive — archive a completed milestone and roll into
/// the next one (starting capital compounds from the old target, the new
/// target doubles it)
pub async fn archive(State(state): State<AppState>) -> Result<Json<ArchiveResult>, AppError> {
    let mut active = challenge_repo::get_active_challenge(&state.db).await?;
    let trades = trade_repo::get_all_trades(&state.db).await?;
    let progress = active.progress(analytics::net_pnl(&trades));

    if !progress.goal_reached {
        return Err(AppError::BadRequest(format!(
            "challenge is only {:.1}% complete",
            progress.percent
        )));
    }

    active.current_capital = progress.current_capital;
    let (completed, next) = active.archive(Utc::now());
    challenge_repo::archive_pair(&state.db, &completed, &next).await?;

    counter!("challenges_archived_total").increment(1);
    tracing::info!(
        completed = %completed.id,
        next = %next.id,
        target = %next.target_capital,
        "challenge archived"
    );

    let _ = state.ws_tx.send(WsMessage::ChallengeUpdate(next.clone()));

    Ok(Json(ArchiveResult { completed, next }))
}

/// GET /api/challenge/history — completed milestones, newest first
pub async fn history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GrowthChallenge>>>, AppError> {
    let challenges = challenge_repo::get_completed_challenges(&state.db).await?;
    Ok(Json(ApiResponse::ok(challenges)))
}
