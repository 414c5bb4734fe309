use axum::extract::{Path, State};
use axum::Json;
use metrics::{counter, gauge};
use serde::Serialize;
use uuid::Uuid;

use crate::api::ws_types::WsMessage;
use crate::db::trade_repo::{self, UpdateOutcome};
use crate::errors::AppError;
use crate::models::{Trade, TradeDraft};
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Saved trade plus whether the persistence layer had to recreate it under
/// a new identity (callers must re-key their local entry when it did).
#[derive(Serialize)]
pub struct SaveTradeResult {
    pub trade: Trade,
    pub recreated: bool,
}

/// GET /api/trades — full journal snapshot, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Trade>>>, AppError> {
    let trades = trade_repo::get_all_trades(&state.db).await?;
    Ok(Json(ApiResponse::ok(trades)))
}

/// POST /api/trades — log a new trade
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<TradeDraft>,
) -> Result<Json<ApiResponse<SaveTradeResult>>, AppError> {
    draft.validate().map_err(AppError::BadRequest)?;
    let draft = draft.normalized();

    let trade = trade_repo::insert_trade(&state.db, &draft).await?;
    counter!("trades_logged_total").increment(1);
    tracing::info!(id = %trade.id, symbol = %trade.symbol, "trade logged");

    broadcast_snapshot(&state).await;

    Ok(Json(ApiResponse::ok(SaveTradeResult {
        trade,
        recreated: false,
    })))
}

/// PUT /api/trades/{id} — update a trade; a missing target is recreated
/// under a fresh identity rather than lost
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TradeDraft>,
) -> Result<Json<ApiResponse<SaveTradeResult>>, AppError> {
    draft.validate().map_err(AppError::BadRequest)?;
    let draft = draft.normalized();

    let outcome = trade_repo::update_trade(&state.db, id, &draft).await?;
    let result = match outcome {
        UpdateOutcome::Updated(trade) => {
            counter!("trades_updated_total").increment(1);
            SaveTradeResult {
                trade,
                recreated: false,
            }
        }
        UpdateOutcome::Recreated(trade) => {
            counter!("trades_recreated_total").increment(1);
            tracing::info!(old_id = %id, new_id = %trade.id, "trade recreated under new id");
            SaveTradeResult {
                trade,
                recreated: true,
            }
        }
    };

    broadcast_snapshot(&state).await;

    Ok(Json(ApiResponse::ok(result)))
}

/// DELETE /api/trades/{id} — idempotent delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    trade_repo::delete_trade(&state.db, id).await?;
    counter!("trades_deleted_total").increment(1);

    broadcast_snapshot(&state).await;

    Ok(Json(ApiResponse::ok(())))
}

/// Push a fresh full-journal snapshot to every connected WebSocket client.
/// The snapshot replaces client state wholesale; a failed fetch only skips
/// the push, it never fails the originating request.
pub(crate) async fn broadcast_snapshot(state: &AppState) {
    match trade_repo::get_all_trades(&state.db).await {
        Ok(trades) => {
            gauge!("journal_trades").set(trades.len() as f64);
            gauge!("open_positions")
                .set(trades.iter().filter(|t| !t.is_closed()).count() as f64);
            let _ = state.ws_tx.send(WsMessage::TradesSnapshot(trades));
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load snapshot for ws push");
        }
    }
}
