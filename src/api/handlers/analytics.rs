use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::analytics::{self, DayWinRate, EquityPoint, SetupPnl, StatsOverview, WeekPnl};
use crate::db::trade_repo;
use crate::errors::AppError;
use crate::AppState;

/// Month window for the weekly P&L and equity-curve charts; defaults to the
/// current calendar month.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthQuery {
    fn resolve(&self) -> Result<(i32, u32), AppError> {
        let today = Utc::now().date_naive();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month.unwrap_or_else(|| today.month());
        if !(1..=12).contains(&month) {
            return Err(AppError::BadRequest(format!("invalid month {month}")));
        }
        Ok((year, month))
    }
}

/// GET /api/analytics/overview
pub async fn overview(State(state): State<AppState>) -> Result<Json<StatsOverview>, AppError> {
    let trades = trade_repo::get_all_trades(&state.db).await?;
    Ok(Json(analytics::overview(&trades)))
}

/// GET /api/analytics/daily — win rate per calendar weekday
pub async fn daily(State(state): State<AppState>) -> Result<Json<Vec<DayWinRate>>, AppError> {
    let trades = trade_repo::get_all_trades(&state.db).await?;
    Ok(Json(analytics::day_of_week_win_rates(&trades)))
}

/// GET /api/analytics/weekly?year=&month= — net P&L per ISO week
pub async fn weekly(
    State(state): State<AppState>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<Vec<WeekPnl>>, AppError> {
    let (year, month) = q.resolve()?;
    let trades = trade_repo::get_all_trades(&state.db).await?;
    Ok(Json(analytics::weekly_pnl(&trades, year, month)))
}

/// GET /api/analytics/equity-curve?year=&month= — cumulative P&L per trade
pub async fn equity_curve(
    State(state): State<AppState>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<Vec<EquityPoint>>, AppError> {
    let (year, month) = q.resolve()?;
    let trades = trade_repo::get_all_trades(&state.db).await?;
    Ok(Json(analytics::equity_curve(&trades, year, month)))
}

/// GET /api/analytics/setups — net P&L grouped by setup label
pub async fn setups(State(state): State<AppState>) -> Result<Json<Vec<SetupPnl>>, AppError> {
    let trades = trade_repo::get_all_trades(&state.db).await?;
    Ok(Json(analytics::setup_pnl(&trades)))
}
