pub mod calendar;
pub mod setups;
pub mod stats;

pub use calendar::{day_of_week_win_rates, equity_curve, weekly_pnl, DayWinRate, EquityPoint, WeekPnl};
pub use setups::{setup_pnl, setup_stats, SetupPnl, SetupStats};
pub use stats::{net_pnl, overview, StatsOverview};

use crate::models::Trade;

/// Closed trades in chronological order by exit time. Every aggregation
/// starts from this view; open positions never enter the numbers.
pub fn closed_trades(trades: &[Trade]) -> Vec<&Trade> {
    let mut closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
    closed.sort_by_key(|t| t.exit_at);
    closed
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::Trade;

    /// Bare trade for aggregation tests; only the fields the engine reads
    /// carry meaning.
    pub fn trade(pnl: Option<i64>, exit_at: Option<DateTime<Utc>>, setup: Option<&str>) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            symbol: "TEST".into(),
            direction: "Long".into(),
            asset_class: "Stocks".into(),
            entry_at: exit_at.unwrap_or_else(Utc::now),
            exit_at,
            entry_price: Decimal::ZERO,
            exit_price: None,
            quantity: Decimal::ONE,
            fees: Decimal::ZERO,
            pnl: pnl.map(Decimal::from),
            setup: setup.map(|s| s.to_string()),
            mistakes: Vec::new(),
            followed_plan: true,
            entry_reason: None,
            mood: None,
            lesson_learned: None,
            tags: Vec::new(),
            screenshot: None,
            notes: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn closed(pnl: i64, exit_at: DateTime<Utc>) -> Trade {
        trade(Some(pnl), Some(exit_at), None)
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::{at, closed, trade};
    use super::*;

    #[test]
    fn test_closed_trades_filters_open_and_sorts() {
        let trades = vec![
            closed(100, at(2024, 3, 5, 10)),
            trade(None, None, None),
            closed(-50, at(2024, 3, 1, 10)),
        ];
        let view = closed_trades(&trades);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].exit_at, Some(at(2024, 3, 1, 10)));
        assert_eq!(view[1].exit_at, Some(at(2024, 3, 5, 10)));
    }
}
