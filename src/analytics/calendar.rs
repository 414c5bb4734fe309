use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::closed_trades;
use crate::models::Trade;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Serialize)]
pub struct DayWinRate {
    pub day: String,
    pub win_rate: Decimal,
    pub trades: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekPnl {
    pub week_start: NaiveDate,
    pub pnl: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquityPoint {
    pub exit_at: DateTime<Utc>,
    pub pnl: Decimal,
    pub equity: Decimal,
}

/// Win rate per calendar weekday, bucketed by exit date. Monday through
/// Friday always appear (0% when empty); Saturday and Sunday are dropped
/// when they hold no trades, to keep the dashboard table compact.
pub fn day_of_week_win_rates(trades: &[Trade]) -> Vec<DayWinRate> {
    let mut wins = [0i64; 7];
    let mut totals = [0i64; 7];

    for t in closed_trades(trades) {
        let Some(exit) = t.exit_at else { continue };
        let idx = exit.date_naive().weekday().num_days_from_monday() as usize;
        totals[idx] += 1;
        if t.realized_pnl() > Decimal::ZERO {
            wins[idx] += 1;
        }
    }

    (0..7)
        .filter(|&i| i < 5 || totals[i] > 0)
        .map(|i| DayWinRate {
            day: DAY_NAMES[i].to_string(),
            win_rate: if totals[i] > 0 {
                Decimal::from(wins[i]) / Decimal::from(totals[i]) * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            },
            trades: totals[i],
        })
        .collect()
}

/// Net P&L per ISO week for closed trades exiting in the given month,
/// keyed by the Monday starting each week (a Sunday exit rolls back six
/// days). Buckets come out in chronological order.
pub fn weekly_pnl(trades: &[Trade], year: i32, month: u32) -> Vec<WeekPnl> {
    let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for t in month_trades(trades, year, month) {
        let Some(exit) = t.exit_at else { continue };
        let date = exit.date_naive();
        let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        *buckets.entry(monday).or_insert(Decimal::ZERO) += t.realized_pnl();
    }

    buckets
        .into_iter()
        .map(|(week_start, pnl)| WeekPnl { week_start, pnl })
        .collect()
}

/// Running cumulative P&L over the month's closed trades, one point per
/// trade in exit order. The running total restarts each month; it is a
/// monthly window, not a global equity line.
pub fn equity_curve(trades: &[Trade], year: i32, month: u32) -> Vec<EquityPoint> {
    let mut equity = Decimal::ZERO;
    month_trades(trades, year, month)
        .into_iter()
        .filter_map(|t| {
            let exit_at = t.exit_at?;
            let pnl = t.realized_pnl();
            equity += pnl;
            Some(EquityPoint { exit_at, pnl, equity })
        })
        .collect()
}

fn month_trades(trades: &[Trade], year: i32, month: u32) -> Vec<&Trade> {
    closed_trades(trades)
        .into_iter()
        .filter(|t| {
            t.exit_at.is_some_and(|exit| {
                let date = exit.date_naive();
                date.year() == year && date.month() == month
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{at, closed};

    #[test]
    fn test_day_buckets_empty_journal() {
        let days = day_of_week_win_rates(&[]);
        // Weekends dropped when empty, weekdays pinned at 0%.
        assert_eq!(days.len(), 5);
        assert!(days.iter().all(|d| d.win_rate == Decimal::ZERO && d.trades == 0));
        assert_eq!(days[0].day, "Mon");
        assert_eq!(days[4].day, "Fri");
    }

    #[test]
    fn test_day_buckets_weekend_kept_when_traded() {
        // 2024-03-02 is a Saturday.
        let trades = vec![closed(100, at(2024, 3, 2, 10))];
        let days = day_of_week_win_rates(&trades);
        assert_eq!(days.len(), 6);
        let sat = days.iter().find(|d| d.day == "Sat").unwrap();
        assert_eq!(sat.trades, 1);
        assert_eq!(sat.win_rate, Decimal::ONE_HUNDRED);
        assert!(!days.iter().any(|d| d.day == "Sun"));
    }

    #[test]
    fn test_day_bucket_win_rate() {
        // Both trades exit on Monday 2024-03-04.
        let trades = vec![
            closed(100, at(2024, 3, 4, 10)),
            closed(-50, at(2024, 3, 4, 14)),
        ];
        let days = day_of_week_win_rates(&trades);
        let mon = days.iter().find(|d| d.day == "Mon").unwrap();
        assert_eq!(mon.trades, 2);
        assert_eq!(mon.win_rate, Decimal::from(50));
    }

    #[test]
    fn test_weekly_bucket_sunday_rolls_back() {
        // 2024-03-10 is a Sunday; its week starts Monday 2024-03-04.
        let trades = vec![closed(100, at(2024, 3, 10, 10))];
        let weeks = weekly_pnl(&trades, 2024, 3);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week_start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(weeks[0].pnl, Decimal::from(100));
    }

    #[test]
    fn test_weekly_buckets_sorted_and_summed() {
        let trades = vec![
            closed(200, at(2024, 3, 12, 10)), // week of Mar 11
            closed(100, at(2024, 3, 5, 10)),  // week of Mar 4
            closed(-50, at(2024, 3, 6, 10)),  // week of Mar 4
        ];
        let weeks = weekly_pnl(&trades, 2024, 3);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week_start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(weeks[0].pnl, Decimal::from(50));
        assert_eq!(weeks[1].week_start, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(weeks[1].pnl, Decimal::from(200));
    }

    #[test]
    fn test_equity_curve_running_total() {
        let trades = vec![
            closed(100, at(2024, 3, 1, 10)),
            closed(-50, at(2024, 3, 2, 10)),
            closed(200, at(2024, 3, 3, 10)),
        ];
        let curve = equity_curve(&trades, 2024, 3);
        let equities: Vec<Decimal> = curve.iter().map(|p| p.equity).collect();
        assert_eq!(
            equities,
            vec![Decimal::from(100), Decimal::from(50), Decimal::from(250)]
        );
    }

    #[test]
    fn test_equity_curve_restarts_per_month() {
        let trades = vec![
            closed(500, at(2024, 2, 28, 10)),
            closed(100, at(2024, 3, 1, 10)),
        ];
        let march = equity_curve(&trades, 2024, 3);
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].equity, Decimal::from(100));
    }

    #[test]
    fn test_month_window_excludes_other_months() {
        let trades = vec![
            closed(100, at(2024, 3, 5, 10)),
            closed(999, at(2024, 4, 1, 10)),
        ];
        assert_eq!(weekly_pnl(&trades, 2024, 3).len(), 1);
        assert!(equity_curve(&trades, 2024, 4).len() == 1);
    }
}
