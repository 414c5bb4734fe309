use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::closed_trades;
use crate::models::Trade;

/// Bucket label for closed trades that carry no setup.
pub const UNKNOWN_SETUP: &str = "Unknown";

/// Sentinel profit factor reported when a setup has profits and zero losses.
pub const PROFIT_FACTOR_CAP: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Serialize)]
pub struct SetupPnl {
    pub name: String,
    pub pnl: Decimal,
}

/// Full per-setup breakdown for the setup manager view.
#[derive(Debug, Clone, Serialize)]
pub struct SetupStats {
    pub name: String,
    pub count: i64,
    pub pnl: Decimal,
    pub win_rate: Decimal,
    pub profit_factor: Decimal,
    pub avg_pnl: Decimal,
    pub is_custom: bool,
}

/// Net P&L grouped by setup label over all closed trades; trades without a
/// setup land in the "Unknown" bucket. Groups come out in name order.
pub fn setup_pnl(trades: &[Trade]) -> Vec<SetupPnl> {
    let mut groups: BTreeMap<String, Decimal> = BTreeMap::new();

    for t in closed_trades(trades) {
        let name = t
            .setup
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SETUP);
        *groups.entry(name.to_string()).or_insert(Decimal::ZERO) += t.realized_pnl();
    }

    groups
        .into_iter()
        .map(|(name, pnl)| SetupPnl { name, pnl })
        .collect()
}

/// Manager-view statistics for every managed setup label, sorted descending
/// by total P&L. Gross loss here only counts strictly negative trades, and a
/// loss-free profitable setup reports the capped profit factor.
pub fn setup_stats(trades: &[Trade], all_setups: &[String], custom_setups: &[String]) -> Vec<SetupStats> {
    let closed = closed_trades(trades);

    let mut stats: Vec<SetupStats> = all_setups
        .iter()
        .map(|name| {
            let setup_trades: Vec<&&Trade> = closed
                .iter()
                .filter(|t| t.setup.as_deref() == Some(name.as_str()))
                .collect();

            let count = setup_trades.len() as i64;
            let wins = setup_trades
                .iter()
                .filter(|t| t.realized_pnl() > Decimal::ZERO)
                .count() as i64;

            let total_pnl: Decimal = setup_trades.iter().map(|t| t.realized_pnl()).sum();
            let gross_profit: Decimal = setup_trades
                .iter()
                .map(|t| t.realized_pnl())
                .filter(|p| *p > Decimal::ZERO)
                .sum();
            let gross_loss: Decimal = setup_trades
                .iter()
                .map(|t| t.realized_pnl())
                .filter(|p| *p < Decimal::ZERO)
                .sum::<Decimal>()
                .abs();

            let profit_factor = if gross_loss.is_zero() {
                if gross_profit > Decimal::ZERO {
                    PROFIT_FACTOR_CAP
                } else {
                    Decimal::ZERO
                }
            } else {
                gross_profit / gross_loss
            };

            let win_rate = if count > 0 {
                Decimal::from(wins) / Decimal::from(count) * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            let avg_pnl = if count > 0 {
                total_pnl / Decimal::from(count)
            } else {
                Decimal::ZERO
            };

            SetupStats {
                name: name.clone(),
                count,
                pnl: total_pnl,
                win_rate,
                profit_factor,
                avg_pnl,
                is_custom: custom_setups.iter().any(|s| s == name),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.pnl.cmp(&a.pnl));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{at, trade};

    fn setup_trade(pnl: i64, setup: Option<&str>, day: u32) -> Trade {
        trade(Some(pnl), Some(at(2024, 3, day, 10)), setup)
    }

    #[test]
    fn test_setup_pnl_unknown_bucket() {
        let trades = vec![
            setup_trade(300, Some("Breakout"), 1),
            setup_trade(-100, None, 2),
        ];
        let groups = setup_pnl(&trades);
        assert_eq!(groups.len(), 2);
        let unknown = groups.iter().find(|g| g.name == UNKNOWN_SETUP).unwrap();
        assert_eq!(unknown.pnl, Decimal::from(-100));
    }

    #[test]
    fn test_setup_pnl_scenario() {
        let trades = vec![
            setup_trade(300, Some("Breakout"), 1),
            setup_trade(-100, Some("Breakout"), 2),
        ];
        let groups = setup_pnl(&trades);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Breakout");
        assert_eq!(groups[0].pnl, Decimal::from(200));
    }

    #[test]
    fn test_setup_stats_scenario() {
        let all = vec!["Breakout".to_string(), "Scalp".to_string()];
        let trades = vec![
            setup_trade(300, Some("Breakout"), 1),
            setup_trade(-100, Some("Breakout"), 2),
        ];
        let stats = setup_stats(&trades, &all, &[]);

        let breakout = stats.iter().find(|s| s.name == "Breakout").unwrap();
        assert_eq!(breakout.count, 2);
        assert_eq!(breakout.pnl, Decimal::from(200));
        assert_eq!(breakout.win_rate, Decimal::from(50));
        assert_eq!(breakout.avg_pnl, Decimal::from(100));
        assert_eq!(breakout.profit_factor, Decimal::from(3));

        // Untraded setups still appear, zeroed.
        let scalp = stats.iter().find(|s| s.name == "Scalp").unwrap();
        assert_eq!(scalp.count, 0);
        assert_eq!(scalp.profit_factor, Decimal::ZERO);
    }

    #[test]
    fn test_setup_stats_sorted_by_pnl_desc() {
        let all = vec!["A".to_string(), "B".to_string()];
        let trades = vec![
            setup_trade(100, Some("A"), 1),
            setup_trade(500, Some("B"), 2),
        ];
        let stats = setup_stats(&trades, &all, &[]);
        assert_eq!(stats[0].name, "B");
        assert_eq!(stats[1].name, "A");
    }

    #[test]
    fn test_profit_factor_capped_without_losses() {
        let all = vec!["Breakout".to_string()];
        let trades = vec![setup_trade(300, Some("Breakout"), 1)];
        let stats = setup_stats(&trades, &all, &[]);
        assert_eq!(stats[0].profit_factor, PROFIT_FACTOR_CAP);
    }

    #[test]
    fn test_custom_flag() {
        let all = vec!["Breakout".to_string(), "My Edge".to_string()];
        let custom = vec!["My Edge".to_string()];
        let stats = setup_stats(&[], &all, &custom);
        assert!(stats.iter().find(|s| s.name == "My Edge").unwrap().is_custom);
        assert!(!stats.iter().find(|s| s.name == "Breakout").unwrap().is_custom);
    }
}
