use rust_decimal::Decimal;
use serde::Serialize;

use super::closed_trades;
use crate::models::Trade;

/// Headline dashboard statistics over the closed-trade history.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOverview {
    pub total_trades: i64,
    pub net_pnl: Decimal,
    pub win_count: i64,
    pub loss_count: i64,
    pub win_rate: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    /// avg_win / avg_loss; `None` is the infinite sentinel used when the
    /// journal has wins but not a single losing trade.
    pub payoff_ratio: Option<Decimal>,
    pub max_win_streak: i64,
    /// Trailing same-outcome run from the most recent closed trade backward:
    /// positive for wins, negative for losses.
    pub current_streak: i64,
}

/// Sum of stored net P&L over closed trades, absent values counted as zero.
pub fn net_pnl(trades: &[Trade]) -> Decimal {
    trades
        .iter()
        .filter(|t| t.is_closed())
        .map(|t| t.realized_pnl())
        .sum()
}

pub fn overview(trades: &[Trade]) -> StatsOverview {
    let closed = closed_trades(trades);
    let total_trades = closed.len() as i64;

    let wins: Vec<Decimal> = closed
        .iter()
        .filter(|t| t.realized_pnl() > Decimal::ZERO)
        .map(|t| t.realized_pnl())
        .collect();
    let losses: Vec<Decimal> = closed
        .iter()
        .filter(|t| t.realized_pnl() <= Decimal::ZERO)
        .map(|t| t.realized_pnl())
        .collect();

    let win_count = wins.len() as i64;
    let loss_count = losses.len() as i64;

    let win_rate = if total_trades > 0 {
        Decimal::from(win_count) / Decimal::from(total_trades) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let gross_profit: Decimal = wins.iter().copied().sum();
    let gross_loss: Decimal = losses.iter().copied().sum::<Decimal>().abs();

    let avg_win = if win_count > 0 {
        gross_profit / Decimal::from(win_count)
    } else {
        Decimal::ZERO
    };
    let avg_loss = if loss_count > 0 {
        gross_loss / Decimal::from(loss_count)
    } else {
        Decimal::ZERO
    };

    let payoff_ratio = if avg_loss.is_zero() {
        if avg_win > Decimal::ZERO {
            None
        } else {
            Some(Decimal::ZERO)
        }
    } else {
        Some(avg_win / avg_loss)
    };

    let (max_win_streak, current_streak) = streaks(&closed);

    StatsOverview {
        total_trades,
        net_pnl: net_pnl(trades),
        win_count,
        loss_count,
        win_rate,
        gross_profit,
        gross_loss,
        avg_win,
        avg_loss,
        payoff_ratio,
        max_win_streak,
        current_streak,
    }
}

/// Longest winning run over the chronological history, plus the signed
/// trailing run: walking backward from the last closed trade, the streak
/// stops at the first outcome flip.
fn streaks(closed: &[&Trade]) -> (i64, i64) {
    let mut max_win_streak = 0i64;
    let mut run = 0i64;
    for t in closed {
        if t.realized_pnl() > Decimal::ZERO {
            run += 1;
            max_win_streak = max_win_streak.max(run);
        } else {
            run = 0;
        }
    }

    let mut current_streak = 0i64;
    if let Some(last) = closed.last() {
        let last_is_win = last.realized_pnl() > Decimal::ZERO;
        for t in closed.iter().rev() {
            let is_win = t.realized_pnl() > Decimal::ZERO;
            if is_win != last_is_win {
                break;
            }
            current_streak += if last_is_win { 1 } else { -1 };
        }
    }

    (max_win_streak, current_streak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{at, closed, trade};

    #[test]
    fn test_empty_journal_defaults() {
        let o = overview(&[]);
        assert_eq!(o.total_trades, 0);
        assert_eq!(o.net_pnl, Decimal::ZERO);
        assert_eq!(o.win_rate, Decimal::ZERO);
        assert_eq!(o.max_win_streak, 0);
        assert_eq!(o.current_streak, 0);
        assert_eq!(o.payoff_ratio, Some(Decimal::ZERO));
    }

    #[test]
    fn test_open_trades_do_not_count() {
        let trades = vec![
            trade(Some(500), None, None),
            closed(100, at(2024, 1, 2, 10)),
        ];
        let o = overview(&trades);
        assert_eq!(o.total_trades, 1);
        assert_eq!(o.net_pnl, Decimal::from(100));
    }

    #[test]
    fn test_net_pnl_order_independent() {
        let a = vec![
            closed(100, at(2024, 1, 3, 10)),
            closed(-50, at(2024, 1, 1, 10)),
            closed(200, at(2024, 1, 2, 10)),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(net_pnl(&a), net_pnl(&b));
        assert_eq!(net_pnl(&a), Decimal::from(250));
    }

    #[test]
    fn test_win_rate_counts_breakeven_as_loss() {
        let trades = vec![
            closed(100, at(2024, 1, 1, 10)),
            closed(0, at(2024, 1, 2, 10)),
        ];
        let o = overview(&trades);
        assert_eq!(o.win_count, 1);
        assert_eq!(o.loss_count, 1);
        assert_eq!(o.win_rate, Decimal::from(50));
    }

    #[test]
    fn test_streak_sign_convention() {
        // win, win, loss, win -> longest run 2, trailing single win
        let trades = vec![
            closed(100, at(2024, 1, 1, 10)),
            closed(50, at(2024, 1, 2, 10)),
            closed(-30, at(2024, 1, 3, 10)),
            closed(80, at(2024, 1, 4, 10)),
        ];
        let o = overview(&trades);
        assert_eq!(o.max_win_streak, 2);
        assert_eq!(o.current_streak, 1);
    }

    #[test]
    fn test_trailing_losses_negative() {
        let trades = vec![
            closed(100, at(2024, 1, 1, 10)),
            closed(-30, at(2024, 1, 2, 10)),
            closed(-10, at(2024, 1, 3, 10)),
        ];
        let o = overview(&trades);
        assert_eq!(o.current_streak, -2);
        assert_eq!(o.max_win_streak, 1);
    }

    #[test]
    fn test_streaks_use_exit_order_not_input_order() {
        let mut trades = vec![
            closed(100, at(2024, 1, 1, 10)),
            closed(50, at(2024, 1, 2, 10)),
            closed(-30, at(2024, 1, 3, 10)),
        ];
        trades.reverse();
        let o = overview(&trades);
        assert_eq!(o.max_win_streak, 2);
        assert_eq!(o.current_streak, -1);
    }

    #[test]
    fn test_gross_and_average_sides() {
        let trades = vec![
            closed(300, at(2024, 1, 1, 10)),
            closed(100, at(2024, 1, 2, 10)),
            closed(-100, at(2024, 1, 3, 10)),
        ];
        let o = overview(&trades);
        assert_eq!(o.gross_profit, Decimal::from(400));
        assert_eq!(o.gross_loss, Decimal::from(100));
        assert_eq!(o.avg_win, Decimal::from(200));
        assert_eq!(o.avg_loss, Decimal::from(100));
        assert_eq!(o.payoff_ratio, Some(Decimal::from(2)));
    }

    #[test]
    fn test_payoff_ratio_infinite_sentinel() {
        let trades = vec![
            closed(300, at(2024, 1, 1, 10)),
            closed(100, at(2024, 1, 2, 10)),
        ];
        let o = overview(&trades);
        assert_eq!(o.gross_loss, Decimal::ZERO);
        assert_eq!(o.payoff_ratio, None);
    }
}
