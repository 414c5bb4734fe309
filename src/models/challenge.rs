use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Completed,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeStatus::Active => "active",
            ChallengeStatus::Completed => "completed",
        }
    }
}

/// A capital-growth goal. `current_capital` is a stored convenience value;
/// live progress is always derived from the trade list via `progress()`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrowthChallenge {
    pub id: Uuid,
    pub title: String,
    pub starting_capital: Decimal,
    pub target_capital: Decimal,
    pub current_capital: Decimal,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Derived goal-progress view for the active challenge.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeProgress {
    pub current_capital: Decimal,
    pub percent: Decimal,
    pub goal_reached: bool,
}

pub const DEFAULT_CHALLENGE_TITLE: &str = "10L Professional Milestone";
pub const NEXT_CHALLENGE_TITLE: &str = "Next Professional Milestone";

impl GrowthChallenge {
    /// Seed challenge for a fresh journal: 5L starting capital, 10L target.
    pub fn default_seed(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_CHALLENGE_TITLE.to_string(),
            starting_capital: Decimal::from(500_000),
            target_capital: Decimal::from(1_000_000),
            current_capital: Decimal::from(500_000),
            start_at: now,
            end_at: None,
            status: ChallengeStatus::Active.as_str().to_string(),
            created_at: None,
        }
    }

    /// Progress against the goal given the aggregate net P&L of all trades.
    ///
    /// Percent is clamped to [0, 100]; a goal gap that is zero or negative
    /// yields 0% by convention.
    pub fn progress(&self, net_pnl: Decimal) -> ChallengeProgress {
        let current_capital = self.starting_capital + net_pnl;
        let gap = self.target_capital - self.starting_capital;

        let percent = if gap > Decimal::ZERO {
            let earned = current_capital - self.starting_capital;
            (earned / gap * Decimal::ONE_HUNDRED)
                .max(Decimal::ZERO)
                .min(Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        ChallengeProgress {
            current_capital,
            percent,
            goal_reached: percent >= Decimal::ONE_HUNDRED,
        }
    }

    /// Archive a completed milestone and roll into the next one.
    ///
    /// Returns the completed historical entry (status flipped, `end_at` set)
    /// and the successor: starting capital compounds from the old target, the
    /// new target doubles it. Callers must have established >= 100% progress
    /// first; this transition does not re-check it.
    pub fn archive(self, now: DateTime<Utc>) -> (GrowthChallenge, GrowthChallenge) {
        let next = GrowthChallenge {
            id: Uuid::new_v4(),
            title: NEXT_CHALLENGE_TITLE.to_string(),
            starting_capital: self.target_capital,
            target_capital: self.target_capital * Decimal::from(2),
            current_capital: self.target_capital,
            start_at: now,
            end_at: None,
            status: ChallengeStatus::Active.as_str().to_string(),
            created_at: None,
        };

        let completed = GrowthChallenge {
            status: ChallengeStatus::Completed.as_str().to_string(),
            end_at: Some(now),
            ..self
        };

        (completed, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(starting: i64, target: i64) -> GrowthChallenge {
        GrowthChallenge {
            starting_capital: Decimal::from(starting),
            target_capital: Decimal::from(target),
            ..GrowthChallenge::default_seed(Utc::now())
        }
    }

    #[test]
    fn test_progress_halfway() {
        let c = challenge(500_000, 1_000_000);
        let p = c.progress(Decimal::from(250_000));
        assert_eq!(p.current_capital, Decimal::from(750_000));
        assert_eq!(p.percent, Decimal::from(50));
        assert!(!p.goal_reached);
    }

    #[test]
    fn test_progress_exactly_complete() {
        let c = challenge(500_000, 1_000_000);
        let p = c.progress(Decimal::from(500_000));
        assert_eq!(p.current_capital, Decimal::from(1_000_000));
        assert_eq!(p.percent, Decimal::ONE_HUNDRED);
        assert!(p.goal_reached);
    }

    #[test]
    fn test_progress_clamped_above_and_below() {
        let c = challenge(500_000, 1_000_000);
        assert_eq!(c.progress(Decimal::from(2_000_000)).percent, Decimal::ONE_HUNDRED);
        assert_eq!(c.progress(Decimal::from(-100_000)).percent, Decimal::ZERO);
    }

    #[test]
    fn test_progress_degenerate_gap() {
        let c = challenge(500_000, 500_000);
        assert_eq!(c.progress(Decimal::from(100_000)).percent, Decimal::ZERO);
    }

    #[test]
    fn test_archive_compounds_capital() {
        let c = challenge(500_000, 1_000_000);
        let old_id = c.id;
        let now = Utc::now();
        let (completed, next) = c.archive(now);

        assert_eq!(completed.id, old_id);
        assert_eq!(completed.status, "completed");
        assert_eq!(completed.end_at, Some(now));

        assert_ne!(next.id, old_id);
        assert_eq!(next.status, "active");
        assert_eq!(next.starting_capital, Decimal::from(1_000_000));
        assert_eq!(next.target_capital, Decimal::from(2_000_000));
        assert_eq!(next.current_capital, Decimal::from(1_000_000));
        assert!(next.end_at.is_none());
    }
}
