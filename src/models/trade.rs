use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{AssetClass, Direction, DEFAULT_MOOD};

/// Database row for the trades table. A trade is closed iff `exit_at` is set;
/// only closed trades enter the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trade {
    pub id: Uuid,
    pub symbol: String,
    pub direction: String,
    pub asset_class: String,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    pub fees: Decimal,
    pub pnl: Option<Decimal>,
    pub setup: Option<String>,
    pub mistakes: Vec<String>,
    pub followed_plan: bool,
    pub entry_reason: Option<String>,
    pub mood: Option<String>,
    pub lesson_learned: Option<String>,
    pub tags: Vec<String>,
    pub screenshot: Option<String>,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.exit_at.is_some()
    }

    /// Stored net P&L, absent treated as zero. The engine trusts this value
    /// and never recomputes it from the price fields.
    pub fn realized_pnl(&self) -> Decimal {
        self.pnl.unwrap_or(Decimal::ZERO)
    }
}

/// Incoming payload for creating or updating a trade. Journaling fields are
/// all optional; numeric fields default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDraft {
    pub symbol: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_asset_class")]
    pub asset_class: String,
    #[serde(default = "Utc::now")]
    pub entry_at: DateTime<Utc>,
    #[serde(default)]
    pub exit_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entry_price: Decimal,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub fees: Decimal,
    #[serde(default)]
    pub pnl: Option<Decimal>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub mistakes: Vec<String>,
    #[serde(default = "default_true")]
    pub followed_plan: bool,
    #[serde(default)]
    pub entry_reason: Option<String>,
    #[serde(default = "default_mood")]
    pub mood: Option<String>,
    #[serde(default)]
    pub lesson_learned: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub notes: String,
}

fn default_direction() -> String {
    Direction::Long.to_string()
}

fn default_asset_class() -> String {
    AssetClass::Stocks.to_string()
}

fn default_mood() -> Option<String> {
    Some(DEFAULT_MOOD.to_string())
}

fn default_true() -> bool {
    true
}

impl Default for TradeDraft {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            direction: default_direction(),
            asset_class: default_asset_class(),
            entry_at: Utc::now(),
            exit_at: None,
            entry_price: Decimal::ZERO,
            exit_price: None,
            quantity: Decimal::ZERO,
            fees: Decimal::ZERO,
            pnl: None,
            setup: None,
            mistakes: Vec::new(),
            followed_plan: true,
            entry_reason: None,
            mood: default_mood(),
            lesson_learned: None,
            tags: Vec::new(),
            screenshot: None,
            notes: String::new(),
        }
    }
}

impl TradeDraft {
    /// Reject drafts whose direction or asset class is outside the managed
    /// enumerations. Symbol may be any free text.
    pub fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("symbol must not be empty".into());
        }
        if Direction::from_api_str(&self.direction).is_none() {
            return Err(format!("unknown direction '{}'", self.direction));
        }
        if AssetClass::from_api_str(&self.asset_class).is_none() {
            return Err(format!("unknown asset class '{}'", self.asset_class));
        }
        Ok(())
    }

    /// Normalize free-text fields before persistence (symbol upper-cased,
    /// canonical enum spelling).
    pub fn normalized(mut self) -> Self {
        self.symbol = self.symbol.trim().to_uppercase();
        if let Some(dir) = Direction::from_api_str(&self.direction) {
            self.direction = dir.to_string();
        }
        if let Some(ac) = AssetClass::from_api_str(&self.asset_class) {
            self.asset_class = ac.to_string();
        }
        self
    }

    /// Net P&L for persistence: a supplied pnl wins; otherwise, for an exited
    /// position, direction-adjusted price delta x quantity minus fees. Open
    /// trades and drafts without exit price or quantity carry no P&L.
    pub fn effective_pnl(&self) -> Option<Decimal> {
        if self.pnl.is_some() {
            return self.pnl;
        }
        let exit_price = self.exit_price?;
        if self.quantity.is_zero() {
            return None;
        }
        let gross = match Direction::from_api_str(&self.direction)? {
            Direction::Long => (exit_price - self.entry_price) * self.quantity,
            Direction::Short => (self.entry_price - exit_price) * self.quantity,
        };
        Some(gross - self.fees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(direction: &str, entry: i64, exit: i64, qty: i64, fees: i64) -> TradeDraft {
        TradeDraft {
            symbol: "reliance".into(),
            direction: direction.into(),
            entry_price: Decimal::from(entry),
            exit_price: Some(Decimal::from(exit)),
            quantity: Decimal::from(qty),
            fees: Decimal::from(fees),
            exit_at: Some(Utc::now()),
            ..TradeDraft::default()
        }
    }

    #[test]
    fn test_effective_pnl_long() {
        let d = draft("Long", 100, 110, 10, 20);
        assert_eq!(d.effective_pnl(), Some(Decimal::from(80)));
    }

    #[test]
    fn test_effective_pnl_short() {
        let d = draft("Short", 110, 100, 10, 20);
        assert_eq!(d.effective_pnl(), Some(Decimal::from(80)));
    }

    #[test]
    fn test_supplied_pnl_trusted() {
        let mut d = draft("Long", 100, 110, 10, 20);
        d.pnl = Some(Decimal::from(999));
        assert_eq!(d.effective_pnl(), Some(Decimal::from(999)));
    }

    #[test]
    fn test_no_exit_price_no_pnl() {
        let mut d = draft("Long", 100, 110, 10, 20);
        d.exit_price = None;
        assert_eq!(d.effective_pnl(), None);
    }

    #[test]
    fn test_zero_quantity_no_pnl() {
        let d = draft("Long", 100, 110, 0, 20);
        assert_eq!(d.effective_pnl(), None);
    }

    #[test]
    fn test_normalized_uppercases_symbol() {
        let d = draft("long", 100, 110, 10, 0).normalized();
        assert_eq!(d.symbol, "RELIANCE");
        assert_eq!(d.direction, "Long");
    }

    #[test]
    fn test_validate_rejects_unknown_direction() {
        let d = draft("sideways", 100, 110, 10, 0);
        assert!(d.validate().is_err());
    }
}
