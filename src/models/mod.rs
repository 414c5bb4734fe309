pub mod challenge;
pub mod profile;
pub mod trade;

pub use challenge::{ChallengeProgress, ChallengeStatus, GrowthChallenge};
pub use profile::JournalProfile;
pub use trade::{Trade, TradeDraft};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in setup labels; the journal profile adds custom ones on top.
pub const BUILTIN_SETUPS: &[&str] = &["Breakout", "Scalp", "Support/Resistance"];

/// Mistake tags seeded into a fresh journal profile.
pub const DEFAULT_MISTAKES: &[&str] = &[
    "FOMO",
    "Revenge Trading",
    "Overleveraged",
    "Impatience",
    "Did not follow plan",
    "Hope Trading",
    "Moved Stop Loss",
];

/// Trading rules seeded into a fresh journal profile.
pub const DEFAULT_RULES: &[&str] = &[
    "Stick to the trading plan",
    "Risk no more than 1% per trade",
    "Wait for setup confirmation",
    "No trading during high-impact news",
];

/// Managed mood labels for the journaling form.
pub const MOODS: &[&str] = &[
    "Calm",
    "Confident",
    "Fearful",
    "Greedy",
    "Anxious",
    "Excited",
    "Frustrated",
    "Bored",
];

pub const DEFAULT_MOOD: &str = "Calm";

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "long" | "buy" => Some(Direction::Long),
            "short" | "sell" => Some(Direction::Short),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Crypto,
    Forex,
    Stocks,
    Futures,
    Options,
}

impl AssetClass {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "crypto" => Some(AssetClass::Crypto),
            "forex" => Some(AssetClass::Forex),
            "stocks" => Some(AssetClass::Stocks),
            "futures" => Some(AssetClass::Futures),
            "options" => Some(AssetClass::Options),
            _ => None,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetClass::Crypto => "Crypto",
            AssetClass::Forex => "Forex",
            AssetClass::Stocks => "Stocks",
            AssetClass::Futures => "Futures",
            AssetClass::Options => "Options",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::from_api_str("Long"), Some(Direction::Long));
        assert_eq!(Direction::from_api_str("SHORT"), Some(Direction::Short));
        assert_eq!(Direction::from_api_str("sideways"), None);
    }

    #[test]
    fn test_asset_class_parse_roundtrip() {
        for s in ["Crypto", "Forex", "Stocks", "Futures", "Options"] {
            let ac = AssetClass::from_api_str(s).unwrap();
            assert_eq!(ac.to_string(), s);
        }
    }
}
