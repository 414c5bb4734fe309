use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{BUILTIN_SETUPS, DEFAULT_MISTAKES, DEFAULT_RULES};

/// Single-row journal profile: the managed label lists backing the trade
/// form (custom setups on top of the built-ins, trading rules, mistake tags).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalProfile {
    pub id: i32,
    pub custom_setups: Vec<String>,
    pub rules: Vec<String>,
    pub mistake_labels: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JournalProfile {
    pub fn seed() -> Self {
        Self {
            id: 1,
            custom_setups: Vec::new(),
            rules: DEFAULT_RULES.iter().map(|s| s.to_string()).collect(),
            mistake_labels: DEFAULT_MISTAKES.iter().map(|s| s.to_string()).collect(),
            updated_at: None,
        }
    }

    /// Built-in setups followed by the user's custom ones.
    pub fn all_setups(&self) -> Vec<String> {
        BUILTIN_SETUPS
            .iter()
            .map(|s| s.to_string())
            .chain(self.custom_setups.iter().cloned())
            .collect()
    }

    pub fn is_builtin_setup(name: &str) -> bool {
        BUILTIN_SETUPS.contains(&name)
    }
}
