use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the cashflow screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,

    /// How category totals are grouped: `"first-level"` or `"full"`.
    #[serde(default = "Config::default_category_group_mode")]
    pub category_group_mode: String,

    /// Pre-selected bank filter for the cashflow view; `None` shows all banks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_bank_filter: Option<String>,

    /// Optional custom root directory for quarter data files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "EUR".into(),
            category_group_mode: Self::default_category_group_mode(),
            default_bank_filter: None,
            data_root: None,
        }
    }
}

impl Config {
    fn default_category_group_mode() -> String {
        "first-level".into()
    }
}
