//! Category grouping modes and aggregation results.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Controls how dotted category paths are grouped when totalling.
pub enum CategoryGroupMode {
    /// Truncate to the segment before the first `.` (`tax.vat` -> `tax`).
    #[default]
    #[serde(rename = "first-level")]
    FirstLevel,
    /// Use the full dotted path verbatim.
    #[serde(rename = "full")]
    Full,
}

impl CategoryGroupMode {
    /// Applies the grouping mode to a raw category path.
    pub fn group_key<'a>(&self, category: &'a str) -> &'a str {
        match self {
            CategoryGroupMode::FirstLevel => {
                category.split_once('.').map(|(head, _)| head).unwrap_or(category)
            }
            CategoryGroupMode::Full => category,
        }
    }
}

impl fmt::Display for CategoryGroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryGroupMode::FirstLevel => "first-level",
            CategoryGroupMode::Full => "full",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Income/expense totals for one category group. An uncategorized group uses
/// the empty string as its key.
pub struct CategoryTotal {
    pub category: String,
    pub invoices_total: f64,
    pub expenses_total: f64,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            invoices_total: 0.0,
            expenses_total: 0.0,
        }
    }
}
