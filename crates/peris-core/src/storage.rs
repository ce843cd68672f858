use std::collections::{HashMap, HashSet};

use peris_domain::{CashflowEntry, Quarter};

use crate::CoreError;

/// Abstraction over persistence backends holding one entry list per quarter.
pub trait QuarterStore: Send + Sync {
    fn load_quarter(&self, quarter: Quarter) -> Result<Vec<CashflowEntry>, CoreError>;
    fn save_quarter(&self, quarter: Quarter, entries: &[CashflowEntry]) -> Result<(), CoreError>;
    fn list_quarters(&self) -> Result<Vec<Quarter>, CoreError>;
    fn delete_quarter(&self, quarter: Quarter) -> Result<(), CoreError>;
}

/// The three entry lists the forecast engine reads from.
#[derive(Debug, Clone, Default)]
pub struct QuarterContext {
    pub current: Vec<CashflowEntry>,
    pub previous: Vec<CashflowEntry>,
    pub year_ago: Vec<CashflowEntry>,
}

impl QuarterContext {
    /// Loads the current, previous, and year-ago quarters from the store.
    /// A quarter missing from the store reads as an empty list.
    pub fn load(store: &dyn QuarterStore, quarter: Quarter) -> Result<Self, CoreError> {
        Ok(Self {
            current: load_or_empty(store, quarter)?,
            previous: load_or_empty(store, quarter.previous())?,
            year_ago: load_or_empty(store, quarter.year_ago())?,
        })
    }
}

fn load_or_empty(store: &dyn QuarterStore, quarter: Quarter) -> Result<Vec<CashflowEntry>, CoreError> {
    match store.load_quarter(quarter) {
        Ok(entries) => Ok(entries),
        Err(CoreError::QuarterNotFound(_)) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

/// Detects broken balance chains and duplicate ids within a quarter snapshot.
/// Diagnostics only; stored entries are taken as authoritative on read.
pub fn entry_warnings(entries: &[CashflowEntry]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut chain: HashMap<&str, f64> = HashMap::new();

    for entry in entries {
        if !seen_ids.insert(&entry.id) {
            warnings.push(format!("duplicate entry id {}", entry.id));
        }
        // The first entry of a bank anchors its chain; later entries must
        // extend it by their own income/expense.
        if let Some(previous) = chain.get(entry.bank_key()) {
            let expected = previous + entry.income_amount() - entry.expense_amount();
            if (expected - entry.balance).abs() > 0.005 {
                warnings.push(format!(
                    "entry {} breaks the balance chain: expected {:.2}, stored {:.2}",
                    entry.id, expected, entry.balance
                ));
            }
        }
        chain.insert(entry.bank_key(), entry.balance);
    }
    warnings
}
