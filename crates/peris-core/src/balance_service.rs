//! Opening/closing balance derivation over per-bank entry chains.

use std::collections::HashMap;

use peris_domain::CashflowEntry;

/// Derives quarter-level balance figures. Each bank account keeps its own
/// independent running balance, so quarter edges are a sum of per-bank edges,
/// not a single linear scan.
pub struct BalanceService;

impl BalanceService {
    /// Balance of the entry's bank immediately before this entry applied.
    pub fn previous_balance(entry: &CashflowEntry) -> f64 {
        entry.balance - entry.income_amount() + entry.expense_amount()
    }

    /// Sum over all banks of the pre-transaction balance of each bank's
    /// first entry in array order. Callers pass entries already in intended
    /// date order; only array position matters here.
    pub fn opening_balance(entries: &[CashflowEntry]) -> f64 {
        let mut first_seen: HashMap<&str, f64> = HashMap::new();
        for entry in entries {
            first_seen
                .entry(entry.bank_key())
                .or_insert_with(|| Self::previous_balance(entry));
        }
        first_seen.values().sum()
    }

    /// Sum over all banks of the stored balance of each bank's last entry in
    /// array order.
    pub fn closing_balance(entries: &[CashflowEntry]) -> f64 {
        let mut last_seen: HashMap<&str, f64> = HashMap::new();
        for entry in entries {
            last_seen.insert(entry.bank_key(), entry.balance);
        }
        last_seen.values().sum()
    }
}
