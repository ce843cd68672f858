//! Per-category income/expense aggregation.

use std::cmp::Ordering;
use std::collections::HashMap;

use peris_domain::{CashflowEntry, CategoryGroupMode, CategoryTotal};

pub struct CategoryService;

impl CategoryService {
    /// Groups entries by category key (first-level segment or full dotted
    /// path, missing category as the empty string) and sums income and
    /// expense per group independently. Entries with neither a nonzero
    /// income nor a nonzero expense contribute no group.
    ///
    /// The result is sorted by `expenses_total` descending; groups with equal
    /// expense totals keep first-seen order, which the stable sort preserves.
    pub fn totals_by_category(
        entries: &[CashflowEntry],
        mode: CategoryGroupMode,
    ) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            let expense = entry.expense.filter(|amount| *amount != 0.0);
            let income = entry.income.filter(|amount| *amount != 0.0);
            if expense.is_none() && income.is_none() {
                continue;
            }

            let key = mode.group_key(entry.category.as_deref().unwrap_or(""));
            let slot = *index.entry(key.to_string()).or_insert_with(|| {
                totals.push(CategoryTotal::new(key));
                totals.len() - 1
            });
            if let Some(amount) = expense {
                totals[slot].expenses_total += amount;
            }
            if let Some(amount) = income {
                totals[slot].invoices_total += amount;
            }
        }

        totals.sort_by(|a, b| {
            b.expenses_total
                .partial_cmp(&a.expenses_total)
                .unwrap_or(Ordering::Equal)
        });
        totals
    }
}
