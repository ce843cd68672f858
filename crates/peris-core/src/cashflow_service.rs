//! Cashflow view assembly: real entries, bank filtering, balances, category
//! totals, and the ghost overlay combined for presentation.

use peris_domain::{CashflowEntry, CategoryGroupMode, CategoryTotal, Quarter};

use crate::{
    storage::QuarterContext, BalanceService, CategoryService, CoreError, ForecastService,
};

/// Everything the presentation layer needs to render one quarter.
#[derive(Debug, Clone)]
pub struct CashflowView {
    pub quarter: Quarter,
    pub opening_balance: f64,
    pub closing_balance: f64,
    /// Real entries followed by the ghost overlay, both bank-filtered.
    pub entries: Vec<CashflowEntry>,
    pub category_totals: Vec<CategoryTotal>,
}

pub struct CashflowService;

impl CashflowService {
    /// Builds the quarter view from already-fetched entry lists.
    ///
    /// Balances and category totals cover the real (bank-filtered) entries
    /// only; ghosts are appended after them. Unlike
    /// [`ForecastService::generate_ghosts`], a malformed quarter id is an
    /// error here rather than a silent empty result.
    pub fn assemble(
        quarter_id: &str,
        context: &QuarterContext,
        bank_filter: Option<&str>,
        mode: CategoryGroupMode,
    ) -> Result<CashflowView, CoreError> {
        let quarter: Quarter = quarter_id
            .parse()
            .map_err(|_| CoreError::InvalidQuarter(quarter_id.to_string()))?;

        let matches_bank =
            |entry: &CashflowEntry| bank_filter.map_or(true, |bank| entry.bank_key() == bank);

        let real: Vec<CashflowEntry> = context
            .current
            .iter()
            .filter(|entry| matches_bank(entry))
            .cloned()
            .collect();

        let opening_balance = BalanceService::opening_balance(&real);
        let closing_balance = BalanceService::closing_balance(&real);
        let category_totals = CategoryService::totals_by_category(&real, mode);

        let ghosts = ForecastService::generate_ghosts(
            &context.current,
            &context.previous,
            &context.year_ago,
            quarter_id,
        );

        let mut entries = real;
        entries.extend(ghosts.into_iter().filter(|ghost| matches_bank(ghost)));

        Ok(CashflowView {
            quarter,
            opening_balance,
            closing_balance,
            entries,
            category_totals,
        })
    }
}
