//! Ghost entry generation: projecting recurring transactions into the
//! remaining days of the current quarter.

use chrono::{Duration, NaiveDate};

use peris_domain::{CashflowEntry, Periodicity, Quarter};

use crate::dates::{add_months, add_years};

/// Monthly sources project at most this many steps forward. A quarter spans
/// three months, so no monthly recurrence needs more to reach the quarter end.
const MONTHLY_PROJECTION_STEPS: i32 = 3;

/// Days of lookback when collecting monthly recurrence sources.
const MONTHLY_LOOKBACK_DAYS: i64 = 30;

/// Synthesizes forecast ("ghost") entries for recurring transactions that
/// have not yet occurred within the current quarter.
///
/// Each recurrence class reads from the quarter(s) whose entries could still
/// have a pending occurrence inside the current quarter:
/// monthly sources come from the current and previous quarters, quarterly
/// sources from the previous quarter only, yearly sources from the year-ago
/// quarter only. Lookback windows are sized to the recurrence period.
pub struct ForecastService;

impl ForecastService {
    /// Generates ghosts for `quarter_id`, anchored at the last real entry of
    /// `current`. Callers supply each list sorted ascending by date.
    ///
    /// Degenerate inputs (malformed quarter id, no real entries) produce an
    /// empty list, never an error.
    pub fn generate_ghosts(
        current: &[CashflowEntry],
        previous_quarter: &[CashflowEntry],
        year_ago_quarter: &[CashflowEntry],
        quarter_id: &str,
    ) -> Vec<CashflowEntry> {
        let quarter: Quarter = match quarter_id.parse() {
            Ok(quarter) => quarter,
            Err(err) => {
                tracing::warn!(quarter_id, %err, "skipping ghost generation");
                return Vec::new();
            }
        };
        let last_entry_date = match current.iter().filter(|entry| entry.is_real()).last() {
            Some(entry) => entry.date,
            None => {
                tracing::debug!(quarter_id, "no real entries to anchor a forecast");
                return Vec::new();
            }
        };
        let quarter_end = quarter.end();

        let mut ghosts = Vec::new();

        let monthly_cutoff = last_entry_date - Duration::days(MONTHLY_LOOKBACK_DAYS);
        for source in current
            .iter()
            .chain(previous_quarter)
            .filter(|entry| is_source(entry, Periodicity::Monthly, monthly_cutoff))
        {
            for step in 1..=MONTHLY_PROJECTION_STEPS {
                let projected = add_months(source.date, step);
                if projected > quarter_end {
                    // Later multiples are only larger.
                    break;
                }
                if projected > last_entry_date {
                    ghosts.push(source.ghost_on(projected));
                }
            }
        }

        let quarterly_cutoff = add_months(last_entry_date, -3);
        for source in previous_quarter
            .iter()
            .filter(|entry| is_source(entry, Periodicity::Quarterly, quarterly_cutoff))
        {
            let projected = add_months(source.date, 3);
            if projected > last_entry_date && projected <= quarter_end {
                ghosts.push(source.ghost_on(projected));
            }
        }

        let yearly_cutoff = add_years(last_entry_date, -1);
        for source in year_ago_quarter
            .iter()
            .filter(|entry| is_source(entry, Periodicity::Yearly, yearly_cutoff))
        {
            let projected = add_years(source.date, 1);
            if projected > last_entry_date && projected <= quarter_end {
                ghosts.push(source.ghost_on(projected));
            }
        }

        ghosts.sort_by_key(|ghost| ghost.date);
        tracing::debug!(quarter_id, count = ghosts.len(), "generated ghost entries");
        ghosts
    }
}

/// A forecast source carries the wanted periodicity tag and falls strictly
/// inside the lookback window.
fn is_source(entry: &CashflowEntry, periodicity: Periodicity, cutoff: NaiveDate) -> bool {
    entry.periodicity == Some(periodicity) && entry.date > cutoff
}
