//! peris-core
//!
//! Cashflow engine for Peris: balance derivation, category aggregation, and
//! ghost (forecast) entry generation. Depends on peris-domain. No terminal
//! I/O, no direct storage interactions beyond the [`storage::QuarterStore`]
//! trait.

pub mod balance_service;
pub mod cashflow_service;
pub mod category_service;
pub mod dates;
pub mod error;
pub mod forecast_service;
pub mod storage;

pub use balance_service::BalanceService;
pub use cashflow_service::{CashflowService, CashflowView};
pub use category_service::CategoryService;
pub use error::CoreError;
pub use forecast_service::ForecastService;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("peris_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Peris core tracing initialized.");
    });
}

#[cfg(test)]
mod tests;
