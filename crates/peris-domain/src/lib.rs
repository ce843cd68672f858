//! peris-domain
//!
//! Pure domain models (CashflowEntry, Quarter, Periodicity, category totals).
//! No I/O, no storage, no services. Only data types and core enums.

pub mod category;
pub mod entry;
pub mod quarter;

pub use category::*;
pub use entry::*;
pub use quarter::*;
