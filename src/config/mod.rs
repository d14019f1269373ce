//! Tariff table configuration for the tax engine.
//!
//! A [`TariffTable`] bundles the income tax tariff, allowances, surcharge
//! parameters and social insurance rates of one year. It is either loaded from
//! YAML files or taken from the compiled-in 2026 values, and is read-only once
//! constructed, so it can be shared freely between threads.
//!
//! # Example
//!
//! ```
//! use steuer_engine::config::default_table;
//!
//! let table = default_table();
//! assert_eq!(table.year, 2026);
//! ```

use std::sync::LazyLock;

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Allowances, CareEmployeeRates, ChurchTaxConfig, FlatZone, IncomeTaxTariff,
    LowerProgressiveZone, SocialInsuranceConfig, SolidarityConfig, TariffTable,
    UpperProgressiveZone,
};

static DEFAULT_TABLE: LazyLock<TariffTable> = LazyLock::new(TariffTable::steuer_2026);

/// Returns the process-wide compiled-in 2026 table, built on first use.
pub fn default_table() -> &'static TariffTable {
    &DEFAULT_TABLE
}
