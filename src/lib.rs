//! German Wage Tax and Social Insurance Engine
//!
//! This crate computes the gross-to-net salary breakdown for German employees
//! for one tariff year: the §32a EStG income tax tariff, wage tax with the
//! precautionary allowance and tax class adjustments, solidarity surcharge,
//! church tax, and the employee and employer social insurance contributions.
//!
//! All calculators are pure functions over a read-only
//! [`TariffTable`](config::TariffTable); the [`api`] module exposes them over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
