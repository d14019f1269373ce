//! Calculation logic for the tax engine.
//!
//! This module contains the pure calculators: the §32a income tax tariff,
//! the precautionary allowance, solidarity surcharge and church tax, the
//! annual wage tax built from them, the monthly social insurance
//! contributions, and the gross-to-net orchestrator that combines both.
//!
//! Every function takes its inputs and a [`TariffTable`](crate::config::TariffTable)
//! explicitly and performs no I/O.

mod income_tax;
mod net_income;
mod precautionary_allowance;
mod rounding;
mod social_insurance;
mod surcharges;
mod wage_tax;

pub use income_tax::{TariffZone, income_tax, splitting_tax, tariff_zone};
pub use net_income::{
    WARNING_MINIJOB_RANGE, WARNING_PRIVATE_BELOW_LIMIT, WARNING_TAX_CLASS_APPROXIMATION,
    gross_to_net,
};
pub use precautionary_allowance::{PrecautionaryAllowance, precautionary_allowance};
pub use rounding::{
    bounded_amount, ceil_euros, floor_cents, floor_euros, non_negative, round_cents,
};
pub use social_insurance::{SocialInsuranceResult, calculate_social_insurance, care_employee_rate};
pub use surcharges::{church_tax, solidarity_surcharge};
pub use wage_tax::{WageTaxResult, calculate_wage_tax};
