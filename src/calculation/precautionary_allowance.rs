//! Precautionary allowance (Vorsorgepauschale, §39b Abs. 4 EStG).
//!
//! The allowance approximates the employee's deductible social insurance
//! contributions: a pension component, a health and care component, and a
//! minimum allowance that applies when both together fall short of it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TariffTable;
use crate::models::TaxClass;

use super::rounding::ceil_euros;

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The components of the precautionary allowance, each in whole euros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecautionaryAllowance {
    /// Employee pension share on the capped basis.
    pub pension_component: Decimal,
    /// Employee health and care share on the capped basis.
    pub health_care_component: Decimal,
    /// 12 % of the basis, capped per tax class.
    pub minimum_allowance: Decimal,
    /// The allowance deducted from the basis.
    pub total: Decimal,
}

impl PrecautionaryAllowance {
    /// No allowance at all (tax class VI).
    pub fn none() -> Self {
        Self {
            pension_component: Decimal::ZERO,
            health_care_component: Decimal::ZERO,
            minimum_allowance: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Computes the precautionary allowance for an annual basis.
///
/// Both components are rounded up to whole euros. The health and care
/// component always uses the default supplemental rate of the table, not the
/// employee's own fund rate.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::precautionary_allowance;
/// use steuer_engine::config::default_table;
/// use steuer_engine::models::TaxClass;
/// use rust_decimal_macros::dec;
///
/// let allowance = precautionary_allowance(dec!(36000), TaxClass::I, default_table());
/// assert_eq!(allowance.pension_component, dec!(3348));
/// assert_eq!(allowance.health_care_component, dec!(3798));
/// assert_eq!(allowance.total, dec!(7146));
/// ```
pub fn precautionary_allowance(
    basis: Decimal,
    tax_class: TaxClass,
    table: &TariffTable,
) -> PrecautionaryAllowance {
    if !tax_class.has_primary_allowances() {
        return PrecautionaryAllowance::none();
    }

    let basis = basis.max(Decimal::ZERO);
    let si = &table.social_insurance;
    let allowances = &table.allowances;

    let pension_basis = basis.min(MONTHS * si.pension_ceiling_monthly);
    let pension_component = ceil_euros(pension_basis * si.pension_rate / Decimal::TWO);

    let health_basis = basis.min(MONTHS * si.health_ceiling_monthly);
    let health_care_rate =
        (si.health_rate + si.health_supplemental_default + si.care_rate) / Decimal::TWO;
    let health_care_component = ceil_euros(health_basis * health_care_rate);

    let cap = if tax_class.is_splitting() {
        allowances.precautionary_cap_class_3
    } else {
        allowances.precautionary_cap
    };
    let minimum_allowance = ceil_euros(basis * allowances.precautionary_minimum_rate).min(cap);

    let total = (pension_component + health_care_component).max(minimum_allowance);

    PrecautionaryAllowance {
        pension_component,
        health_care_component,
        minimum_allowance,
        total,
    }
}
