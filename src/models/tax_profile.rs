//! Input record for the wage tax calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FederalState, TaxClass};

/// Personal parameters that determine the annual wage tax.
///
/// Only `annual_gross` is required when deserializing; every other field
/// defaults to the value documented on it.
///
/// # Example
///
/// ```
/// use steuer_engine::models::{FederalState, PersonalTaxProfile, TaxClass};
/// use rust_decimal_macros::dec;
///
/// let profile = PersonalTaxProfile {
///     tax_class: TaxClass::III,
///     state: FederalState::Bayern,
///     ..PersonalTaxProfile::new(dec!(40000))
/// };
/// assert!(!profile.church_member);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalTaxProfile {
    /// Annual gross salary in euro.
    pub annual_gross: Decimal,
    /// Wage tax class. Defaults to class I.
    #[serde(default)]
    pub tax_class: TaxClass,
    /// Whether the employee is liable to church tax. Defaults to false.
    #[serde(default)]
    pub church_member: bool,
    /// Federal state of residence. Defaults to Nordrhein-Westfalen.
    #[serde(default)]
    pub state: FederalState,
    /// Number of child allowances (may be fractional, e.g. 0.5). Defaults to 0.
    #[serde(default)]
    pub child_allowances: Decimal,
    /// Additional annual tax-free allowance registered with the tax office.
    /// Defaults to 0.
    #[serde(default)]
    pub extra_allowance: Decimal,
    /// Monthly non-cash benefit (e.g. company car). Defaults to 0.
    #[serde(default)]
    pub non_cash_benefit: Decimal,
}

impl PersonalTaxProfile {
    /// Creates a profile with the given annual gross and all defaults.
    pub fn new(annual_gross: Decimal) -> Self {
        Self {
            annual_gross,
            tax_class: TaxClass::default(),
            church_member: false,
            state: FederalState::default(),
            child_allowances: Decimal::ZERO,
            extra_allowance: Decimal::ZERO,
            non_cash_benefit: Decimal::ZERO,
        }
    }
}
