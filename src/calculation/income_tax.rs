//! Income tax tariff (§32a EStG).
//!
//! This module maps a taxable income to the annual income tax using the
//! progressive five-zone tariff: an untaxed zone up to the basic allowance,
//! two progressive zones with quadratic formulas, and two flat-rate zones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::IncomeTaxTariff;

use super::rounding::floor_euros;

const TEN_THOUSAND: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// The tariff zone a taxable income falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffZone {
    /// Up to the basic allowance; no tax.
    Exempt,
    /// First progressive zone.
    ProgressiveLower,
    /// Second progressive zone.
    ProgressiveUpper,
    /// 42 % zone.
    Flat,
    /// 45 % zone.
    Top,
}

impl TariffZone {
    /// A short label for audit output.
    pub fn label(&self) -> &'static str {
        match self {
            TariffZone::Exempt => "exempt",
            TariffZone::ProgressiveLower => "progressive_lower",
            TariffZone::ProgressiveUpper => "progressive_upper",
            TariffZone::Flat => "flat",
            TariffZone::Top => "top",
        }
    }
}

/// Returns the zone a taxable income falls into, after flooring it to whole
/// euros.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::{tariff_zone, TariffZone};
/// use steuer_engine::config::default_table;
/// use rust_decimal_macros::dec;
///
/// let tariff = &default_table().income_tax;
/// assert_eq!(tariff_zone(dec!(12348), tariff), TariffZone::Exempt);
/// assert_eq!(tariff_zone(dec!(40000), tariff), TariffZone::ProgressiveUpper);
/// ```
pub fn tariff_zone(taxable_income: Decimal, tariff: &IncomeTaxTariff) -> TariffZone {
    let income = floor_euros(taxable_income);
    if income <= tariff.basic_allowance {
        TariffZone::Exempt
    } else if income <= tariff.progressive_lower_until {
        TariffZone::ProgressiveLower
    } else if income <= tariff.progressive_upper_until {
        TariffZone::ProgressiveUpper
    } else if income <= tariff.flat_until {
        TariffZone::Flat
    } else {
        TariffZone::Top
    }
}

/// Evaluates the formula of `zone` at `income` without any rounding.
fn zone_formula(zone: TariffZone, income: Decimal, tariff: &IncomeTaxTariff) -> Decimal {
    match zone {
        TariffZone::Exempt => Decimal::ZERO,
        TariffZone::ProgressiveLower => {
            let y = (income - tariff.basic_allowance) / TEN_THOUSAND;
            let coeff = &tariff.progressive_lower;
            (coeff.a * y + coeff.b) * y
        }
        TariffZone::ProgressiveUpper => {
            let z = (income - tariff.progressive_lower_until) / TEN_THOUSAND;
            let coeff = &tariff.progressive_upper;
            (coeff.a * z + coeff.b) * z + coeff.c
        }
        TariffZone::Flat => tariff.flat.rate * income - tariff.flat.offset,
        TariffZone::Top => tariff.top.rate * income - tariff.top.offset,
    }
}

/// Computes the annual income tax for a taxable income.
///
/// The income is floored to whole euros first; incomes at or below the basic
/// allowance (including negative ones) yield zero. The tax is floored to whole
/// euros, never rounded.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::income_tax;
/// use steuer_engine::config::default_table;
/// use rust_decimal_macros::dec;
///
/// let tariff = &default_table().income_tax;
/// assert_eq!(income_tax(dec!(12348), tariff), dec!(0));
/// assert_eq!(income_tax(dec!(40000), tariff), dec!(7209));
/// assert_eq!(income_tax(dec!(-500), tariff), dec!(0));
/// ```
pub fn income_tax(taxable_income: Decimal, tariff: &IncomeTaxTariff) -> Decimal {
    let income = floor_euros(taxable_income);
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let zone = tariff_zone(income, tariff);
    floor_euros(zone_formula(zone, income, tariff)).max(Decimal::ZERO)
}

/// Computes the tax under the splitting tariff: twice the tax on half the
/// income.
pub fn splitting_tax(taxable_income: Decimal, tariff: &IncomeTaxTariff) -> Decimal {
    income_tax(taxable_income / Decimal::TWO, tariff) * Decimal::TWO
}
