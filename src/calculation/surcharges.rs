//! Surcharges levied on the assessed wage tax.
//!
//! Solidarity surcharge (§4 SolZG) and church tax (Kirchensteuergesetze der
//! Länder). Both are computed on the tax for surcharge purposes, i.e. the
//! tariff tax after child allowances, and both are truncated to whole cents.

use rust_decimal::Decimal;

use crate::config::{ChurchTaxConfig, SolidarityConfig};
use crate::models::FederalState;

use super::rounding::floor_cents;

/// Computes the annual solidarity surcharge.
///
/// Nothing is due up to the exemption threshold (single or splitting). Above
/// it the surcharge is the lesser of the full rate and the mitigation rate
/// applied to the excess over the threshold.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::solidarity_surcharge;
/// use steuer_engine::config::default_table;
/// use rust_decimal_macros::dec;
///
/// let config = &default_table().solidarity;
/// assert_eq!(solidarity_surcharge(dec!(18130), false, config), dec!(0));
/// assert_eq!(solidarity_surcharge(dec!(18131), false, config), dec!(0.11));
/// ```
pub fn solidarity_surcharge(
    tax_for_surcharge: Decimal,
    splitting: bool,
    config: &SolidarityConfig,
) -> Decimal {
    let threshold = if splitting {
        config.exemption_married
    } else {
        config.exemption_single
    };

    if tax_for_surcharge <= threshold {
        return Decimal::ZERO;
    }

    let full = tax_for_surcharge * config.rate;
    let mitigated = (tax_for_surcharge - threshold) * config.mitigation_rate;
    floor_cents(full.min(mitigated))
}

/// Computes the annual church tax for a member living in `state`.
///
/// Callers only invoke this for church members; non-members pay nothing.
pub fn church_tax(tax_for_surcharge: Decimal, state: FederalState, config: &ChurchTaxConfig) -> Decimal {
    floor_cents(tax_for_surcharge.max(Decimal::ZERO) * config.rate_for(state))
}
