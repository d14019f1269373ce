//! Rounding helpers.
//!
//! Each step of the wage tax procedure prescribes its own rounding: whole
//! euros rounded down for incomes and tariff results, whole euros rounded up
//! for the precautionary allowance components, cents rounded down for the
//! surcharges, and commercial rounding to cents for everything else.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::MAX_AMOUNT;

/// Rounds to cents, halves away from zero.
///
/// ```
/// use steuer_engine::calculation::round_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_cents(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_cents(dec!(123.454)), dec!(123.45));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates to cents towards negative infinity.
pub fn floor_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

/// Rounds down to a whole euro.
pub fn floor_euros(value: Decimal) -> Decimal {
    value.floor()
}

/// Rounds up to a whole euro.
pub fn ceil_euros(value: Decimal) -> Decimal {
    value.ceil()
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamps an input amount to `0..=MAX_AMOUNT`.
///
/// Applied to every caller-supplied amount before any arithmetic on it.
///
/// ```
/// use steuer_engine::calculation::bounded_amount;
/// use steuer_engine::models::MAX_AMOUNT;
/// use rust_decimal::Decimal;
///
/// assert_eq!(bounded_amount(Decimal::MAX), MAX_AMOUNT);
/// assert_eq!(bounded_amount(Decimal::NEGATIVE_ONE), Decimal::ZERO);
/// ```
pub fn bounded_amount(value: Decimal) -> Decimal {
    non_negative(value).min(MAX_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_cents_rounds_midpoint_away_from_zero() {
        assert_eq!(round_cents(dec!(0.005)), dec!(0.01));
        assert_eq!(round_cents(dec!(-0.005)), dec!(-0.01));
        assert_eq!(round_cents(dec!(295.583333)), dec!(295.58));
    }

    #[test]
    fn floor_cents_never_rounds_up() {
        assert_eq!(floor_cents(dec!(1612.459)), dec!(1612.45));
        assert_eq!(floor_cents(dec!(0.119)), dec!(0.11));
        assert_eq!(floor_cents(dec!(503.68)), dec!(503.68));
    }

    #[test]
    fn whole_euro_rounding_in_both_directions() {
        assert_eq!(floor_euros(dec!(27588.99)), dec!(27588));
        assert_eq!(ceil_euros(dec!(3347.01)), dec!(3348));
        assert_eq!(ceil_euros(dec!(3348)), dec!(3348));
    }

    #[test]
    fn non_negative_clamps() {
        assert_eq!(non_negative(dec!(-12.5)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
    }
}
