//! German display formatting for amounts and percentages.
//!
//! Amounts are shown with `.` as thousands separator and `,` as decimal
//! separator, followed by the unit ("1.234,56 €", "21,8 %").

use rust_decimal::{Decimal, RoundingStrategy};

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_german(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut out = String::new();
    if rounded < Decimal::ZERO {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Formats an amount as euro with the given number of decimals.
///
/// ```
/// use steuer_engine::format::format_euro;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_euro(dec!(1234.56), 2), "1.234,56 €");
/// assert_eq!(format_euro(dec!(-2051.915), 2), "-2.051,92 €");
/// assert_eq!(format_euro(dec!(24623.04), 0), "24.623 €");
/// ```
pub fn format_euro(value: Decimal, decimals: u32) -> String {
    format!("{} €", format_german(value, decimals))
}

/// Formats a percentage value (already multiplied by 100).
///
/// ```
/// use steuer_engine::format::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(dec!(21.75), 2), "21,75 %");
/// ```
pub fn format_percent(value: Decimal, decimals: u32) -> String {
    format!("{} %", format_german(value, decimals))
}

/// Formats a percentage with one decimal.
pub fn format_percent_default(value: Decimal) -> String {
    format_percent(value, 1)
}

/// Strips thousands separators and turns the decimal comma into a point.
fn normalize_german_input(s: &str) -> String {
    s.trim().replace('.', "").replace(',', ".")
}

/// Parses a number typed in German notation ("1.234,56").
///
/// Empty input and anything that does not parse yield zero; failures are
/// logged at warn level.
///
/// ```
/// use steuer_engine::format::parse_german_number;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_german_number("3.000,50"), dec!(3000.50));
/// assert_eq!(parse_german_number("abc"), dec!(0));
/// ```
pub fn parse_german_number(s: &str) -> Decimal {
    let normalized = normalize_german_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        tracing::warn!(input = %s, "invalid German number: {}", e);
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_euro_groups_thousands() {
        assert_eq!(format_euro(dec!(0), 2), "0,00 €");
        assert_eq!(format_euro(dec!(999.5), 2), "999,50 €");
        assert_eq!(format_euro(dec!(1000), 2), "1.000,00 €");
        assert_eq!(format_euro(dec!(1234567.891), 2), "1.234.567,89 €");
    }

    #[test]
    fn format_euro_rounds_half_away_from_zero() {
        assert_eq!(format_euro(dec!(0.005), 2), "0,01 €");
        assert_eq!(format_euro(dec!(-0.005), 2), "-0,01 €");
        assert_eq!(format_euro(dec!(1999.5), 0), "2.000 €");
    }

    #[test]
    fn format_euro_drops_sign_of_zero() {
        assert_eq!(format_euro(dec!(-0.001), 2), "0,00 €");
    }

    #[test]
    fn format_percent_uses_comma() {
        assert_eq!(format_percent_default(dec!(9.85)), "9,9 %");
        assert_eq!(format_percent_default(dec!(68.4)), "68,4 %");
        assert_eq!(format_percent(dec!(100), 0), "100 %");
    }

    #[test]
    fn parse_german_number_accepts_separators() {
        assert_eq!(parse_german_number("1.234,56"), dec!(1234.56));
        assert_eq!(parse_german_number("1.234.567"), dec!(1234567));
        assert_eq!(parse_german_number("  2,9 "), dec!(2.9));
        assert_eq!(parse_german_number("-12,5"), dec!(-12.5));
    }

    #[test]
    fn parse_german_number_is_lenient() {
        assert_eq!(parse_german_number(""), Decimal::ZERO);
        assert_eq!(parse_german_number("   "), Decimal::ZERO);
        assert_eq!(parse_german_number("zwölf"), Decimal::ZERO);
        assert_eq!(parse_german_number("1,2,3"), Decimal::ZERO);
    }
}
