//! Input record for the full gross-to-net calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FederalState, InsuranceProfile, InsuranceType, PersonalTaxProfile, TaxClass};
use crate::calculation::bounded_amount;
use crate::error::{EngineError, EngineResult};

/// Largest monetary amount the calculators accept (one trillion euros).
///
/// [`GrossToNetInput::validate`] rejects anything above it; the calculators
/// clamp to it so that no intermediate value can overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// The period the stated gross amount refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomePeriod {
    /// The gross amount is per month.
    #[default]
    Monthly,
    /// The gross amount is per year.
    Annual,
}

fn default_true() -> bool {
    true
}

fn default_age() -> u8 {
    30
}

/// Everything the gross-to-net calculator form collects.
///
/// Only `gross` is required; all other fields default as documented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossToNetInput {
    /// Gross salary for the stated period.
    pub gross: Decimal,
    /// Whether `gross` is monthly or annual. Defaults to monthly.
    #[serde(default)]
    pub period: IncomePeriod,
    /// Wage tax class. Defaults to class I.
    #[serde(default)]
    pub tax_class: TaxClass,
    /// Federal state. Defaults to Nordrhein-Westfalen.
    #[serde(default)]
    pub state: FederalState,
    /// Church tax liability. Defaults to false.
    #[serde(default)]
    pub church_member: bool,
    /// Health insurance type. Defaults to statutory.
    #[serde(default)]
    pub insurance_type: InsuranceType,
    /// Supplemental health rate as a fraction; `None` uses the table average.
    #[serde(default)]
    pub health_supplemental_rate: Option<Decimal>,
    /// Monthly private health premium. Defaults to 0.
    #[serde(default)]
    pub private_premium: Decimal,
    /// Employer subsidy for private health insurance. Defaults to true.
    #[serde(default = "default_true")]
    pub employer_subsidy: bool,
    /// Pension insurance withheld. Defaults to true.
    #[serde(default = "default_true")]
    pub pension_insured: bool,
    /// Unemployment insurance withheld. Defaults to true.
    #[serde(default = "default_true")]
    pub unemployment_insured: bool,
    /// Whether the employee has children (care surcharge). Defaults to false.
    #[serde(default)]
    pub has_children: bool,
    /// Number of child allowances for surcharge and church tax. Defaults to 0.
    #[serde(default)]
    pub child_allowances: Decimal,
    /// Children under 25 for the care rate. Defaults to 0.
    #[serde(default)]
    pub children_under_25: u8,
    /// Age in years. Defaults to 30.
    #[serde(default = "default_age")]
    pub age: u8,
    /// Additional annual tax-free allowance. Defaults to 0.
    #[serde(default)]
    pub extra_allowance: Decimal,
    /// Monthly non-cash benefit. Defaults to 0.
    #[serde(default)]
    pub non_cash_benefit: Decimal,
}

impl GrossToNetInput {
    /// Creates an input with the given gross amount and period, all else default.
    pub fn new(gross: Decimal, period: IncomePeriod) -> Self {
        Self {
            gross,
            period,
            tax_class: TaxClass::default(),
            state: FederalState::default(),
            church_member: false,
            insurance_type: InsuranceType::default(),
            health_supplemental_rate: None,
            private_premium: Decimal::ZERO,
            employer_subsidy: true,
            pension_insured: true,
            unemployment_insured: true,
            has_children: false,
            child_allowances: Decimal::ZERO,
            children_under_25: 0,
            age: default_age(),
            extra_allowance: Decimal::ZERO,
            non_cash_benefit: Decimal::ZERO,
        }
    }

    /// Returns the gross amount as `(monthly, annual)`.
    ///
    /// The gross is clamped to `0..=MAX_AMOUNT` first.
    pub fn normalized_gross(&self) -> (Decimal, Decimal) {
        let gross = bounded_amount(self.gross);
        match self.period {
            IncomePeriod::Monthly => (gross, gross * Decimal::from(12)),
            IncomePeriod::Annual => (gross / Decimal::from(12), gross),
        }
    }

    /// Derives the wage tax profile for the given annual gross.
    pub fn tax_profile(&self, annual_gross: Decimal) -> PersonalTaxProfile {
        PersonalTaxProfile {
            annual_gross,
            tax_class: self.tax_class,
            church_member: self.church_member,
            state: self.state,
            child_allowances: self.child_allowances,
            extra_allowance: self.extra_allowance,
            non_cash_benefit: self.non_cash_benefit,
        }
    }

    /// Derives the social insurance profile for the given monthly gross.
    ///
    /// The monthly non-cash benefit is added to the contribution base.
    pub fn insurance_profile(&self, monthly_gross: Decimal) -> InsuranceProfile {
        InsuranceProfile {
            monthly_gross: bounded_amount(monthly_gross) + bounded_amount(self.non_cash_benefit),
            state: self.state,
            insurance_type: self.insurance_type,
            health_supplemental_rate: self.health_supplemental_rate,
            private_premium: self.private_premium,
            employer_subsidy: self.employer_subsidy,
            pension_insured: self.pension_insured,
            unemployment_insured: self.unemployment_insured,
            children_under_25: self.children_under_25,
            has_children: self.has_children,
            age: self.age,
        }
    }

    /// Rejects negative or oversized monetary amounts and rates.
    ///
    /// The calculators themselves clamp such values to zero; callers facing
    /// untrusted input use this to report them instead.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("gross", self.gross),
            ("private_premium", self.private_premium),
            ("child_allowances", self.child_allowances),
            ("extra_allowance", self.extra_allowance),
            ("non_cash_benefit", self.non_cash_benefit),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
            if value > MAX_AMOUNT {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
                });
            }
        }

        if let Some(rate) = self.health_supplemental_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidInput {
                    field: "health_supplemental_rate".to_string(),
                    message: format!("must be a fraction between 0 and 1, got {}", rate),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_gross_is_annualized() {
        let input = GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly);
        assert_eq!(input.normalized_gross(), (dec!(3000), dec!(36000)));
    }

    #[test]
    fn test_annual_gross_is_split_into_months() {
        let input = GrossToNetInput::new(dec!(48000), IncomePeriod::Annual);
        assert_eq!(input.normalized_gross(), (dec!(4000), dec!(48000)));
    }

    #[test]
    fn test_insurance_profile_includes_non_cash_benefit() {
        let input = GrossToNetInput {
            non_cash_benefit: dec!(250),
            ..GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly)
        };
        let profile = input.insurance_profile(dec!(3000));
        assert_eq!(profile.monthly_gross, dec!(3250));
    }

    #[test]
    fn test_tax_profile_carries_personal_fields() {
        let input = GrossToNetInput {
            tax_class: TaxClass::II,
            church_member: true,
            state: FederalState::Hessen,
            child_allowances: dec!(1),
            ..GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly)
        };
        let profile = input.tax_profile(dec!(36000));
        assert_eq!(profile.annual_gross, dec!(36000));
        assert_eq!(profile.tax_class, TaxClass::II);
        assert!(profile.church_member);
        assert_eq!(profile.state, FederalState::Hessen);
        assert_eq!(profile.child_allowances, dec!(1));
    }

    #[test]
    fn test_deserialize_minimal_input() {
        let input: GrossToNetInput = serde_json::from_str(r#"{ "gross": 3000 }"#).unwrap();
        assert_eq!(input, GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly));
    }

    #[test]
    fn test_validate_rejects_negative_gross() {
        let input = GrossToNetInput::new(dec!(-1), IncomePeriod::Monthly);
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_rate_given_as_percent() {
        let input = GrossToNetInput {
            health_supplemental_rate: Some(dec!(2.9)),
            ..GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly)
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_gross_above_limit() {
        let input = GrossToNetInput::new(Decimal::MAX / Decimal::TWO, IncomePeriod::Monthly);
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_cash_benefit_above_limit() {
        let input = GrossToNetInput {
            non_cash_benefit: MAX_AMOUNT + Decimal::ONE,
            ..GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly)
        };
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "non_cash_benefit"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_gross_at_limit() {
        let input = GrossToNetInput::new(MAX_AMOUNT, IncomePeriod::Annual);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_oversized_gross_is_clamped_when_normalized() {
        let input = GrossToNetInput::new(Decimal::MAX, IncomePeriod::Monthly);
        assert_eq!(input.normalized_gross(), (MAX_AMOUNT, MAX_AMOUNT * dec!(12)));
    }

    #[test]
    fn test_max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000i64));
    }

    #[test]
    fn test_validate_accepts_zero_gross() {
        let input = GrossToNetInput::new(dec!(0), IncomePeriod::Monthly);
        assert!(input.validate().is_ok());
    }
}
