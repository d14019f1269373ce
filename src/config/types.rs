//! Tariff table types.
//!
//! A [`TariffTable`] holds every constant the calculators need for one tariff
//! year. It is deserialized from YAML by the loader or built from the
//! compiled-in 2026 values, and is never mutated afterwards.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::FederalState;

/// The first progressive zone: `(a·y + b)·y` with `y` measured from the basic
/// allowance in units of 10 000 euro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowerProgressiveZone {
    /// Quadratic coefficient.
    pub a: Decimal,
    /// Linear coefficient.
    pub b: Decimal,
}

/// The second progressive zone: `(a·z + b)·z + c` with `z` measured from the
/// first zone boundary in units of 10 000 euro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpperProgressiveZone {
    /// Quadratic coefficient.
    pub a: Decimal,
    /// Linear coefficient.
    pub b: Decimal,
    /// Tax at the lower bound of the zone.
    pub c: Decimal,
}

/// A flat-rate zone: `rate·x − offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatZone {
    /// Marginal rate as a fraction.
    pub rate: Decimal,
    /// Amount subtracted after applying the rate.
    pub offset: Decimal,
}

/// The income tax tariff of §32a EStG.
///
/// Taxable income up to `basic_allowance` is untaxed; above it four zones
/// follow, separated by the three upper bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxTariff {
    /// Basic allowance (Grundfreibetrag).
    pub basic_allowance: Decimal,
    /// Upper bound of the lower progressive zone.
    pub progressive_lower_until: Decimal,
    /// Upper bound of the upper progressive zone.
    pub progressive_upper_until: Decimal,
    /// Upper bound of the 42 % zone; above it the top rate applies.
    pub flat_until: Decimal,
    /// Lower progressive zone coefficients.
    pub progressive_lower: LowerProgressiveZone,
    /// Upper progressive zone coefficients.
    pub progressive_upper: UpperProgressiveZone,
    /// Flat zone up to `flat_until`.
    pub flat: FlatZone,
    /// Top-rate zone above `flat_until`.
    pub top: FlatZone,
}

/// Allowances and flat deductions used by the wage tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowances {
    /// Child allowance per counted child, both parents combined.
    pub child_allowance: Decimal,
    /// Flat work-expense allowance (Arbeitnehmer-Pauschbetrag).
    pub work_expense_flat: Decimal,
    /// Flat special-expense allowance (Sonderausgaben-Pauschbetrag).
    pub special_expense_flat: Decimal,
    /// Relief for single parents in tax class II.
    pub lone_parent_relief: Decimal,
    /// Share of the basis used for the minimum precautionary allowance.
    pub precautionary_minimum_rate: Decimal,
    /// Cap on the minimum precautionary allowance for every class except III.
    pub precautionary_cap: Decimal,
    /// Cap on the minimum precautionary allowance in tax class III.
    pub precautionary_cap_class_3: Decimal,
}

/// Solidarity surcharge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidarityConfig {
    /// Surcharge rate as a fraction of the assessed tax.
    pub rate: Decimal,
    /// Exemption threshold for single assessment.
    pub exemption_single: Decimal,
    /// Exemption threshold under the splitting tariff.
    pub exemption_married: Decimal,
    /// Rate applied to the excess over the threshold in the mitigation zone.
    pub mitigation_rate: Decimal,
}

/// Church tax rates by federal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchTaxConfig {
    /// Rate applied when a state is missing from `rates`.
    pub default_rate: Decimal,
    /// Rate per state as a fraction of the assessed tax.
    pub rates: BTreeMap<FederalState, Decimal>,
}

impl ChurchTaxConfig {
    /// Returns the church tax rate for a state.
    pub fn rate_for(&self, state: FederalState) -> Decimal {
        self.rates.get(&state).copied().unwrap_or(self.default_rate)
    }
}

/// Employee care rates keyed by the number of children under 25.
///
/// The 2026 values follow the 3.6 % total care rate. Parents pay half of it,
/// childless employees 0.6 % more, and each child from the second to the fifth
/// lowers the rate by 0.25 %. The 2.3 % / 1.7 % table published for the former
/// 3.4 % total rate does not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareEmployeeRates {
    /// Childless and at least `childless_surcharge_age` years old.
    pub childless: Decimal,
    /// At most one child.
    pub one_child: Decimal,
    /// Two children.
    pub two_children: Decimal,
    /// Three children.
    pub three_children: Decimal,
    /// Four children.
    pub four_children: Decimal,
    /// Five or more children.
    pub five_or_more: Decimal,
}

/// Social insurance ceilings and rates. All rates are total rates (employee
/// plus employer) unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceConfig {
    /// Monthly contribution ceiling for health and care.
    pub health_ceiling_monthly: Decimal,
    /// Monthly contribution ceiling for pension and unemployment.
    pub pension_ceiling_monthly: Decimal,
    /// General health rate.
    pub health_rate: Decimal,
    /// Average supplemental health rate, used when none is given.
    pub health_supplemental_default: Decimal,
    /// Care rate.
    pub care_rate: Decimal,
    /// Pension rate.
    pub pension_rate: Decimal,
    /// Unemployment rate.
    pub unemployment_rate: Decimal,
    /// Employee share of the care rate.
    pub care_employee_rates: CareEmployeeRates,
    /// Age from which childless employees pay the surcharge.
    pub childless_surcharge_age: u8,
    /// The state whose employees pay an extra care share.
    pub care_surcharge_state: FederalState,
    /// Extra care share paid by employees in `care_surcharge_state`.
    pub care_state_surcharge: Decimal,
    /// Monthly earnings limit for marginal employment (Minijob).
    pub minijob_limit_monthly: Decimal,
    /// Annual earnings limit below which health insurance is compulsory.
    pub compulsory_insurance_limit_annual: Decimal,
}

/// Every constant needed to compute gross-to-net for one tariff year.
///
/// # Example
///
/// ```
/// use steuer_engine::config::TariffTable;
/// use rust_decimal_macros::dec;
///
/// let table = TariffTable::steuer_2026();
/// assert_eq!(table.year, 2026);
/// assert_eq!(table.income_tax.basic_allowance, dec!(12348));
/// assert!(table.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffTable {
    /// The tariff year.
    pub year: u16,
    /// Income tax tariff.
    pub income_tax: IncomeTaxTariff,
    /// Allowances and flat deductions.
    pub allowances: Allowances,
    /// Solidarity surcharge.
    pub solidarity: SolidarityConfig,
    /// Church tax.
    pub church_tax: ChurchTaxConfig,
    /// Social insurance.
    pub social_insurance: SocialInsuranceConfig,
}

impl TariffTable {
    /// The compiled-in table for 2026.
    pub fn steuer_2026() -> Self {
        let church_rates = FederalState::ALL
            .iter()
            .map(|&state| {
                let rate = match state {
                    FederalState::BadenWuerttemberg | FederalState::Bayern => dec!(0.08),
                    _ => dec!(0.09),
                };
                (state, rate)
            })
            .collect();

        Self {
            year: 2026,
            income_tax: IncomeTaxTariff {
                basic_allowance: dec!(12348),
                progressive_lower_until: dec!(17799),
                progressive_upper_until: dec!(69878),
                flat_until: dec!(277825),
                progressive_lower: LowerProgressiveZone {
                    a: dec!(914.51),
                    b: dec!(1400),
                },
                progressive_upper: UpperProgressiveZone {
                    a: dec!(173.10),
                    b: dec!(2397),
                    c: dec!(1034.87),
                },
                flat: FlatZone {
                    rate: dec!(0.42),
                    offset: dec!(11135.63),
                },
                top: FlatZone {
                    rate: dec!(0.45),
                    offset: dec!(19470.38),
                },
            },
            allowances: Allowances {
                child_allowance: dec!(9756),
                work_expense_flat: dec!(1230),
                special_expense_flat: dec!(36),
                lone_parent_relief: dec!(4260),
                precautionary_minimum_rate: dec!(0.12),
                precautionary_cap: dec!(1900),
                precautionary_cap_class_3: dec!(3000),
            },
            solidarity: SolidarityConfig {
                rate: dec!(0.055),
                exemption_single: dec!(18130),
                exemption_married: dec!(36260),
                mitigation_rate: dec!(0.119),
            },
            church_tax: ChurchTaxConfig {
                default_rate: dec!(0.09),
                rates: church_rates,
            },
            social_insurance: SocialInsuranceConfig {
                health_ceiling_monthly: dec!(5812.50),
                pension_ceiling_monthly: dec!(8450.00),
                health_rate: dec!(0.146),
                health_supplemental_default: dec!(0.029),
                care_rate: dec!(0.036),
                pension_rate: dec!(0.186),
                unemployment_rate: dec!(0.026),
                // 3.6 % total rate; not the older 3.4 %-based table
                care_employee_rates: CareEmployeeRates {
                    childless: dec!(0.024),
                    one_child: dec!(0.018),
                    two_children: dec!(0.0155),
                    three_children: dec!(0.013),
                    four_children: dec!(0.0105),
                    five_or_more: dec!(0.008),
                },
                childless_surcharge_age: 23,
                care_surcharge_state: FederalState::Sachsen,
                care_state_surcharge: dec!(0.005),
                minijob_limit_monthly: dec!(556),
                compulsory_insurance_limit_annual: dec!(77400),
            },
        }
    }

    /// Checks the table for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTariff`] if zone boundaries are not
    /// strictly ascending, a rate lies outside `[0, 1]`, a ceiling is not
    /// positive, or a state is missing from the church tax rates.
    pub fn validate(&self) -> EngineResult<()> {
        let tariff = &self.income_tax;
        let bounds = [
            ("basic_allowance", tariff.basic_allowance),
            ("progressive_lower_until", tariff.progressive_lower_until),
            ("progressive_upper_until", tariff.progressive_upper_until),
            ("flat_until", tariff.flat_until),
        ];
        if tariff.basic_allowance < Decimal::ZERO {
            return invalid("basic_allowance must not be negative".to_string());
        }
        for pair in bounds.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if upper <= lower {
                return invalid(format!(
                    "{} ({}) must be greater than {} ({})",
                    upper_name, upper, lower_name, lower
                ));
            }
        }

        let si = &self.social_insurance;
        let care = &si.care_employee_rates;
        let rates = [
            ("income_tax.flat.rate", tariff.flat.rate),
            ("income_tax.top.rate", tariff.top.rate),
            ("allowances.precautionary_minimum_rate", self.allowances.precautionary_minimum_rate),
            ("solidarity.rate", self.solidarity.rate),
            ("solidarity.mitigation_rate", self.solidarity.mitigation_rate),
            ("church_tax.default_rate", self.church_tax.default_rate),
            ("social_insurance.health_rate", si.health_rate),
            ("social_insurance.health_supplemental_default", si.health_supplemental_default),
            ("social_insurance.care_rate", si.care_rate),
            ("social_insurance.pension_rate", si.pension_rate),
            ("social_insurance.unemployment_rate", si.unemployment_rate),
            ("social_insurance.care_state_surcharge", si.care_state_surcharge),
            ("care_employee_rates.childless", care.childless),
            ("care_employee_rates.one_child", care.one_child),
            ("care_employee_rates.two_children", care.two_children),
            ("care_employee_rates.three_children", care.three_children),
            ("care_employee_rates.four_children", care.four_children),
            ("care_employee_rates.five_or_more", care.five_or_more),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return invalid(format!("{} ({}) must lie between 0 and 1", name, rate));
            }
        }
        for (state, rate) in &self.church_tax.rates {
            if *rate < Decimal::ZERO || *rate > Decimal::ONE {
                return invalid(format!(
                    "church tax rate for {} ({}) must lie between 0 and 1",
                    state, rate
                ));
            }
        }

        if si.health_ceiling_monthly <= Decimal::ZERO || si.pension_ceiling_monthly <= Decimal::ZERO
        {
            return invalid("contribution ceilings must be positive".to_string());
        }

        if let Some(missing) = FederalState::ALL
            .iter()
            .find(|state| !self.church_tax.rates.contains_key(*state))
        {
            return invalid(format!("church tax rate missing for {}", missing));
        }

        Ok(())
    }
}

fn invalid(message: String) -> EngineResult<()> {
    Err(EngineError::InvalidTariff { message })
}
