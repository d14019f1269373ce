//! Gross-to-net orchestration.
//!
//! This module combines the wage tax and social insurance calculators into
//! the full monthly and annual breakdown shown to the user.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::TariffTable;
use crate::models::{
    AuditTrace, AuditWarning, CalculationResult, GrossToNetInput, InsuranceType, Ratios,
    TaxAmounts,
};

use super::rounding::{non_negative, round_cents};
use super::social_insurance::calculate_social_insurance;
use super::wage_tax::calculate_wage_tax;

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Warning code for a gross salary within the marginal employment limit.
pub const WARNING_MINIJOB_RANGE: &str = "MINIJOB_RANGE";
/// Warning code for private insurance below the compulsory insurance limit.
pub const WARNING_PRIVATE_BELOW_LIMIT: &str = "PRIVATE_BELOW_COMPULSORY_LIMIT";
/// Warning code for the approximated tax classes V and VI.
pub const WARNING_TAX_CLASS_APPROXIMATION: &str = "TAX_CLASS_APPROXIMATION";

fn monthly_amounts(annual: &TaxAmounts) -> TaxAmounts {
    TaxAmounts {
        wage_tax: round_cents(annual.wage_tax / MONTHS),
        solidarity_surcharge: round_cents(annual.solidarity_surcharge / MONTHS),
        church_tax: round_cents(annual.church_tax / MONTHS),
        total: round_cents(annual.total / MONTHS),
    }
}

fn ratio(value: Decimal, gross_monthly: Decimal) -> Decimal {
    if gross_monthly.is_zero() {
        Decimal::ZERO
    } else {
        round_cents(value / gross_monthly * HUNDRED)
    }
}

fn collect_warnings(
    input: &GrossToNetInput,
    gross_monthly: Decimal,
    gross_annual: Decimal,
    table: &TariffTable,
) -> Vec<AuditWarning> {
    let si = &table.social_insurance;
    let mut warnings = Vec::new();

    if gross_monthly > Decimal::ZERO && gross_monthly <= si.minijob_limit_monthly {
        warnings.push(AuditWarning {
            code: WARNING_MINIJOB_RANGE.to_string(),
            message: format!(
                "Monthly gross {} is within the marginal employment limit of {}; regular contributions were applied",
                round_cents(gross_monthly),
                si.minijob_limit_monthly.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    if input.insurance_type == InsuranceType::Private
        && gross_annual < si.compulsory_insurance_limit_annual
    {
        warnings.push(AuditWarning {
            code: WARNING_PRIVATE_BELOW_LIMIT.to_string(),
            message: format!(
                "Annual gross {} is below the compulsory insurance limit of {}; private insurance is normally not available",
                round_cents(gross_annual),
                si.compulsory_insurance_limit_annual.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    if input.tax_class.is_approximated() {
        warnings.push(AuditWarning {
            code: WARNING_TAX_CLASS_APPROXIMATION.to_string(),
            message: format!(
                "Wage tax for class {} is approximated and may differ from the official tables",
                input.tax_class
            ),
            severity: "low".to_string(),
        });
    }

    warnings
}

/// Calculates the full gross-to-net breakdown.
///
/// The calculation runs in a single pass and is deterministic: the same input
/// and table always produce the same result. Negative amounts are treated as
/// zero; callers that need to reject them use [`GrossToNetInput::validate`].
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::gross_to_net;
/// use steuer_engine::config::default_table;
/// use steuer_engine::models::{GrossToNetInput, IncomePeriod};
/// use rust_decimal_macros::dec;
///
/// let input = GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly);
/// let result = gross_to_net(&input, default_table());
///
/// assert_eq!(result.taxes_monthly.wage_tax, dec!(295.58));
/// assert_eq!(result.contributions.total_employee, dec!(652.50));
/// assert_eq!(result.net_monthly, dec!(2051.92));
/// ```
pub fn gross_to_net(input: &GrossToNetInput, table: &TariffTable) -> CalculationResult {
    let (gross_monthly, gross_annual) = input.normalized_gross();
    let gross_monthly = non_negative(gross_monthly);
    let gross_annual = non_negative(gross_annual);

    let wage_tax = calculate_wage_tax(&input.tax_profile(gross_annual), table);
    let taxes_annual = wage_tax.amounts();
    let taxes_monthly = monthly_amounts(&taxes_annual);

    let social_insurance = calculate_social_insurance(&input.insurance_profile(gross_monthly), table);
    let contributions = social_insurance.contributions;

    let deductions_monthly = round_cents(taxes_monthly.total + contributions.total_employee);
    let net_monthly = round_cents(gross_monthly - deductions_monthly);
    let net_annual = round_cents(net_monthly * MONTHS);
    let deductions_annual = round_cents(deductions_monthly * MONTHS);

    let ratios = Ratios {
        tax_rate: ratio(taxes_monthly.total, gross_monthly),
        contribution_rate: ratio(contributions.total_employee, gross_monthly),
        net_rate: ratio(net_monthly, gross_monthly),
    };

    let mut audit = AuditTrace::default();
    audit.extend_steps(wage_tax.audit_steps);
    audit.extend_steps(social_insurance.audit_steps);
    audit.warnings = collect_warnings(input, gross_monthly, gross_annual, table);

    debug!(
        deductions_monthly = %deductions_monthly,
        net_monthly = %net_monthly,
        "Computed net income"
    );
    info!(
        tariff_year = table.year,
        gross_monthly = %round_cents(gross_monthly),
        net_monthly = %net_monthly,
        warnings = audit.warnings.len(),
        "Gross-to-net calculation complete"
    );

    CalculationResult {
        gross_monthly: round_cents(gross_monthly),
        gross_annual: round_cents(gross_annual),
        taxes_monthly,
        taxes_annual,
        contributions,
        deductions_monthly,
        deductions_annual,
        net_monthly,
        net_annual,
        ratios,
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FederalState, IncomePeriod, MAX_AMOUNT, TaxClass};
    use rust_decimal_macros::dec;

    fn table() -> TariffTable {
        TariffTable::steuer_2026()
    }

    fn monthly(gross: Decimal) -> GrossToNetInput {
        GrossToNetInput::new(gross, IncomePeriod::Monthly)
    }

    fn warning_codes(result: &CalculationResult) -> Vec<&str> {
        result.audit.warnings.iter().map(|w| w.code.as_str()).collect()
    }

    #[test]
    fn test_average_single_employee() {
        let result = gross_to_net(&monthly(dec!(3000)), &table());

        assert_eq!(result.gross_annual, dec!(36000));
        assert_eq!(result.taxes_annual.wage_tax, dec!(3547));
        assert_eq!(result.taxes_monthly.wage_tax, dec!(295.58));
        assert_eq!(result.taxes_monthly.total, dec!(295.58));
        assert_eq!(result.contributions.total_employee, dec!(652.50));
        assert_eq!(result.contributions.total_employer, dec!(616.50));
        assert_eq!(result.deductions_monthly, dec!(948.08));
        assert_eq!(result.net_monthly, dec!(2051.92));
        assert_eq!(result.net_annual, dec!(24623.04));
        assert_eq!(result.deductions_annual, dec!(11376.96));
        assert_eq!(result.ratios.tax_rate, dec!(9.85));
        assert_eq!(result.ratios.contribution_rate, dec!(21.75));
        assert_eq!(result.ratios.net_rate, dec!(68.40));
        assert!(result.net_monthly > dec!(1800) && result.net_monthly < dec!(2400));
    }

    #[test]
    fn test_annual_gross_married_in_bavaria() {
        let input = GrossToNetInput {
            tax_class: TaxClass::III,
            state: FederalState::Bayern,
            ..GrossToNetInput::new(dec!(40000), IncomePeriod::Annual)
        };
        let result = gross_to_net(&input, &table());

        assert_eq!(result.gross_monthly, dec!(3333.33));
        assert_eq!(result.taxes_annual.wage_tax, dec!(1022));
        assert_eq!(result.taxes_monthly.wage_tax, dec!(85.17));
        assert_eq!(result.contributions.total_employee, dec!(725.00));
        assert_eq!(result.contributions.total_employer, dec!(685.00));
        assert_eq!(result.net_monthly, dec!(2523.16));
        assert_eq!(result.net_annual, dec!(30277.92));
        assert_eq!(result.ratios.tax_rate, dec!(2.56));
        assert_eq!(result.ratios.net_rate, dec!(75.69));
    }

    #[test]
    fn test_minijob_range_is_flagged() {
        let result = gross_to_net(&monthly(dec!(556)), &table());

        assert_eq!(result.taxes_monthly.total, dec!(0));
        assert_eq!(result.contributions.total_employee, dec!(120.93));
        assert_eq!(result.net_monthly, dec!(435.07));
        assert!(result.net_monthly >= dec!(0));
        assert_eq!(warning_codes(&result), vec![WARNING_MINIJOB_RANGE]);
    }

    #[test]
    fn test_high_earner_capped_at_ceilings() {
        let result = gross_to_net(&monthly(dec!(10000)), &table());

        assert_eq!(result.taxes_annual.solidarity_surcharge, dec!(1612.45));
        assert_eq!(result.taxes_monthly.wage_tax, dec!(2640.00));
        assert_eq!(result.taxes_monthly.solidarity_surcharge, dec!(134.37));
        assert_eq!(result.taxes_monthly.total, dec!(2774.37));
        assert_eq!(result.contributions.health.employee, dec!(508.59));
        assert_eq!(result.contributions.total_employee, dec!(1543.79));
        assert_eq!(result.net_monthly, dec!(5681.84));
        assert_eq!(result.net_annual, dec!(68182.08));
        assert_eq!(result.ratios.tax_rate, dec!(27.74));
        assert_eq!(result.ratios.contribution_rate, dec!(15.44));
        assert_eq!(result.ratios.net_rate, dec!(56.82));
        assert!(result.audit.warnings.is_empty());
    }

    #[test]
    fn test_zero_gross_yields_zero_ratios() {
        let result = gross_to_net(&monthly(dec!(0)), &table());

        assert_eq!(result.net_monthly, dec!(0));
        assert_eq!(result.ratios.tax_rate, dec!(0));
        assert_eq!(result.ratios.contribution_rate, dec!(0));
        assert_eq!(result.ratios.net_rate, dec!(0));
        assert!(result.audit.warnings.is_empty());
    }

    #[test]
    fn test_private_below_compulsory_limit_is_flagged() {
        let input = GrossToNetInput {
            insurance_type: InsuranceType::Private,
            private_premium: dec!(400),
            ..monthly(dec!(5000))
        };
        let result = gross_to_net(&input, &table());

        assert_eq!(warning_codes(&result), vec![WARNING_PRIVATE_BELOW_LIMIT]);
    }

    #[test]
    fn test_private_above_compulsory_limit() {
        let input = GrossToNetInput {
            insurance_type: InsuranceType::Private,
            private_premium: dec!(480),
            ..monthly(dec!(6500))
        };
        let result = gross_to_net(&input, &table());

        assert_eq!(result.taxes_monthly.wage_tax, dec!(1254.92));
        assert_eq!(result.contributions.total_employee, dec!(1169.00));
        assert_eq!(result.net_monthly, dec!(4076.08));
        assert!(result.audit.warnings.is_empty());
    }

    #[test]
    fn test_approximated_tax_class_is_flagged() {
        let input = GrossToNetInput {
            tax_class: TaxClass::V,
            ..monthly(dec!(5000))
        };
        let result = gross_to_net(&input, &table());

        assert_eq!(result.taxes_monthly.wage_tax, dec!(787.50));
        assert_eq!(result.net_monthly, dec!(3125.00));
        assert_eq!(warning_codes(&result), vec![WARNING_TAX_CLASS_APPROXIMATION]);
    }

    #[test]
    fn test_non_cash_benefit_raises_tax_and_contributions() {
        let input = GrossToNetInput {
            non_cash_benefit: dec!(300),
            ..monthly(dec!(3000))
        };
        let result = gross_to_net(&input, &table());

        assert_eq!(result.taxes_monthly.wage_tax, dec!(362.50));
        assert_eq!(result.contributions.total_employee, dec!(717.75));
        assert_eq!(result.net_monthly, dec!(1919.75));
    }

    #[test]
    fn test_audit_trace_is_numbered_across_calculators() {
        let result = gross_to_net(&monthly(dec!(3000)), &table());
        let steps = &result.audit.steps;

        assert_eq!(steps.len(), 10);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert_eq!(steps[0].rule_id, "wage_tax_basis");
        assert_eq!(steps[6].rule_id, "health_insurance");
        assert!(result.audit.step("income_tax_tariff").is_some());
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let input = GrossToNetInput {
            church_member: true,
            child_allowances: dec!(1.5),
            ..monthly(dec!(4321.09))
        };
        let table = table();
        assert_eq!(gross_to_net(&input, &table), gross_to_net(&input, &table));
    }

    #[test]
    fn test_oversized_amounts_are_clamped_to_limit() {
        let input = |amount: Decimal, rate: Decimal| GrossToNetInput {
            church_member: true,
            insurance_type: InsuranceType::Private,
            health_supplemental_rate: Some(rate),
            private_premium: amount,
            child_allowances: amount,
            extra_allowance: amount,
            non_cash_benefit: amount,
            ..monthly(amount)
        };
        let table = table();

        let oversized = gross_to_net(&input(Decimal::MAX, Decimal::MAX), &table);
        let at_limit = gross_to_net(&input(MAX_AMOUNT, Decimal::ONE), &table);

        assert_eq!(oversized.gross_monthly, MAX_AMOUNT);
        assert_eq!(oversized.taxes_annual, at_limit.taxes_annual);
        assert_eq!(oversized.contributions, at_limit.contributions);
        assert_eq!(oversized.net_monthly, at_limit.net_monthly);
    }
}
