//! Monthly social insurance contributions (SGB IV, V, VI, III and XI).
//!
//! Health, care, pension and unemployment contributions are computed on the
//! monthly gross capped at the respective contribution ceiling and split
//! into an employee and an employer share. Every line is rounded to cents.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::{SocialInsuranceConfig, TariffTable};
use crate::models::{
    AuditStep, ContributionBreakdown, ContributionShare, InsuranceProfile, InsuranceType,
};

use super::rounding::{bounded_amount, non_negative, round_cents};

/// The monthly contributions together with the audit steps that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialInsuranceResult {
    /// Contributions per branch and totals.
    pub contributions: ContributionBreakdown,
    /// Audit steps, numbered from 1.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns the employee's share of the care rate.
///
/// Childless employees at or above the surcharge age pay the childless rate;
/// everyone else pays a rate graded by the number of children under 25. In
/// the surcharge state (Saxony) employees pay an extra share.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::care_employee_rate;
/// use steuer_engine::config::default_table;
/// use steuer_engine::models::{FederalState, InsuranceProfile};
/// use rust_decimal_macros::dec;
///
/// let config = &default_table().social_insurance;
/// let profile = InsuranceProfile::new(dec!(3000));
/// assert_eq!(care_employee_rate(&profile, config), dec!(0.024));
///
/// let saxon = InsuranceProfile { state: FederalState::Sachsen, ..profile };
/// assert_eq!(care_employee_rate(&saxon, config), dec!(0.029));
/// ```
pub fn care_employee_rate(profile: &InsuranceProfile, config: &SocialInsuranceConfig) -> Decimal {
    let rates = &config.care_employee_rates;
    let base_rate = if !profile.has_children && profile.age >= config.childless_surcharge_age {
        rates.childless
    } else {
        match profile.children_under_25 {
            0 | 1 => rates.one_child,
            2 => rates.two_children,
            3 => rates.three_children,
            4 => rates.four_children,
            _ => rates.five_or_more,
        }
    };

    if profile.state == config.care_surcharge_state {
        base_rate + config.care_state_surcharge
    } else {
        base_rate
    }
}

fn audit_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    legal_ref: &str,
    base: Decimal,
    share: ContributionShare,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        legal_ref: legal_ref.to_string(),
        input: serde_json::json!({ "base": base.normalize().to_string() }),
        output: serde_json::json!({
            "employee": share.employee.to_string(),
            "employer": share.employer.to_string()
        }),
        reasoning,
    }
}

/// Splits `rate` evenly between employee and employer on `base`.
fn half_each(base: Decimal, rate: Decimal) -> ContributionShare {
    let half = round_cents(base * rate / Decimal::TWO);
    ContributionShare::new(half, half)
}

/// Calculates the monthly social insurance contributions.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::calculate_social_insurance;
/// use steuer_engine::config::default_table;
/// use steuer_engine::models::InsuranceProfile;
/// use rust_decimal_macros::dec;
///
/// let result = calculate_social_insurance(&InsuranceProfile::new(dec!(3000)), default_table());
/// assert_eq!(result.contributions.health.employee, dec!(262.50));
/// assert_eq!(result.contributions.total_employee, dec!(652.50));
/// ```
pub fn calculate_social_insurance(
    profile: &InsuranceProfile,
    table: &TariffTable,
) -> SocialInsuranceResult {
    let si = &table.social_insurance;
    let gross = bounded_amount(profile.monthly_gross);
    let health_base = gross.min(si.health_ceiling_monthly);
    let pension_base = gross.min(si.pension_ceiling_monthly);
    let mut steps = Vec::new();

    // Health
    let health = match profile.insurance_type {
        InsuranceType::Statutory | InsuranceType::VoluntaryStatutory => {
            let supplemental = profile
                .health_supplemental_rate
                .map(|rate| non_negative(rate).min(Decimal::ONE))
                .unwrap_or(si.health_supplemental_default);
            let share = half_each(health_base, si.health_rate + supplemental);
            steps.push(audit_step(
                steps.len() as u32 + 1,
                "health_insurance",
                "Statutory Health Insurance",
                "§§241, 242 SGB V",
                health_base,
                share,
                format!(
                    "{} × ({} + {}) / 2 = {} each",
                    health_base.normalize(),
                    si.health_rate.normalize(),
                    supplemental.normalize(),
                    share.employee
                ),
            ));
            share
        }
        InsuranceType::Private => {
            let premium = bounded_amount(profile.private_premium);
            let employer = if profile.employer_subsidy {
                let statutory_half = health_base
                    * (si.health_rate + si.health_supplemental_default)
                    / Decimal::TWO;
                round_cents((premium / Decimal::TWO).min(statutory_half))
            } else {
                Decimal::ZERO
            };
            let share = ContributionShare::new(round_cents(premium), employer);
            steps.push(audit_step(
                steps.len() as u32 + 1,
                "health_insurance",
                "Private Health Insurance",
                "§257 SGB V",
                health_base,
                share,
                if profile.employer_subsidy {
                    format!(
                        "Premium {}; employer subsidy min(half the premium, statutory employer share) = {}",
                        share.employee, share.employer
                    )
                } else {
                    format!("Premium {}; no employer subsidy", share.employee)
                },
            ));
            share
        }
    };

    // Care
    let care = if profile.insurance_type.is_statutory() {
        let employee_rate = care_employee_rate(profile, si);
        let employer_rate = non_negative(si.care_rate - employee_rate);
        let share = ContributionShare::new(
            round_cents(health_base * employee_rate),
            round_cents(health_base * employer_rate),
        );
        steps.push(audit_step(
            steps.len() as u32 + 1,
            "care_insurance",
            "Long-Term Care Insurance",
            "§§55, 58 SGB XI",
            health_base,
            share,
            format!(
                "Employee rate {}, employer rate {} on {}",
                employee_rate.normalize(),
                employer_rate.normalize(),
                health_base.normalize()
            ),
        ));
        share
    } else {
        ContributionShare::default()
    };

    // Pension
    let pension = if profile.pension_insured {
        let share = half_each(pension_base, si.pension_rate);
        steps.push(audit_step(
            steps.len() as u32 + 1,
            "pension_insurance",
            "Pension Insurance",
            "§§157, 168 SGB VI",
            pension_base,
            share,
            format!(
                "{} × {} / 2 = {} each",
                pension_base.normalize(),
                si.pension_rate.normalize(),
                share.employee
            ),
        ));
        share
    } else {
        ContributionShare::default()
    };

    // Unemployment
    let unemployment = if profile.unemployment_insured {
        let share = half_each(pension_base, si.unemployment_rate);
        steps.push(audit_step(
            steps.len() as u32 + 1,
            "unemployment_insurance",
            "Unemployment Insurance",
            "§§341, 346 SGB III",
            pension_base,
            share,
            format!(
                "{} × {} / 2 = {} each",
                pension_base.normalize(),
                si.unemployment_rate.normalize(),
                share.employee
            ),
        ));
        share
    } else {
        ContributionShare::default()
    };

    let total_employee =
        round_cents(health.employee + care.employee + pension.employee + unemployment.employee);
    let total_employer =
        round_cents(health.employer + care.employer + pension.employer + unemployment.employer);

    debug!(
        monthly_gross = %gross,
        insurance_type = %profile.insurance_type,
        total_employee = %total_employee,
        total_employer = %total_employer,
        "Computed social insurance contributions"
    );

    SocialInsuranceResult {
        contributions: ContributionBreakdown {
            health,
            care,
            pension,
            unemployment,
            total_employee,
            total_employer,
        },
        audit_steps: steps,
    }
}
