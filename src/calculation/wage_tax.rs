//! Annual wage tax calculation (§39b EStG).
//!
//! This module derives the wage tax, solidarity surcharge and church tax for a
//! [`PersonalTaxProfile`]. The procedure is a simplified version of the
//! official program flow: flat deductions, the precautionary allowance, a tax
//! class adjustment, the §32a tariff, and the two surcharges computed on the
//! tax after child allowances.
//!
//! Tax classes V and VI are approximated: class V uses the class I tariff
//! path, class VI loses all allowances.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::TariffTable;
use crate::models::{AuditStep, PersonalTaxProfile, TaxAmounts, TaxClass};

use super::income_tax::{TariffZone, income_tax, splitting_tax, tariff_zone};
use super::precautionary_allowance::{PrecautionaryAllowance, precautionary_allowance};
use super::rounding::{bounded_amount, floor_euros, non_negative, round_cents};
use super::surcharges::{church_tax, solidarity_surcharge};

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The annual wage tax with its surcharges and the intermediate values that
/// led to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WageTaxResult {
    /// Annual wage tax.
    pub wage_tax: Decimal,
    /// Annual solidarity surcharge.
    pub solidarity_surcharge: Decimal,
    /// Annual church tax; zero for non-members.
    pub church_tax: Decimal,
    /// Sum of the three.
    pub total: Decimal,
    /// Annual gross plus non-cash benefits, in whole euros.
    pub basis: Decimal,
    /// Taxable income after the tax class adjustment.
    pub taxable_income: Decimal,
    /// The precautionary allowance deducted from the basis.
    pub precautionary_allowance: PrecautionaryAllowance,
    /// The tariff zone of the taxable income (of half of it for class III).
    pub zone: TariffZone,
    /// Tax on the taxable income after child allowances; the surcharge base.
    pub tax_for_surcharge: Decimal,
    /// Audit steps, numbered from 1.
    pub audit_steps: Vec<AuditStep>,
}

impl WageTaxResult {
    /// The four tax amounts of this result.
    pub fn amounts(&self) -> TaxAmounts {
        TaxAmounts {
            wage_tax: self.wage_tax,
            solidarity_surcharge: self.solidarity_surcharge,
            church_tax: self.church_tax,
            total: self.total,
        }
    }
}

fn tariff_tax(taxable_income: Decimal, tax_class: TaxClass, table: &TariffTable) -> Decimal {
    if tax_class.is_splitting() {
        splitting_tax(taxable_income, &table.income_tax)
    } else {
        income_tax(taxable_income, &table.income_tax)
    }
}

fn push_step(
    steps: &mut Vec<AuditStep>,
    rule_id: &str,
    rule_name: &str,
    legal_ref: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) {
    steps.push(AuditStep {
        step_number: steps.len() as u32 + 1,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        legal_ref: legal_ref.to_string(),
        input,
        output,
        reasoning,
    });
}

/// Calculates the annual wage tax, solidarity surcharge and church tax.
///
/// The calculation is total: negative amounts are clamped to zero and every
/// tax class is handled.
///
/// # Examples
///
/// ```
/// use steuer_engine::calculation::calculate_wage_tax;
/// use steuer_engine::config::default_table;
/// use steuer_engine::models::PersonalTaxProfile;
/// use rust_decimal_macros::dec;
///
/// let result = calculate_wage_tax(&PersonalTaxProfile::new(dec!(36000)), default_table());
/// assert_eq!(result.taxable_income, dec!(27588));
/// assert_eq!(result.wage_tax, dec!(3547));
/// assert_eq!(result.solidarity_surcharge, dec!(0));
/// ```
pub fn calculate_wage_tax(profile: &PersonalTaxProfile, table: &TariffTable) -> WageTaxResult {
    let tax_class = profile.tax_class;
    let allowances = &table.allowances;
    let mut steps = Vec::new();

    // Step 1: annual basis including non-cash benefits
    let non_cash_annual = MONTHS * bounded_amount(profile.non_cash_benefit);
    let basis = floor_euros(bounded_amount(profile.annual_gross) + non_cash_annual);
    push_step(
        &mut steps,
        "wage_tax_basis",
        "Wage Tax Basis",
        "§39b Abs. 2 EStG",
        serde_json::json!({
            "annual_gross": profile.annual_gross.normalize().to_string(),
            "non_cash_benefit_monthly": profile.non_cash_benefit.normalize().to_string()
        }),
        serde_json::json!({ "basis": basis.normalize().to_string() }),
        format!(
            "Annual gross {} plus 12 × {} non-cash benefit, rounded down = {}",
            profile.annual_gross.normalize(),
            profile.non_cash_benefit.normalize(),
            basis
        ),
    );

    // Step 2: precautionary allowance
    let allowance = precautionary_allowance(basis, tax_class, table);
    push_step(
        &mut steps,
        "precautionary_allowance",
        "Precautionary Allowance",
        "§39b Abs. 4 EStG",
        serde_json::json!({
            "basis": basis.normalize().to_string(),
            "tax_class": tax_class.number()
        }),
        serde_json::json!({
            "pension_component": allowance.pension_component.to_string(),
            "health_care_component": allowance.health_care_component.to_string(),
            "minimum_allowance": allowance.minimum_allowance.to_string(),
            "total": allowance.total.to_string()
        }),
        format!(
            "max({} pension + {} health/care, {} minimum) = {}",
            allowance.pension_component,
            allowance.health_care_component,
            allowance.minimum_allowance,
            allowance.total
        ),
    );

    // Step 3: taxable income
    let flat_deductions = if tax_class.has_primary_allowances() {
        allowances.work_expense_flat + allowances.special_expense_flat
    } else {
        Decimal::ZERO
    };
    let extra_allowance = bounded_amount(profile.extra_allowance);
    let mut taxable_income =
        non_negative(floor_euros(basis - flat_deductions - allowance.total - extra_allowance));
    match tax_class {
        TaxClass::II => {
            taxable_income = non_negative(taxable_income - allowances.lone_parent_relief);
        }
        TaxClass::VI => {
            taxable_income = non_negative(basis - allowance.total);
        }
        TaxClass::I | TaxClass::III | TaxClass::IV | TaxClass::V => {}
    }
    debug!(
        basis = %basis,
        flat_deductions = %flat_deductions,
        precautionary_allowance = %allowance.total,
        taxable_income = %taxable_income,
        tax_class = tax_class.number(),
        "Computed taxable income"
    );
    push_step(
        &mut steps,
        "taxable_income",
        "Taxable Income",
        "§39b Abs. 2 EStG",
        serde_json::json!({
            "basis": basis.normalize().to_string(),
            "flat_deductions": flat_deductions.normalize().to_string(),
            "precautionary_allowance": allowance.total.normalize().to_string(),
            "extra_allowance": extra_allowance.normalize().to_string(),
            "tax_class": tax_class.number()
        }),
        serde_json::json!({ "taxable_income": taxable_income.normalize().to_string() }),
        match tax_class {
            TaxClass::II => format!(
                "Class II: basis less deductions, allowance and {} lone-parent relief = {}",
                allowances.lone_parent_relief.normalize(),
                taxable_income
            ),
            TaxClass::VI => format!(
                "Class VI: no flat deductions or allowances, taxable income = {}",
                taxable_income
            ),
            _ => format!(
                "{} - {} - {} - {} = {}",
                basis,
                flat_deductions.normalize(),
                allowance.total,
                extra_allowance.normalize(),
                taxable_income
            ),
        },
    );

    // Step 4: tariff
    let tariff_result = tariff_tax(taxable_income, tax_class, table);
    let zone = if tax_class.is_splitting() {
        tariff_zone(taxable_income / Decimal::TWO, &table.income_tax)
    } else {
        tariff_zone(taxable_income, &table.income_tax)
    };
    let wage_tax = round_cents(tariff_result);
    push_step(
        &mut steps,
        "income_tax_tariff",
        "Income Tax Tariff",
        "§32a EStG",
        serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "splitting": tax_class.is_splitting()
        }),
        serde_json::json!({
            "zone": zone.label(),
            "wage_tax": wage_tax.to_string()
        }),
        if tax_class.is_splitting() {
            format!(
                "Splitting: 2 × tariff({} / 2) = {} ({} zone)",
                taxable_income,
                wage_tax,
                zone.label()
            )
        } else {
            format!(
                "tariff({}) = {} ({} zone)",
                taxable_income,
                wage_tax,
                zone.label()
            )
        },
    );

    // Step 5: tax for surcharge purposes and solidarity surcharge
    let child_deduction = bounded_amount(profile.child_allowances) * allowances.child_allowance;
    let surcharge_income = non_negative(taxable_income - child_deduction);
    let tax_for_surcharge = tariff_tax(surcharge_income, tax_class, table);
    let soli = solidarity_surcharge(tax_for_surcharge, tax_class.is_splitting(), &table.solidarity);
    push_step(
        &mut steps,
        "solidarity_surcharge",
        "Solidarity Surcharge",
        "§4 SolZG",
        serde_json::json!({
            "child_allowances": profile.child_allowances.normalize().to_string(),
            "surcharge_income": surcharge_income.normalize().to_string(),
            "tax_for_surcharge": tax_for_surcharge.normalize().to_string()
        }),
        serde_json::json!({ "solidarity_surcharge": soli.to_string() }),
        if soli.is_zero() {
            format!(
                "Tax for surcharge {} does not exceed the exemption threshold",
                tax_for_surcharge
            )
        } else {
            format!(
                "min({} × {}, {} × excess over threshold) = {}",
                tax_for_surcharge,
                table.solidarity.rate.normalize(),
                table.solidarity.mitigation_rate.normalize(),
                soli
            )
        },
    );

    // Step 6: church tax
    let church = if profile.church_member {
        church_tax(tax_for_surcharge, profile.state, &table.church_tax)
    } else {
        Decimal::ZERO
    };
    push_step(
        &mut steps,
        "church_tax",
        "Church Tax",
        "KiStG",
        serde_json::json!({
            "church_member": profile.church_member,
            "state": profile.state.name(),
            "tax_for_surcharge": tax_for_surcharge.normalize().to_string()
        }),
        serde_json::json!({ "church_tax": church.to_string() }),
        if profile.church_member {
            format!(
                "{} × {} ({}) = {}",
                tax_for_surcharge,
                table.church_tax.rate_for(profile.state).normalize(),
                profile.state,
                church
            )
        } else {
            "Not a church member".to_string()
        },
    );

    let total = round_cents(wage_tax + soli + church);
    debug!(
        wage_tax = %wage_tax,
        solidarity_surcharge = %soli,
        church_tax = %church,
        total = %total,
        "Computed annual wage tax"
    );

    WageTaxResult {
        wage_tax,
        solidarity_surcharge: soli,
        church_tax: church,
        total,
        basis,
        taxable_income,
        precautionary_allowance: allowance,
        zone,
        tax_for_surcharge,
        audit_steps: steps,
    }
}
