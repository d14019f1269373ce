//! Calculation result models for the tax engine.
//!
//! This module contains the [`CalculationResult`] type produced by the
//! gross-to-net calculation, the tax and contribution breakdowns it is made
//! of, and the audit trace that records how each figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wage tax and the surcharges levied on it, for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAmounts {
    /// Wage tax (Lohnsteuer).
    pub wage_tax: Decimal,
    /// Solidarity surcharge (Solidaritätszuschlag).
    pub solidarity_surcharge: Decimal,
    /// Church tax (Kirchensteuer).
    pub church_tax: Decimal,
    /// Sum of the three.
    pub total: Decimal,
}

/// A contribution split into the employee and employer share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionShare {
    /// The share withheld from the employee's salary.
    pub employee: Decimal,
    /// The share paid on top by the employer.
    pub employer: Decimal,
}

impl ContributionShare {
    /// Creates a share from its two halves.
    pub fn new(employee: Decimal, employer: Decimal) -> Self {
        Self { employee, employer }
    }
}

/// Monthly social insurance contributions across the four branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// Health insurance (Krankenversicherung).
    pub health: ContributionShare,
    /// Long-term care insurance (Pflegeversicherung).
    pub care: ContributionShare,
    /// Pension insurance (Rentenversicherung).
    pub pension: ContributionShare,
    /// Unemployment insurance (Arbeitslosenversicherung).
    pub unemployment: ContributionShare,
    /// Sum of the employee shares.
    pub total_employee: Decimal,
    /// Sum of the employer shares.
    pub total_employer: Decimal,
}

/// Deductions and net income as percentages of the monthly gross.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratios {
    /// Monthly taxes as a percentage of gross.
    pub tax_rate: Decimal,
    /// Employee contributions as a percentage of gross.
    pub contribution_rate: Decimal,
    /// Net income as a percentage of gross.
    pub net_rate: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute the rule implements (e.g. "§32a EStG").
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag situations the simplified procedure does not model exactly;
/// they never stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends steps, renumbering them to continue the existing sequence.
    pub fn extend_steps(&mut self, steps: impl IntoIterator<Item = AuditStep>) {
        for mut step in steps {
            step.step_number = self.steps.len() as u32 + 1;
            self.steps.push(step);
        }
    }

    /// Returns the step recorded for the given rule, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The complete result of a gross-to-net calculation.
///
/// Everything here is derived deterministically from the input; calling the
/// calculation twice with the same input yields an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Monthly gross salary.
    pub gross_monthly: Decimal,
    /// Annual gross salary.
    pub gross_annual: Decimal,
    /// Taxes per month (annual values divided by 12).
    pub taxes_monthly: TaxAmounts,
    /// Taxes per year.
    pub taxes_annual: TaxAmounts,
    /// Monthly social insurance contributions.
    pub contributions: ContributionBreakdown,
    /// Monthly deductions (taxes plus employee contributions).
    pub deductions_monthly: Decimal,
    /// Annual deductions.
    pub deductions_annual: Decimal,
    /// Monthly net income.
    pub net_monthly: Decimal,
    /// Annual net income (monthly net times 12).
    pub net_annual: Decimal,
    /// Ratios relative to the monthly gross.
    pub ratios: Ratios,
    /// How the figures were derived.
    pub audit: AuditTrace,
}
