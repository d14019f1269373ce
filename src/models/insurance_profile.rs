//! Input record for the social insurance calculation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FederalState;
use crate::error::EngineError;

/// How the employee is covered for health insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceType {
    /// Compulsory member of a statutory fund (gesetzlich).
    #[default]
    Statutory,
    /// Privately insured (privat); no care contribution is withheld.
    Private,
    /// Voluntary member of a statutory fund (freiwillig gesetzlich).
    VoluntaryStatutory,
}

impl InsuranceType {
    /// Returns true for both statutory variants.
    pub fn is_statutory(&self) -> bool {
        matches!(
            self,
            InsuranceType::Statutory | InsuranceType::VoluntaryStatutory
        )
    }

    fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::Statutory => "statutory",
            InsuranceType::Private => "private",
            InsuranceType::VoluntaryStatutory => "voluntary_statutory",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsuranceType {
    type Err = EngineError;

    /// Accepts the serialized names as well as the German form values
    /// `gesetzlich`, `privat` and `freiwillig`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "statutory" | "gesetzlich" => Ok(InsuranceType::Statutory),
            "private" | "privat" => Ok(InsuranceType::Private),
            "voluntary_statutory" | "freiwillig" => Ok(InsuranceType::VoluntaryStatutory),
            _ => Err(EngineError::UnknownInsuranceType {
                value: s.to_string(),
            }),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_age() -> u8 {
    30
}

/// Parameters that determine the monthly social insurance contributions.
///
/// # Example
///
/// ```
/// use steuer_engine::models::{InsuranceProfile, InsuranceType};
/// use rust_decimal_macros::dec;
///
/// let profile = InsuranceProfile {
///     insurance_type: InsuranceType::Private,
///     private_premium: dec!(480),
///     ..InsuranceProfile::new(dec!(6500))
/// };
/// assert!(profile.employer_subsidy);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceProfile {
    /// Monthly gross salary in euro (including non-cash benefits).
    pub monthly_gross: Decimal,
    /// Federal state of employment. Defaults to Nordrhein-Westfalen.
    #[serde(default)]
    pub state: FederalState,
    /// Health insurance type. Defaults to statutory.
    #[serde(default)]
    pub insurance_type: InsuranceType,
    /// Supplemental health rate of the chosen fund as a fraction (0.029 = 2.9 %).
    /// `None` uses the average supplemental rate of the tariff table.
    #[serde(default)]
    pub health_supplemental_rate: Option<Decimal>,
    /// Monthly private health premium. Defaults to 0.
    #[serde(default)]
    pub private_premium: Decimal,
    /// Whether the employer pays a subsidy towards the private premium.
    /// Defaults to true.
    #[serde(default = "default_true")]
    pub employer_subsidy: bool,
    /// Whether pension insurance is withheld. Defaults to true.
    #[serde(default = "default_true")]
    pub pension_insured: bool,
    /// Whether unemployment insurance is withheld. Defaults to true.
    #[serde(default = "default_true")]
    pub unemployment_insured: bool,
    /// Number of children under 25 counted for the care rate. Defaults to 0.
    #[serde(default)]
    pub children_under_25: u8,
    /// Whether the employee has ever had children. Defaults to false.
    #[serde(default)]
    pub has_children: bool,
    /// Age of the employee in years. Defaults to 30.
    #[serde(default = "default_age")]
    pub age: u8,
}

impl InsuranceProfile {
    /// Creates a profile with the given monthly gross and all defaults.
    pub fn new(monthly_gross: Decimal) -> Self {
        Self {
            monthly_gross,
            state: FederalState::default(),
            insurance_type: InsuranceType::default(),
            health_supplemental_rate: None,
            private_premium: Decimal::ZERO,
            employer_subsidy: true,
            pension_insured: true,
            unemployment_insured: true,
            children_under_25: 0,
            has_children: false,
            age: default_age(),
        }
    }
}
