//! Core data models for the tax engine.
//!
//! This module contains the typed input records, the enumerations they use,
//! and the result records produced by the calculators.

mod calculation_result;
mod federal_state;
mod gross_to_net;
mod insurance_profile;
mod tax_class;
mod tax_profile;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, ContributionBreakdown,
    ContributionShare, Ratios, TaxAmounts,
};
pub use federal_state::FederalState;
pub use gross_to_net::{GrossToNetInput, IncomePeriod, MAX_AMOUNT};
pub use insurance_profile::{InsuranceProfile, InsuranceType};
pub use tax_class::TaxClass;
pub use tax_profile::PersonalTaxProfile;
