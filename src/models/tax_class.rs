//! Wage tax classes (Steuerklassen).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The wage tax class of an employee.
///
/// Serialized as the plain number 1 to 6, which is how payroll forms and the
/// calculator pages refer to it. Any other number is rejected.
///
/// # Example
///
/// ```
/// use steuer_engine::models::TaxClass;
///
/// assert_eq!(TaxClass::try_from(3).unwrap(), TaxClass::III);
/// assert!(TaxClass::try_from(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxClass {
    /// Single, divorced or permanently separated.
    #[default]
    I,
    /// Single parent entitled to the lone-parent relief.
    II,
    /// Married, partner in class V or without wages (splitting tariff).
    III,
    /// Married, both partners earning similar wages.
    IV,
    /// Married, partner in class III.
    V,
    /// Second and further employments.
    VI,
}

impl TaxClass {
    /// Returns the class as its number 1 to 6.
    pub fn number(&self) -> u8 {
        match self {
            TaxClass::I => 1,
            TaxClass::II => 2,
            TaxClass::III => 3,
            TaxClass::IV => 4,
            TaxClass::V => 5,
            TaxClass::VI => 6,
        }
    }

    /// Returns true if the splitting tariff applies (class III).
    pub fn is_splitting(&self) -> bool {
        *self == TaxClass::III
    }

    /// Returns true if the flat deductions and the precautionary allowance
    /// of a primary employment apply (every class except VI).
    pub fn has_primary_allowances(&self) -> bool {
        *self != TaxClass::VI
    }

    /// Returns true for classes whose withholding is only approximated
    /// (V and VI).
    pub fn is_approximated(&self) -> bool {
        matches!(self, TaxClass::V | TaxClass::VI)
    }
}

impl TryFrom<u8> for TaxClass {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TaxClass::I),
            2 => Ok(TaxClass::II),
            3 => Ok(TaxClass::III),
            4 => Ok(TaxClass::IV),
            5 => Ok(TaxClass::V),
            6 => Ok(TaxClass::VI),
            _ => Err(EngineError::InvalidTaxClass { value }),
        }
    }
}

impl From<TaxClass> for u8 {
    fn from(class: TaxClass) -> Self {
        class.number()
    }
}

impl fmt::Display for TaxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for n in 1..=6u8 {
            assert_eq!(TaxClass::try_from(n).unwrap().number(), n);
        }
    }

    #[test]
    fn test_zero_and_seven_are_rejected() {
        assert!(matches!(
            TaxClass::try_from(0),
            Err(EngineError::InvalidTaxClass { value: 0 })
        ));
        assert!(matches!(
            TaxClass::try_from(7),
            Err(EngineError::InvalidTaxClass { value: 7 })
        ));
    }

    #[test]
    fn test_only_class_three_splits() {
        assert!(TaxClass::III.is_splitting());
        assert!(!TaxClass::IV.is_splitting());
        assert!(!TaxClass::I.is_splitting());
    }

    #[test]
    fn test_class_six_has_no_primary_allowances() {
        assert!(!TaxClass::VI.has_primary_allowances());
        assert!(TaxClass::V.has_primary_allowances());
    }

    #[test]
    fn test_serde_uses_numbers() {
        let class: TaxClass = serde_json::from_str("2").unwrap();
        assert_eq!(class, TaxClass::II);
        assert_eq!(serde_json::to_string(&TaxClass::V).unwrap(), "5");
        assert!(serde_json::from_str::<TaxClass>("9").is_err());
    }
}
