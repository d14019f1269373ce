//! German federal states (Bundesländer).
//!
//! The state selects the church tax rate and, for Saxony, the split of the
//! long-term care contribution between employee and employer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the 16 German federal states, serialized by its German name.
///
/// # Example
///
/// ```
/// use steuer_engine::models::FederalState;
///
/// let state: FederalState = "Bayern".parse().unwrap();
/// assert_eq!(state, FederalState::Bayern);
/// assert_eq!(state.to_string(), "Bayern");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum FederalState {
    /// Baden-Württemberg.
    #[serde(rename = "Baden-Württemberg")]
    BadenWuerttemberg,
    /// Bayern (Bavaria).
    #[serde(rename = "Bayern")]
    Bayern,
    /// Berlin.
    #[serde(rename = "Berlin")]
    Berlin,
    /// Brandenburg.
    #[serde(rename = "Brandenburg")]
    Brandenburg,
    /// Bremen.
    #[serde(rename = "Bremen")]
    Bremen,
    /// Hamburg.
    #[serde(rename = "Hamburg")]
    Hamburg,
    /// Hessen.
    #[serde(rename = "Hessen")]
    Hessen,
    /// Mecklenburg-Vorpommern.
    #[serde(rename = "Mecklenburg-Vorpommern")]
    MecklenburgVorpommern,
    /// Niedersachsen.
    #[serde(rename = "Niedersachsen")]
    Niedersachsen,
    /// Nordrhein-Westfalen.
    #[default]
    #[serde(rename = "Nordrhein-Westfalen")]
    NordrheinWestfalen,
    /// Rheinland-Pfalz.
    #[serde(rename = "Rheinland-Pfalz")]
    RheinlandPfalz,
    /// Saarland.
    #[serde(rename = "Saarland")]
    Saarland,
    /// Sachsen (Saxony).
    #[serde(rename = "Sachsen")]
    Sachsen,
    /// Sachsen-Anhalt.
    #[serde(rename = "Sachsen-Anhalt")]
    SachsenAnhalt,
    /// Schleswig-Holstein.
    #[serde(rename = "Schleswig-Holstein")]
    SchleswigHolstein,
    /// Thüringen.
    #[serde(rename = "Thüringen")]
    Thueringen,
}

impl FederalState {
    /// All states in alphabetical order of their German names.
    pub const ALL: [FederalState; 16] = [
        FederalState::BadenWuerttemberg,
        FederalState::Bayern,
        FederalState::Berlin,
        FederalState::Brandenburg,
        FederalState::Bremen,
        FederalState::Hamburg,
        FederalState::Hessen,
        FederalState::MecklenburgVorpommern,
        FederalState::Niedersachsen,
        FederalState::NordrheinWestfalen,
        FederalState::RheinlandPfalz,
        FederalState::Saarland,
        FederalState::Sachsen,
        FederalState::SachsenAnhalt,
        FederalState::SchleswigHolstein,
        FederalState::Thueringen,
    ];

    /// Returns the German name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "Baden-Württemberg",
            FederalState::Bayern => "Bayern",
            FederalState::Berlin => "Berlin",
            FederalState::Brandenburg => "Brandenburg",
            FederalState::Bremen => "Bremen",
            FederalState::Hamburg => "Hamburg",
            FederalState::Hessen => "Hessen",
            FederalState::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            FederalState::Niedersachsen => "Niedersachsen",
            FederalState::NordrheinWestfalen => "Nordrhein-Westfalen",
            FederalState::RheinlandPfalz => "Rheinland-Pfalz",
            FederalState::Saarland => "Saarland",
            FederalState::Sachsen => "Sachsen",
            FederalState::SachsenAnhalt => "Sachsen-Anhalt",
            FederalState::SchleswigHolstein => "Schleswig-Holstein",
            FederalState::Thueringen => "Thüringen",
        }
    }
}

impl fmt::Display for FederalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FederalState {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FederalState::ALL
            .iter()
            .copied()
            .find(|state| state.name() == trimmed)
            .ok_or_else(|| EngineError::UnknownState {
                name: s.to_string(),
            })
    }
}
