//! Tariff table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a tariff table
//! from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    Allowances, ChurchTaxConfig, IncomeTaxTariff, SocialInsuranceConfig, SolidarityConfig,
    TariffTable,
};

/// Contents of `tariff.yaml`.
#[derive(Debug, Deserialize)]
struct TariffFile {
    year: u16,
    income_tax: IncomeTaxTariff,
    allowances: Allowances,
    solidarity: SolidarityConfig,
}

/// Loads and provides access to a tariff table.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/steuer2026/
/// ├── tariff.yaml            # Year, §32a tariff, allowances, solidarity surcharge
/// ├── church_tax.yaml        # Church tax rate per federal state
/// └── social_insurance.yaml  # Ceilings, contribution rates, care rate table
/// ```
///
/// # Example
///
/// ```no_run
/// use steuer_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/steuer2026").unwrap();
/// println!("Loaded tariff year: {}", loader.table().year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: TariffTable,
}

impl ConfigLoader {
    /// Loads a tariff table from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/steuer2026")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or misses a field
    /// - The assembled table fails [`TariffTable::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tariff = Self::load_yaml::<TariffFile>(&path.join("tariff.yaml"))?;
        let church_tax = Self::load_yaml::<ChurchTaxConfig>(&path.join("church_tax.yaml"))?;
        let social_insurance =
            Self::load_yaml::<SocialInsuranceConfig>(&path.join("social_insurance.yaml"))?;

        let table = TariffTable {
            year: tariff.year,
            income_tax: tariff.income_tax,
            allowances: tariff.allowances,
            solidarity: tariff.solidarity,
            church_tax,
            social_insurance,
        };
        table.validate()?;

        debug!(year = table.year, path = %path.display(), "Loaded tariff table");
        Ok(Self { table })
    }

    /// Wraps the compiled-in 2026 table.
    pub fn builtin() -> Self {
        Self {
            table: TariffTable::steuer_2026(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded tariff table.
    pub fn table(&self) -> &TariffTable {
        &self.table
    }

    /// Consumes the loader and returns the tariff table.
    pub fn into_table(self) -> TariffTable {
        self.table
    }
}
