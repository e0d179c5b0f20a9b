//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! rate table from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{ProfessionalTaxPolicy, RateTable};

/// Loads and provides access to the statutory rate table.
///
/// The file holds a single [`RateTable`] document. Every key is optional;
/// omitted keys take their statutory defaults.
///
/// ```text
/// config/
/// └── rates.yaml   # basic/HRA split, EPF/ESI rates, PT policy, MLWF months
/// ```
///
/// # Example
///
/// ```no_run
/// use statutory_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/rates.yaml").unwrap();
/// println!("EPF rate: {}%", loader.rates().epf_percentage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: RateTable,
    source: PathBuf,
}

impl ConfigLoader {
    /// Loads and validates the rate table at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML for a rate table (`ConfigParseError`)
    /// - The rate table breaks an invariant (`Validation` / `Configuration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let rates = Self::load_yaml::<RateTable>(path)?;
        rates.validate()?;

        let pt_policy = match &rates.professional_tax {
            ProfessionalTaxPolicy::Flat(_) => "flat",
            ProfessionalTaxPolicy::Slabs(_) => "slabs",
        };
        info!(
            path = %path.display(),
            basic_percentage = %rates.basic_salary_percentage,
            epf_percentage = %rates.epf_percentage,
            esi_wage_ceiling = %rates.esi_wage_ceiling,
            pt_policy,
            always_show_mlwf = rates.always_show_mlwf,
            "Loaded statutory rate table"
        );

        Ok(Self {
            rates,
            source: path.to_path_buf(),
        })
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

    /// Returns the loaded rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Consumes the loader, returning the rate table.
    pub fn into_rates(self) -> RateTable {
        self.rates
    }

    /// Returns the path the rate table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfessionalTaxSlab;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn config_path() -> &'static str {
        "./config/rates.yaml"
    }

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "statutory-payroll-{}-{}.yaml",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let rates = loader.rates();
        assert_eq!(rates.basic_salary_percentage, dec!(50));
        assert_eq!(rates.epf_percentage, dec!(12));
        assert_eq!(rates.esi_wage_ceiling, dec!(21000));
        assert_eq!(rates.mlwf_months, BTreeSet::from([6, 12]));
        assert_eq!(rates.pt_jurisdiction, "Maharashtra");
    }

    #[test]
    fn test_shipped_configuration_uses_maharashtra_slabs() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(
            loader.rates().professional_tax,
            ProfessionalTaxPolicy::Slabs(vec![
                ProfessionalTaxSlab {
                    gross_below: Some(dec!(7500)),
                    tax: dec!(0),
                },
                ProfessionalTaxSlab {
                    gross_below: Some(dec!(10000)),
                    tax: dec!(175),
                },
                ProfessionalTaxSlab {
                    gross_below: None,
                    tax: dec!(200),
                },
            ])
        );
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/rates.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rates.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let path = write_temp("partial", "hra_percentage: 40\n");

        let loader = ConfigLoader::load(&path).unwrap();
        assert_eq!(loader.rates().hra_percentage, dec!(40));
        assert_eq!(loader.rates().epf_percentage, dec!(12));
        assert_eq!(loader.source(), path.as_path());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let path = write_temp("invalid", "epf_percentage: [unclosed\n");

        let result = ConfigLoader::load(&path);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_gapped_slab_table_is_rejected_on_load() {
        let path = write_temp(
            "gapped",
            "professional_tax:\n  - gross_below: 7500\n    tax: 0\n",
        );

        let result = ConfigLoader::load(&path);
        assert!(matches!(result, Err(EngineError::Configuration { .. })));

        fs::remove_file(path).ok();
    }
}
