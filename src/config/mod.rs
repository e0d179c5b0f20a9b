//! Configuration loading and management for the statutory payroll engine.
//!
//! This module provides the [`RateTable`] every computation reads, and a
//! loader for rate tables stored as YAML files.
//!
//! # Example
//!
//! ```no_run
//! use statutory_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rates.yaml").unwrap();
//! println!("ESI ceiling: {}", config.rates().esi_wage_ceiling);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ProfessionalTaxPolicy, ProfessionalTaxSlab, RateTable};

pub(crate) use types::DA_PERCENTAGE;
