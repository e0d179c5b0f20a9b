//! Application state for the statutory payroll API.
//!
//! Handlers share one rate table. Reads take a snapshot so a computation
//! never sees a table that changes halfway through.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{ConfigLoader, RateTable};
use crate::error::EngineResult;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    rates: Arc<RwLock<RateTable>>,
}

impl AppState {
    /// Creates the state around a rate table.
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates: Arc::new(RwLock::new(rates)),
        }
    }

    /// Creates the state from a loaded configuration file.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        Self::new(loader.into_rates())
    }

    /// Returns a snapshot of the current rate table.
    pub fn rates(&self) -> RateTable {
        self.rates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validates and installs a new rate table.
    pub fn replace_rates(&self, rates: RateTable) -> EngineResult<()> {
        rates.validate()?;
        *self.rates.write().unwrap_or_else(PoisonError::into_inner) = rates;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_replace_rates_visible_to_clones() {
        let state = AppState::new(RateTable::default());
        let other = state.clone();

        let updated = RateTable {
            esi_wage_ceiling: dec!(25000),
            ..RateTable::default()
        };
        state.replace_rates(updated).unwrap();

        assert_eq!(other.rates().esi_wage_ceiling, dec!(25000));
    }

    #[test]
    fn test_replace_rates_rejects_invalid_table() {
        let state = AppState::new(RateTable::default());
        let invalid = RateTable {
            epf_wage_ceiling: dec!(0),
            ..RateTable::default()
        };

        assert!(state.replace_rates(invalid).is_err());
        assert_eq!(state.rates(), RateTable::default());
    }
}
