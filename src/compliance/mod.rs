//! Statutory compliance reports.
//!
//! One aggregator per scheme. Each walks the employee roster, computes every
//! employee through the breakdown engine, and groups the resulting rows by
//! unit and department.

mod bonus;
mod esi;
mod mlwf;
mod pf;
mod pt;
mod roster;

pub use bonus::aggregate_bonus;
pub use esi::aggregate_esi;
pub use mlwf::aggregate_mlwf;
pub use pf::aggregate_pf;
pub use pt::aggregate_pt;
pub use roster::{ALL_DEPARTMENTS, ALL_UNITS};
