//! Statutory payroll engine for Indian salaries
//!
//! This crate computes the monthly salary breakdown (Basic, DA, HRA, fixed
//! allowances, EPF, ESI, Professional Tax and MLWF) from a configurable rate
//! table, aggregates the statutory compliance reports built on it, and lays
//! out payslip statements. An axum HTTP API exposes the same operations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod compliance;
pub mod config;
pub mod error;
pub mod models;
pub mod payslip;
