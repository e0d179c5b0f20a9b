//! HTTP API for the statutory payroll engine.
//!
//! A thin JSON surface over the library: rate table administration, salary
//! breakdowns, payslips and compliance reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{CORRELATION_ID_HEADER, create_router};
pub use request::{BreakdownRequest, ComplianceRequest, PayslipRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
