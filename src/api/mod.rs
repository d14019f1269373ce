//! HTTP API module for the tax engine.
//!
//! This module provides the REST API endpoints for the gross-to-net
//! calculation, the income tax tariff, and the active tariff table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::IncomeTaxRequest;
pub use response::{ApiError, ApiErrorResponse, GrossToNetResponse, IncomeTaxResponse};
pub use state::AppState;
