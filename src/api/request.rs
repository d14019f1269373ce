//! Request types for the tax engine API.
//!
//! `POST /gross-to-net` accepts a [`GrossToNetInput`](crate::models::GrossToNetInput)
//! directly; the remaining endpoints have their own small bodies defined here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for the `/income-tax` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxRequest {
    /// Annual taxable income in euro.
    pub taxable_income: Decimal,
}
