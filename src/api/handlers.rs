//! HTTP request handlers for the tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{gross_to_net, income_tax, tariff_zone};
use crate::models::GrossToNetInput;

use super::request::IncomeTaxRequest;
use super::response::{ApiError, ApiErrorResponse, GrossToNetResponse, IncomeTaxResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/gross-to-net", post(gross_to_net_handler))
        .route("/income-tax", post(income_tax_handler))
        .route("/tariff", get(tariff_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to an API error.
///
/// Bodies that are not JSON at all are malformed; JSON whose content does not
/// fit the request type (missing field, unknown state, tax class 7) is a
/// validation error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /gross-to-net endpoint.
///
/// Accepts a gross-to-net input and returns the full breakdown wrapped in a
/// [`GrossToNetResponse`].
async fn gross_to_net_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossToNetInput>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross-to-net request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    if let Err(err) = input.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Input validation failed"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    let table = state.table();
    let start_time = Instant::now();
    let result = gross_to_net(&input, table);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        tax_class = input.tax_class.number(),
        state = %input.state,
        net_monthly = %result.net_monthly,
        duration_us,
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        GrossToNetResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            tariff_year: table.year,
            duration_us,
            result,
        },
    )
}

/// Handler for POST /income-tax endpoint.
///
/// Evaluates the §32a tariff for a single taxable income.
async fn income_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<IncomeTaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing income tax request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let tariff = &state.table().income_tax;
    let tax = income_tax(request.taxable_income, tariff);
    let zone = tariff_zone(request.taxable_income, tariff);

    info!(
        correlation_id = %correlation_id,
        taxable_income = %request.taxable_income,
        income_tax = %tax,
        zone = zone.label(),
        "Income tax evaluated"
    );

    json_response(
        StatusCode::OK,
        IncomeTaxResponse {
            taxable_income: request.taxable_income,
            income_tax: tax,
            zone,
        },
    )
}

/// Handler for GET /tariff endpoint.
///
/// Returns the tariff table the server calculates with.
async fn tariff_handler(State(state): State<AppState>) -> Response {
    info!(tariff_year = state.table().year, "Serving tariff table");
    json_response(StatusCode::OK, state.table().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::IncomePeriod;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let loader = ConfigLoader::load("./config/steuer2026").expect("Failed to load config");
        AppState::from_loader(loader)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let input = GrossToNetInput::new(dec!(3000), IncomePeriod::Monthly);

        let response = router
            .oneshot(post_json("/gross-to-net", serde_json::to_string(&input).unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Verify Content-Type header
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response: GrossToNetResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(response.tariff_year, 2026);
        assert_eq!(response.result.net_monthly, dec!(2051.92));
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/gross-to-net", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_negative_gross_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/gross-to-net", r#"{ "gross": "-100" }"#.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("gross"));
    }

    #[tokio::test]
    async fn test_income_tax_endpoint_reports_zone() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/income-tax",
                r#"{ "taxable_income": "100000" }"#.to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response: IncomeTaxResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(response.income_tax, dec!(30864));
        assert_eq!(response.zone, crate::calculation::TariffZone::Flat);
    }
}
