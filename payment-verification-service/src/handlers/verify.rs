//! Payment verification handler.
//!
//! Looks up an order's payments and the order itself at the gateway and
//! reshapes both into a single snapshot. Nothing is stored or retried.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{PaymentNotFoundResponse, VerifyPaymentQuery, VerifyPaymentResponse},
    models::representative_payment,
    services::{
        metrics::{record_verification, VerificationOutcome},
        GatewayError, PaymentGateway,
    },
    AppState,
};

const ORDER_ID_REQUIRED: &str = "Order ID is required";

/// Outcome of a lookup that reached the gateway without failing.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Verified(VerifyPaymentResponse),
    /// No payment attempt exists yet. The gateway does not tell this apart
    /// from an unknown order.
    NotFound(PaymentNotFoundResponse),
}

impl IntoResponse for Verification {
    fn into_response(self) -> Response {
        match self {
            Verification::Verified(body) => (StatusCode::OK, Json(body)).into_response(),
            Verification::NotFound(body) => (StatusCode::NOT_FOUND, Json(body)).into_response(),
        }
    }
}

/// `GET /verify-payment?order_id=...`
pub async fn verify_payment(
    State(state): State<AppState>,
    query: Result<Query<VerifyPaymentQuery>, QueryRejection>,
) -> Result<Verification, AppError> {
    let order_id = require_order_id(query).map_err(|e| {
        record_verification(VerificationOutcome::Rejected);
        e
    })?;

    tracing::info!(order_id = %order_id, "Verifying payment for order");

    match verify_order(state.gateway.as_ref(), order_id).await {
        Ok(verification) => {
            let outcome = match &verification {
                Verification::Verified(body) => {
                    tracing::info!(
                        order_id = %body.order_id,
                        payment_status = ?body.payment_status,
                        order_status = ?body.order_status,
                        "Payment verified"
                    );
                    VerificationOutcome::Verified
                }
                Verification::NotFound(body) => {
                    tracing::info!(order_id = %body.order_id, "No payment found for order");
                    VerificationOutcome::NotFound
                }
            };
            record_verification(outcome);
            Ok(verification)
        }
        Err(e) => {
            tracing::error!(error = %e, "Payment verification error");
            record_verification(VerificationOutcome::UpstreamError);
            Err(AppError::InternalError(anyhow::Error::new(e)))
        }
    }
}

/// Query the gateway for `order_id`.
///
/// The order is fetched only when at least one payment exists. A failure of
/// either call fails the whole lookup; no partial snapshot is returned.
pub async fn verify_order(
    gateway: &dyn PaymentGateway,
    order_id: String,
) -> Result<Verification, GatewayError> {
    let payments = gateway.list_payments(&order_id).await?;

    let Some(payment) = representative_payment(&payments) else {
        return Ok(Verification::NotFound(PaymentNotFoundResponse::new(
            order_id,
        )));
    };

    tracing::debug!(
        order_id = %order_id,
        attempts = payments.len(),
        "Selected representative payment"
    );

    let payment = payment.clone();
    let order = gateway.fetch_order(&order_id).await?;

    Ok(Verification::Verified(VerifyPaymentResponse::new(
        order_id, payment, order,
    )))
}

fn require_order_id(
    query: Result<Query<VerifyPaymentQuery>, QueryRejection>,
) -> Result<String, AppError> {
    let bad_request = || AppError::BadRequest(anyhow::anyhow!(ORDER_ID_REQUIRED));

    let Query(query) = query.map_err(|e| {
        tracing::warn!(error = %e, "Rejected unparseable verification query");
        bad_request()
    })?;

    query.validate().map_err(|_| bad_request())?;

    query.order_id.ok_or_else(bad_request)
}

/// CORS preflight. Always `200 {}`.
pub async fn preflight() -> Json<Value> {
    Json(json!({}))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
