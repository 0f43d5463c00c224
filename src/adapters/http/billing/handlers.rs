//! HTTP handler for the billing webhook endpoint.
//!
//! Webhooks carry no session; authenticity comes from the signature
//! header alone. A 2xx is returned only after the event has been durably
//! applied or deliberately ignored; anything else triggers the sender's
//! redelivery.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::adapters::http::ErrorResponse;
use crate::domain::billing::{SubscriptionSynchronizer, SyncOutcome, WebhookError};

/// Header carrying the processor signature over the raw body.
pub const SIGNATURE_HEADER: &str = "Billing-Signature";

/// Shared state for the billing webhook endpoint.
#[derive(Clone)]
pub struct BillingAppState {
    pub synchronizer: Arc<SubscriptionSynchronizer>,
}

/// Acknowledgement body for a handled delivery.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    pub outcome: &'static str,
}

impl From<SyncOutcome> for WebhookAck {
    fn from(outcome: SyncOutcome) -> Self {
        let outcome = match outcome {
            SyncOutcome::Applied => "applied",
            SyncOutcome::AlreadyApplied => "already_applied",
            SyncOutcome::Ignored => "ignored",
        };
        Self {
            received: true,
            outcome,
        }
    }
}

/// POST /api/webhooks/billing - Handle billing lifecycle events.
pub async fn handle_billing_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            WebhookError::ParseError(format!("missing {} header", SIGNATURE_HEADER))
        })?;

    let outcome = state.synchronizer.handle_event(&body, signature).await?;

    Ok(Json(WebhookAck::from(outcome)))
}

/// API error type that converts webhook errors to HTTP responses.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let error_code = match &self.0 {
            WebhookError::InvalidSignature => "INVALID_SIGNATURE",
            WebhookError::TimestampOutOfRange => "TIMESTAMP_OUT_OF_RANGE",
            WebhookError::InvalidTimestamp => "INVALID_TIMESTAMP",
            WebhookError::ParseError(_) => "PARSE_ERROR",
            WebhookError::Ignored(_) => "IGNORED",
            WebhookError::Database(_) => "STORAGE_UNAVAILABLE",
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}
