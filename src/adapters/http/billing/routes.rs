//! Axum router configuration for the billing webhook.
//!
//! Separate from the consult routes because webhook deliveries carry no
//! user session; authenticity is established by signature instead.

use axum::{routing::post, Router};

use super::handlers::{handle_billing_webhook, BillingAppState};

/// Create the billing webhook router.
///
/// # Routes
/// - `POST /billing` - Handle billing lifecycle events
pub fn billing_webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/billing", post(handle_billing_webhook))
}
