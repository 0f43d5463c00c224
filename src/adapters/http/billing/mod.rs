//! Billing HTTP module - the webhook endpoint.

pub mod handlers;
pub mod routes;

pub use handlers::{BillingAppState, SIGNATURE_HEADER};
pub use routes::billing_webhook_routes;
