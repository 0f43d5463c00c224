//! Payment configuration (billing webhook verification)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Shared secret used to verify billing webhook signatures
    pub webhook_secret: SecretString,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.webhook_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingWebhookSecret);
        }
        Ok(())
    }
}
