//! Admission configuration (request and code lifetimes)

use serde::Deserialize;

use super::error::ValidationError;

/// Admission configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionConfig {
    /// Hours until a pending consult request expires
    #[serde(default = "default_request_ttl_hours")]
    pub request_ttl_hours: i64,

    /// Minutes until an issued emergency code expires
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,
}

impl AdmissionConfig {
    /// Validate admission configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_ttl_hours <= 0 || self.code_ttl_minutes <= 0 {
            return Err(ValidationError::InvalidAdmissionTtl);
        }
        Ok(())
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            request_ttl_hours: default_request_ttl_hours(),
            code_ttl_minutes: default_code_ttl_minutes(),
        }
    }
}

fn default_request_ttl_hours() -> i64 {
    24
}

fn default_code_ttl_minutes() -> i64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_24h_and_15m() {
        let config = AdmissionConfig::default();
        assert_eq!(config.request_ttl_hours, 24);
        assert_eq!(config.code_ttl_minutes, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_ttl_fails() {
        let config = AdmissionConfig {
            request_ttl_hours: 0,
            code_ttl_minutes: 15,
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAdmissionTtl));
    }
}
