//! Single-use emergency override codes.
//!
//! A code lets one submission bypass a professional's block switch and
//! pending cap. Codes are short-lived and consumed at most once; the token
//! only needs to be collision-resistant within its validity window, not a
//! security primitive.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmergencyCodeId, ProfessionalId, Timestamp};

/// Token length for generated codes.
pub const CODE_LENGTH: usize = 6;

/// Default validity window for a freshly issued code.
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 15;

/// Alphabet for generated codes. Skips 0/O/1/I/L to keep tokens readable
/// over the phone.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// A single-use bypass code scoped to one professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyCode {
    pub id: EmergencyCodeId,
    pub professional_id: ProfessionalId,
    pub code: String,
    pub expires_at: Timestamp,
    pub is_used: bool,
}

impl EmergencyCode {
    /// Issues a fresh unused code valid for `ttl_minutes` from `now`.
    pub fn issue(professional_id: ProfessionalId, now: Timestamp, ttl_minutes: i64) -> Self {
        Self {
            id: EmergencyCodeId::new(),
            professional_id,
            code: generate_code(),
            expires_at: now.plus_minutes(ttl_minutes),
            is_used: false,
        }
    }

    /// Returns true if the code can still authorize a bypass.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        !self.is_used && self.expires_at.is_after(&now)
    }
}

/// Normalizes caller-supplied code input: trim surrounding whitespace and
/// uppercase, so `" ab3k9q "` matches a stored `AB3K9Q`.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Generates a random token from the code alphabet.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pro() -> ProfessionalId {
        ProfessionalId::new("pro-1").unwrap()
    }

    #[test]
    fn issued_code_is_unused_and_unexpired() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let code = EmergencyCode::issue(pro(), now, 15);

        assert!(!code.is_used);
        assert_eq!(code.expires_at, now.plus_minutes(15));
        assert!(code.is_valid(now));
    }

    #[test]
    fn used_code_is_invalid() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let mut code = EmergencyCode::issue(pro(), now, 15);
        code.is_used = true;

        assert!(!code.is_valid(now));
    }

    #[test]
    fn expired_code_is_invalid() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let code = EmergencyCode::issue(pro(), now, 15);

        assert!(code.is_valid(now.plus_minutes(14)));
        // Expiry boundary itself no longer admits.
        assert!(!code.is_valid(now.plus_minutes(15)));
        assert!(!code.is_valid(now.plus_minutes(16)));
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  ab3k9q "), "AB3K9Q");
        assert_eq!(normalize_code("AB3K9Q"), "AB3K9Q");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn generated_code_has_expected_shape() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn generated_code_survives_normalization() {
        // Tokens never contain lowercase or whitespace, so normalization
        // of a verbatim token is the identity.
        let code = generate_code();
        assert_eq!(normalize_code(&code), code);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(input in "[ -~]{0,64}") {
            let once = normalize_code(&input);
            let twice = normalize_code(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_ignores_surrounding_whitespace(
            inner in "[A-Z2-9]{1,12}",
            left in "[ \t]{0,4}",
            right in "[ \t]{0,4}",
        ) {
            let padded = format!("{left}{inner}{right}");
            prop_assert_eq!(normalize_code(&padded), inner);
        }
    }
}
