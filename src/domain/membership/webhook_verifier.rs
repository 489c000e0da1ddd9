//! Ko-fi webhook verification.
//!
//! Ko-fi does not sign its webhooks. Each payload instead carries the
//! verification token shown on the Ko-fi dashboard, which is compared here
//! against the configured copy in constant time.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::errors::MembershipError;
use super::kofi_event::KofiPayload;

/// Verifier for Ko-fi webhook payloads.
pub struct KofiTokenVerifier {
    token: SecretString,
}

impl KofiTokenVerifier {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Parses the `data` form field and checks its verification token.
    ///
    /// # Errors
    ///
    /// - `MissingPayload` - the form had no `data` field
    /// - `MalformedPayload` - `data` is not a Ko-fi JSON document
    /// - `InvalidVerificationToken` - token mismatch
    pub fn verify_and_parse(&self, data: Option<&str>) -> Result<KofiPayload, MembershipError> {
        let data = data
            .filter(|d| !d.is_empty())
            .ok_or(MembershipError::MissingPayload)?;

        let payload: KofiPayload = serde_json::from_str(data)
            .map_err(|e| MembershipError::malformed_payload(e.to_string()))?;

        if !self.matches(payload.verification_token.expose_secret()) {
            return Err(MembershipError::InvalidVerificationToken);
        }

        Ok(payload)
    }

    fn matches(&self, candidate: &str) -> bool {
        constant_time_compare(
            candidate.as_bytes(),
            self.token.expose_secret().as_bytes(),
        )
    }
}

/// Constant-time byte comparison. Differing lengths compare unequal.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> KofiTokenVerifier {
        KofiTokenVerifier::new(SecretString::new("kofi-secret".to_string()))
    }

    fn data(token: &str) -> String {
        format!(
            r#"{{"verification_token":"{}","type":"Subscription","email":"ada@example.com","is_subscription_payment":true}}"#,
            token
        )
    }

    #[test]
    fn accepts_matching_token() {
        let payload = verifier().verify_and_parse(Some(&data("kofi-secret"))).unwrap();
        assert_eq!(payload.email, "ada@example.com");
    }

    #[test]
    fn rejects_wrong_token() {
        let result = verifier().verify_and_parse(Some(&data("kofi-secreT")));
        assert_eq!(result.unwrap_err(), MembershipError::InvalidVerificationToken);
    }

    #[test]
    fn rejects_token_prefix() {
        let result = verifier().verify_and_parse(Some(&data("kofi")));
        assert_eq!(result.unwrap_err(), MembershipError::InvalidVerificationToken);
    }

    #[test]
    fn missing_data_is_reported() {
        assert_eq!(
            verifier().verify_and_parse(None).unwrap_err(),
            MembershipError::MissingPayload
        );
        assert_eq!(
            verifier().verify_and_parse(Some("")).unwrap_err(),
            MembershipError::MissingPayload
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = verifier().verify_and_parse(Some("{not json"));
        assert!(matches!(result, Err(MembershipError::MalformedPayload(_))));
    }

    #[test]
    fn compare_handles_lengths() {
        assert!(constant_time_compare(b"abc", b"abc"));
        assert!(!constant_time_compare(b"abc", b"abcd"));
        assert!(!constant_time_compare(b"", b"a"));
    }
}
