//! Ko-fi webhook configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Ko-fi configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KofiConfig {
    /// Verification token Ko-fi includes in every webhook payload
    pub verification_token: SecretString,

    /// Public page where visitors can become members
    #[serde(default = "default_tiers_url")]
    pub tiers_url: String,
}

impl KofiConfig {
    /// Validate Ko-fi configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.verification_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("KOFI_VERIFICATION_TOKEN"));
        }
        if !self.tiers_url.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("KOFI_TIERS_URL"));
        }
        Ok(())
    }
}

fn default_tiers_url() -> String {
    "https://ko-fi.com/tigresstamm/tiers".to_string()
}
