//! Supabase configuration (auth provider + members table)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use super::site::validate_url;

/// Supabase project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub url: String,

    /// Public anon key, used for the auth endpoints
    pub anon_key: SecretString,

    /// Service role key, used for the members table
    pub service_role_key: SecretString,
}

impl SupabaseConfig {
    /// Validate Supabase configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        validate_url(&self.url, "SUPABASE_URL", environment)?;
        if self.anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_ANON_KEY"));
        }
        if self.service_role_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_SERVICE_ROLE_KEY"));
        }
        Ok(())
    }
}
