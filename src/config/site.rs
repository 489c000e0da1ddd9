//! Public site configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Configuration describing where the site and this API live, plus the
/// secrets used for cookies and the blog admin routes.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public website origin, e.g. `https://tamm.in`.
    ///
    /// Used for CORS, login redirects and frame-ancestor headers.
    pub site_url: String,

    /// Public origin of this API, e.g. `https://api.tamm.in`.
    ///
    /// Magic links are sent back to `<api_url>/auth/callback`.
    pub api_url: String,

    /// Key for signing the post-login redirect cookie.
    pub cookie_secret: SecretString,

    /// Bearer token guarding the blog admin routes. Admin routes reject
    /// every request when unset.
    #[serde(default)]
    pub admin_token: Option<SecretString>,

    /// Maximum number of posts returned by the public listing.
    #[serde(default = "default_posts_page_size")]
    pub posts_page_size: u32,
}

impl SiteConfig {
    /// Site origin without a trailing slash.
    pub fn site_origin(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// API origin without a trailing slash.
    pub fn api_origin(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Validate site configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        validate_url(&self.site_url, "SITE_URL", environment)?;
        validate_url(&self.api_url, "API_URL", environment)?;

        if self.cookie_secret.expose_secret().len() < 32 {
            return Err(ValidationError::CookieSecretTooShort);
        }
        if self.posts_page_size == 0 || self.posts_page_size > 100 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

/// Shared URL check for the site and Supabase sections.
pub(crate) fn validate_url(
    url: &str,
    name: &'static str,
    environment: &Environment,
) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if *environment == Environment::Production && !url.starts_with("https://") {
        return Err(ValidationError::MustBeHttps(name));
    }
    Ok(())
}

fn default_posts_page_size() -> u32 {
    20
}
