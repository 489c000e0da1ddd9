//! Post-login redirect handling.
//!
//! The login form may ask to return the reader to a page once the magic link
//! is followed. The path is carried across the email round trip in a
//! short-lived cookie signed with HMAC-SHA256, and only site-relative paths
//! are ever accepted.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use super::errors::MembershipError;

type HmacSha256 = Hmac<Sha256>;

const MAX_REDIRECT_LEN: usize = 512;

/// A site-relative path safe to append to the site URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPath(String);

impl RedirectPath {
    /// Accepts `/`-rooted paths only. Protocol-relative (`//host`) and
    /// backslash forms are refused since browsers treat both as off-site.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.len() > MAX_REDIRECT_LEN {
            return None;
        }
        if !raw.starts_with('/') || raw.starts_with("//") {
            return None;
        }
        if raw.contains('\\') || raw.chars().any(char::is_control) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Signs and verifies redirect cookie values.
///
/// Cookie format: `<url-encoded path>.<hex HMAC-SHA256 of the encoded path>`.
#[derive(Clone)]
pub struct RedirectSigner {
    secret: SecretString,
}

impl RedirectSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    pub fn sign(&self, path: &RedirectPath) -> Result<String, MembershipError> {
        let encoded = urlencoding::encode(path.as_str()).into_owned();
        let signature = hex::encode(self.mac(&encoded)?.finalize().into_bytes());
        Ok(format!("{}.{}", encoded, signature))
    }

    /// Returns the path when the value carries a valid signature.
    ///
    /// Any tampering, truncation or non-relative path yields `None`.
    pub fn verify(&self, value: &str) -> Option<RedirectPath> {
        let (encoded, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;
        self.mac(encoded).ok()?.verify_slice(&signature).ok()?;

        let decoded = urlencoding::decode(encoded).ok()?;
        RedirectPath::parse(&decoded)
    }

    fn mac(&self, message: &str) -> Result<HmacSha256, MembershipError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| MembershipError::infrastructure(format!("Redirect signing key: {}", e)))?;
        mac.update(message.as_bytes());
        Ok(mac)
    }
}

impl std::fmt::Debug for RedirectSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectSigner").finish_non_exhaustive()
    }
}
