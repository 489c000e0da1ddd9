//! Supabase Auth adapter for magic-link login.
//!
//! Implements the `AuthProvider` port against the GoTrue endpoints exposed
//! by a Supabase project:
//!
//! - `POST /auth/v1/otp` sends the magic link
//! - `GET /auth/v1/user` introspects an access token
//!
//! Both calls authenticate with the project's public anon key.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, EmailAddress, UserId};
use crate::ports::AuthProvider;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpOptions<'a> {
    email_redirect_to: &'a str,
}

#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    options: OtpOptions<'a>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
}

/// Supabase-backed [`AuthProvider`].
pub struct SupabaseAuthProvider {
    client: Client,
    base_url: String,
    anon_key: SecretString,
}

impl SupabaseAuthProvider {
    /// Creates the adapter on a shared HTTP client.
    pub fn new(client: Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn otp_url(&self) -> String {
        format!("{}/auth/v1/otp", self.base_url)
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn send_magic_link(
        &self,
        email: &EmailAddress,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        let body = OtpRequest {
            email: email.as_str(),
            options: OtpOptions {
                email_redirect_to: redirect_to,
            },
        };

        let response = self
            .client
            .post(self.otp_url())
            .header("apikey", self.anon_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %error_body, "Supabase OTP request failed");
        Err(AuthError::MagicLinkRejected(format!("{}: {}", status, error_body)))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .client
            .get(self.user_url())
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST => {
                return Err(AuthError::InvalidToken)
            }
            status => {
                return Err(AuthError::service_unavailable(format!(
                    "Unexpected status {}",
                    status
                )))
            }
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("Invalid user response: {}", e)))?;

        // A user without an email cannot be matched to a member row.
        let email = user
            .email
            .as_deref()
            .and_then(|e| EmailAddress::parse(e).ok())
            .ok_or(AuthError::InvalidToken)?;
        let id = UserId::new(user.id).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(id, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> SupabaseAuthProvider {
        let config = SupabaseConfig {
            url: format!("{}/", server.uri()),
            anon_key: SecretString::new("anon-key".to_string()),
            service_role_key: SecretString::new("service-key".to_string()),
        };
        SupabaseAuthProvider::new(Client::new(), &config)
    }

    fn email() -> EmailAddress {
        EmailAddress::parse("ada@example.com").unwrap()
    }

    #[tokio::test]
    async fn send_magic_link_posts_otp_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/otp"))
            .and(header("apikey", "anon-key"))
            .and(body_json(serde_json::json!({
                "email": "ada@example.com",
                "options": {"emailRedirectTo": "https://api.example/auth/callback"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        provider(&server)
            .send_magic_link(&email(), "https://api.example/auth/callback")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn send_magic_link_reports_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/otp"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let result = provider(&server)
            .send_magic_link(&email(), "https://api.example/auth/callback")
            .await;

        assert!(matches!(result, Err(AuthError::MagicLinkRejected(msg)) if msg.contains("rate limited")));
    }

    #[tokio::test]
    async fn get_user_resolves_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", "Bearer good-token"))
            .and(header("apikey", "anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "8d0f-user",
                "email": "Ada@Example.com",
                "aud": "authenticated"
            })))
            .mount(&server)
            .await;

        let user = provider(&server).get_user("good-token").await.unwrap();
        assert_eq!(user.id.as_str(), "8d0f-user");
        assert_eq!(user.email, email());
    }

    #[tokio::test]
    async fn get_user_rejects_unknown_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "msg": "invalid JWT"
            })))
            .mount(&server)
            .await;

        let result = provider(&server).get_user("bad-token").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn get_user_reports_outage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = provider(&server).get_user("token").await;
        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn get_user_without_email_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "phone-user"})),
            )
            .mount(&server)
            .await;

        let result = provider(&server).get_user("token").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }
}
