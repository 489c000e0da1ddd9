//! Supabase PostgREST adapter for the members table.
//!
//! Uses the service role key, which bypasses row level security on
//! `members`. The key never leaves the server.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;
use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, Timestamp};
use crate::domain::membership::{ActiveMembership, MemberRecord, MemberTier};
use crate::ports::MemberStore;

/// Row shape for `POST /rest/v1/members`.
#[derive(Debug, Serialize)]
struct MemberRow<'a> {
    email: &'a str,
    ko_fi_transaction_id: Option<&'a str>,
    ko_fi_name: Option<&'a str>,
    tier: &'a str,
    expires_at: String,
}

impl<'a> From<&'a MemberRecord> for MemberRow<'a> {
    fn from(record: &'a MemberRecord) -> Self {
        Self {
            email: record.email.as_str(),
            ko_fi_transaction_id: record.ko_fi_transaction_id.as_deref(),
            ko_fi_name: record.ko_fi_name.as_deref(),
            tier: record.tier.as_str(),
            expires_at: record.expires_at.to_iso_string(),
        }
    }
}

/// Row shape for `select=email,tier,expires_at`.
#[derive(Debug, Deserialize)]
struct ActiveRow {
    email: String,
    tier: Option<String>,
    expires_at: String,
}

impl TryFrom<ActiveRow> for ActiveMembership {
    type Error = DomainError;

    fn try_from(row: ActiveRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::parse(&row.email)
            .map_err(|e| DomainError::new(ErrorCode::UpstreamError, e.to_string()))?;
        let expires_at = Timestamp::parse_rfc3339(&row.expires_at).ok_or_else(|| {
            DomainError::new(
                ErrorCode::UpstreamError,
                format!("Invalid expires_at: {}", row.expires_at),
            )
        })?;

        Ok(ActiveMembership {
            email,
            tier: MemberTier::from_optional(row.tier.as_deref()),
            expires_at,
        })
    }
}

/// Supabase-backed [`MemberStore`].
pub struct SupabaseMemberStore {
    client: Client,
    base_url: String,
    service_role_key: SecretString,
}

impl SupabaseMemberStore {
    pub fn new(client: Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key.clone(),
        }
    }

    fn members_url(&self) -> String {
        format!("{}/rest/v1/members", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.service_role_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }
}

async fn upstream_failure(response: reqwest::Response) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    DomainError::upstream(format!("Supabase returned {}: {}", status, body))
}

#[async_trait]
impl MemberStore for SupabaseMemberStore {
    async fn upsert(&self, record: &MemberRecord) -> Result<(), DomainError> {
        let response = self
            .authorized(self.client.post(self.members_url()))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&MemberRow::from(record))
            .send()
            .await
            .map_err(|e| DomainError::upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(upstream_failure(response).await);
        }
        Ok(())
    }

    async fn find_active(
        &self,
        email: &EmailAddress,
        now: Timestamp,
    ) -> Result<Option<ActiveMembership>, DomainError> {
        let response = self
            .authorized(self.client.get(self.members_url()))
            .query(&[
                ("email", format!("eq.{}", email.as_str())),
                ("expires_at", format!("gt.{}", now.to_iso_string())),
                ("select", "email,tier,expires_at".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(upstream_failure(response).await);
        }

        let rows: Vec<ActiveRow> = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Invalid members response: {}", e)))?;

        rows.into_iter().next().map(ActiveMembership::try_from).transpose()
    }
}
