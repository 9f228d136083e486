// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare implementation of `ddns_core::DnsProvider`.
//
// - One HTTP request per trait call; no retry, no backoff, no caching
// - HTTP timeout configured (30 seconds by default)
// - Status codes mapped to specific errors (401/403, 429, 5xx)
// - Both A and AAAA records
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Provider fails fast if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...&type=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_core::traits::DnsProvider;
use ddns_core::types::{DnsRecord, RecordDraft, RecordType, Zone};
use ddns_core::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// TTL value Cloudflare treats as "automatic"
const AUTOMATIC_TTL: u32 = 1;

const PROVIDER: &str = "cloudflare";

/// Envelope shared by every Cloudflare API v4 response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    result: Option<T>,
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Body of a create call: the draft plus an automatic TTL
#[derive(Debug, Serialize)]
struct CreateRecordBody<'a> {
    #[serde(flatten)]
    draft: &'a RecordDraft,
    ttl: u32,
}

/// Cloudflare DNS provider
///
/// Stateless: every trait call is one request against the API, authenticated
/// with a bearer token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a provider with the default timeout
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the token is empty
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_token, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a provider whose requests time out after `timeout`
    pub fn with_timeout(api_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
        })
    }

    /// Point the provider at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one authenticated request and unwrap the API envelope
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        action: &str,
    ) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, &text, action));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            Error::provider(PROVIDER, format!("Failed to parse {} response: {}", action, e))
        })?;

        if !envelope.success {
            let errors: Vec<String> = envelope.errors.iter().map(ToString::to_string).collect();
            return Err(Error::provider(
                PROVIDER,
                format!("{} failed: {}", action, errors.join(", ")),
            ));
        }

        envelope.result.ok_or_else(|| {
            Error::provider(PROVIDER, format!("{} response has no result", action))
        })
    }
}

/// Map a non-success HTTP status to an error
fn status_error(status: StatusCode, body: &str, action: &str) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "Invalid API token or insufficient permissions. Status: {}",
            status
        )),
        429 => Error::rate_limited(format!(
            "Rate limit exceeded. Please retry later. Status: {}",
            status
        )),
        500..=599 => Error::provider(
            PROVIDER,
            format!("Cloudflare server error (transient): {} - {}", status, body),
        ),
        _ => Error::provider(PROVIDER, format!("{} failed: {} - {}", action, status, body)),
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn list_zones_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        tracing::debug!("Looking up zone: {}", name);

        let request = self.client.get(self.url("/zones")).query(&[("name", name)]);
        self.send(request, "Zone lookup").await
    }

    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Looking up record: {} (type: {})", name, record_type);

        let request = self
            .client
            .get(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .query(&[("name", name), ("type", record_type.as_str())]);

        let mut records: Vec<DnsRecord> = self.send(request, "Record lookup").await?;
        for record in &mut records {
            if record.zone_id.is_empty() {
                record.zone_id = zone_id.to_string();
            }
        }
        Ok(records)
    }

    async fn create_record(&self, zone_id: &str, draft: &RecordDraft) -> Result<DnsRecord> {
        tracing::debug!(
            "Creating record: {} {} -> {}",
            draft.name,
            draft.record_type,
            draft.content
        );

        let body = CreateRecordBody {
            draft,
            ttl: AUTOMATIC_TTL,
        };
        let request = self
            .client
            .post(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .json(&body);

        let mut record: DnsRecord = self.send(request, "Record create").await?;
        if record.zone_id.is_empty() {
            record.zone_id = zone_id.to_string();
        }

        tracing::info!("DNS record created: {} (id: {})", record.name, record.id);
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        draft: &RecordDraft,
    ) -> Result<DnsRecord> {
        tracing::debug!(
            "Updating record {}: {} {} -> {}",
            record_id,
            draft.name,
            draft.record_type,
            draft.content
        );

        // PATCH leaves ttl and proxied as they are
        let request = self
            .client
            .patch(self.url(&format!("/zones/{}/dns_records/{}", zone_id, record_id)))
            .json(draft);

        let mut record: DnsRecord = self.send(request, "Record update").await?;
        if record.zone_id.is_empty() {
            record.zone_id = zone_id.to_string();
        }

        tracing::info!("DNS record updated: {} -> {}", record.name, record.content);
        Ok(record)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
