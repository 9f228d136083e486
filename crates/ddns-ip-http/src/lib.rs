// # HTTP IP Source
//
// This crate provides the external address lookup: an `IpSource` that asks
// an echo service which address this host connects from.
//
// ## Architecture
//
// One plain-text endpoint per IP version (`https://v4.ident.me`,
// `https://v6.ident.me` by default). The v4 endpoint only listens on IPv4
// and the v6 endpoint only on IPv6, so the connection itself picks the
// family. There is no fallback service and no caching.

use ddns_core::traits::IpSource;
use ddns_core::types::IpVersion;
use ddns_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Default IPv4 echo endpoint
pub const DEFAULT_V4_URL: &str = "https://v4.ident.me";

/// Default IPv6 echo endpoint
pub const DEFAULT_V6_URL: &str = "https://v6.ident.me";

/// Default HTTP timeout for echo requests (10 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based external IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// Endpoint queried for IPv4
    v4_url: String,

    /// Endpoint queried for IPv6
    v6_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source over the default endpoints with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::external_lookup(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            v4_url: DEFAULT_V4_URL.to_string(),
            v6_url: DEFAULT_V6_URL.to_string(),
            client,
        })
    }

    /// Replace the echo endpoints
    pub fn with_endpoints(mut self, v4_url: impl Into<String>, v6_url: impl Into<String>) -> Self {
        self.v4_url = v4_url.into();
        self.v6_url = v6_url.into();
        self
    }

    fn url(&self, version: IpVersion) -> &str {
        match version {
            IpVersion::V4 => &self.v4_url,
            IpVersion::V6 => &self.v6_url,
        }
    }
}

/// Parse an echo response body as an address of `version`
fn parse_address(body: &str, version: IpVersion) -> Result<IpAddr> {
    let text = body.trim();

    let ip: IpAddr = text
        .parse()
        .map_err(|_| Error::external_lookup(format!("Invalid IP address: {:?}", text)))?;

    if !version.matches(&ip) {
        return Err(Error::external_lookup(format!(
            "Expected {}, got: {}",
            version, ip
        )));
    }

    Ok(ip)
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self, version: IpVersion) -> Result<IpAddr> {
        let url = self.url(version);
        tracing::debug!("Fetching external {} address from {}", version, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::external_lookup(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::external_lookup(format!(
                "HTTP error from {}: {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::external_lookup(format!("Failed to read response: {}", e)))?;

        parse_address(&body, version)
    }
}
