use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::models::GeoLookup;

// ipapi.co (free tier, no key, rate limited per address)
pub const DEFAULT_GEO_API_URL: &str = "https://ipapi.co";

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Geolocation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Geolocation API error: {0}")]
    Status(u16),

    #[error("Geolocation provider refused lookup: {0}")]
    Provider(String),

    #[error("Failed to parse geolocation response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Looks up `ip`. An empty address asks the provider to use the address
    /// the request came from.
    async fn locate(&self, ip: &str) -> Result<GeoLookup, GeoError>;
}

pub struct HttpGeoLocator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeoLocator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, ip: &str) -> String {
        if ip.is_empty() {
            format!("{}/json/", self.base_url)
        } else {
            format!("{}/{}/json/", self.base_url, urlencoding::encode(ip))
        }
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn locate(&self, ip: &str) -> Result<GeoLookup, GeoError> {
        let url = self.lookup_url(ip);
        log::info!("🌍 Fetching location: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", concat!("portfolio-server/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        parse_lookup(body)
    }
}

/// The provider reports failures as `{"error": true, "reason": "..."}` even
/// on some 200 responses.
fn parse_lookup(body: serde_json::Value) -> Result<GeoLookup, GeoError> {
    if body.get("error").and_then(|v| v.as_bool()).unwrap_or(false) {
        let reason = body
            .get("reason")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown reason")
            .to_string();
        return Err(GeoError::Provider(reason));
    }

    Ok(serde_json::from_value(body)?)
}
