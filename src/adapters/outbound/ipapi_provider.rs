//! ipapi.co Provider Adapter
//!
//! Queries the ipapi.co JSON API and normalizes its response into the
//! common record shape. This is the same endpoint the highest-trust lookup
//! has always used.
//!
//! See: https://ipapi.co/api/

use crate::domain::entities::{AttemptError, AttemptResult, GeoRecord};
use crate::domain::ports::GeoProvider;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

/// Response from ipapi.co.
///
/// Failures (rate limits, reserved addresses) come back as a well-formed
/// body with `"error": true`, not as an HTTP error status.
#[derive(Debug, Deserialize)]
struct IpapiResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    country_name: Option<String>,
    region: Option<String>,
    city: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    org: Option<String>,
    asn: Option<String>,
}

/// Adapter for the ipapi.co geolocation API.
pub struct IpapiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl IpapiProvider {
    pub const NAME: &'static str = "ipapi";

    /// Create an adapter against the given base URL.
    ///
    /// Production uses `https://ipapi.co`; tests point this at a mock
    /// server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, ip: IpAddr) -> Result<AttemptResult, AttemptError> {
        let url = format!("{}/{}/json/", self.base_url.trim_end_matches('/'), ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AttemptError::Transport(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: IpapiResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::Data(e.to_string()))?;

        if body.error {
            tracing::debug!(
                reason = body.reason.as_deref().unwrap_or("unknown"),
                "ipapi.co had no data"
            );
            return Ok(AttemptResult::Empty);
        }

        let mut record = GeoRecord {
            country: body.country_name,
            region: body.region,
            city: body.city,
            postal: body.postal,
            coords: match (body.latitude, body.longitude) {
                (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                _ => None,
            },
            ..Default::default()
        };
        if let Some(org) = body.org {
            record.extra.insert("isp".to_string(), org);
        }
        if let Some(asn) = body.asn {
            record.extra.insert("asn".to_string(), asn);
        }

        if record.is_empty() {
            return Ok(AttemptResult::Empty);
        }
        Ok(AttemptResult::Success(record))
    }
}

#[async_trait]
impl GeoProvider for IpapiProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn attempt(&self, ip: IpAddr) -> AttemptResult {
        match self.fetch(ip).await {
            Ok(result) => result,
            Err(err) => AttemptResult::Failed(err),
        }
    }
}
