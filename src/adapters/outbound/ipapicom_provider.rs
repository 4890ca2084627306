//! ip-api.com Provider Adapter
//!
//! Queries the ip-api.com JSON API. Unlike ipapi.co, this API signals
//! lookup failures through a `"status": "fail"` field while always
//! returning HTTP 200.
//!
//! See: https://ip-api.com/docs/api:json

use crate::domain::entities::{AttemptError, AttemptResult, GeoRecord};
use crate::domain::ports::GeoProvider;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

#[derive(Debug, Deserialize)]
struct IpApiComResponse {
    status: String,
    message: Option<String>,
    country: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    isp: Option<String>,
    #[serde(rename = "as")]
    asn: Option<String>,
}

/// Adapter for the ip-api.com geolocation API.
pub struct IpApiComProvider {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiComProvider {
    pub const NAME: &'static str = "ipapicom";

    /// Create an adapter against the given base URL.
    ///
    /// Production uses `http://ip-api.com`; tests point this at a mock
    /// server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, ip: IpAddr) -> Result<AttemptResult, AttemptError> {
        let url = format!("{}/json/{}", self.base_url.trim_end_matches('/'), ip);

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

        let body: IpApiComResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::Data(e.to_string()))?;

        if body.status != "success" {
            tracing::debug!(
                message = body.message.as_deref().unwrap_or("unknown"),
                "ip-api.com had no data"
            );
            return Ok(AttemptResult::Empty);
        }

        let mut record = GeoRecord {
            country: body.country,
            region: body.region_name,
            city: body.city,
            postal: body.zip,
            coords: match (body.lat, body.lon) {
                (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                _ => None,
            },
            ..Default::default()
        };
        if let Some(isp) = body.isp {
            record.extra.insert("isp".to_string(), isp);
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
impl GeoProvider for IpApiComProvider {
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
