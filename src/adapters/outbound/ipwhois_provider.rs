//! ipwho.is Provider Adapter
//!
//! Queries the ipwho.is JSON API. Lookup failures come back as HTTP 200
//! with `"success": false`.
//!
//! See: https://ipwhois.io/documentation

use crate::domain::entities::{AttemptError, AttemptResult, GeoRecord};
use crate::domain::ports::GeoProvider;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

#[derive(Debug, Deserialize)]
struct IpwhoisResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    connection: Option<IpwhoisConnection>,
}

#[derive(Debug, Deserialize)]
struct IpwhoisConnection {
    asn: Option<u32>,
    isp: Option<String>,
}

/// Adapter for the ipwho.is geolocation API.
pub struct IpwhoisProvider {
    client: reqwest::Client,
    base_url: String,
}

impl IpwhoisProvider {
    pub const NAME: &'static str = "ipwhois";

    /// Create an adapter against the given base URL.
    ///
    /// Production uses `https://ipwho.is`; tests point this at a mock
    /// server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, ip: IpAddr) -> Result<AttemptResult, AttemptError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), ip);

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

        let body: IpwhoisResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::Data(e.to_string()))?;

        if !body.success {
            tracing::debug!(
                message = body.message.as_deref().unwrap_or("unknown"),
                "ipwho.is had no data"
            );
            return Ok(AttemptResult::Empty);
        }

        let mut record = GeoRecord {
            country: body.country,
            region: body.region,
            city: body.city,
            postal: body.postal,
            coords: match (body.latitude, body.longitude) {
                (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                _ => None,
            },
            ..Default::default()
        };
        if let Some(connection) = body.connection {
            if let Some(isp) = connection.isp {
                record.extra.insert("isp".to_string(), isp);
            }
            if let Some(asn) = connection.asn {
                record.extra.insert("asn".to_string(), format!("AS{}", asn));
            }
        }

        if record.is_empty() {
            return Ok(AttemptResult::Empty);
        }
        Ok(AttemptResult::Success(record))
    }
}

#[async_trait]
impl GeoProvider for IpwhoisProvider {
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
