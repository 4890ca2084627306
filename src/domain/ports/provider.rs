//! Geolocation Provider Port
//!
//! Defines the interface every external provider adapter implements.

use crate::domain::entities::AttemptResult;
use async_trait::async_trait;
use std::net::IpAddr;

/// A single external geolocation source.
///
/// This is an outbound port. Implementations wrap one provider's HTTP API
/// and normalize its response into the common record shape.
///
/// The contract is infallible by design: network failures, malformed bodies
/// and missing fields must all be absorbed into the returned
/// [`AttemptResult`], never raised. A response that parses cleanly but
/// carries no location data yields `AttemptResult::Empty`.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Short identifier used in logs, matching the configured spec name.
    fn name(&self) -> &str;

    /// Query this provider for the given address.
    async fn attempt(&self, ip: IpAddr) -> AttemptResult;
}
