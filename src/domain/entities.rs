//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the ipscout domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::{AccuracyRank, Coordinates};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Description of one configured external provider.
///
/// Specs are built once at configuration time and never mutated. Their
/// position in the configured list is significant: when two providers carry
/// the same rank, the earlier-declared one wins.
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    /// Short identifier for logs and rank overrides (e.g. "ipapi")
    pub name: String,
    /// Base URL the adapter queries
    pub endpoint: String,
    /// Relative trust weight (higher = more trusted)
    pub rank: AccuracyRank,
    /// Per-attempt timeout; one slow provider never delays the others
    pub timeout: Duration,
}

impl ProviderSpec {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        rank: AccuracyRank,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            rank,
            timeout,
        }
    }
}

/// Provider-agnostic location record.
///
/// Every field is optional: providers differ in what they report, and a
/// record always comes from exactly one provider - fields from different
/// providers are never blended into one record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoRecord {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal: Option<String>,
    pub coords: Option<Coordinates>,
    /// Provider metadata that has no dedicated field (ISP, ASN, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl GeoRecord {
    /// True when the provider reported nothing usable at all.
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.region.is_none()
            && self.city.is_none()
            && self.postal.is_none()
            && self.coords.is_none()
            && self.extra.is_empty()
    }
}

/// Why a provider attempt failed.
///
/// These never propagate as errors to the caller; they only tag the attempt
/// so the selector (and the logs) can tell failure modes apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error("provider timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Data(String),
}

/// Outcome of a single provider attempt.
///
/// `Empty` is distinct from `Failed`: a provider that answered cleanly but
/// had no data for the address has "no opinion", it did not error.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    /// The provider returned a usable record
    Success(GeoRecord),
    /// The call succeeded but the provider had no data for this address
    Empty,
    /// The call failed (timeout, transport, or unparseable body)
    Failed(AttemptError),
}

impl AttemptResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptResult::Success(_))
    }
}

/// The single result of one resolution request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// At least one provider succeeded; this is the highest-ranked record
    Resolved {
        record: GeoRecord,
        rank: AccuracyRank,
    },
    /// Every provider failed or had no data
    Unresolved,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }
}
