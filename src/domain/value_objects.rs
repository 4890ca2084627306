//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative trust weight of a provider.
///
/// Ranks are static configuration: when several providers succeed for the
/// same lookup, the record from the highest-ranked provider wins. The scale
/// is open-ended; only the ordering matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccuracyRank(pub u8);

impl AccuracyRank {
    pub fn new(rank: u8) -> Self {
        Self(rank)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for AccuracyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair as reported by a single provider.
///
/// Coordinates are never mixed across providers - a record carries either
/// one provider's pair or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}
