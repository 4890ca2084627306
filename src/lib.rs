//! ipscout Library
//!
//! This module exposes the ipscout components for use in integration tests
//! and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{ProviderEntry, ResolveError, ResolverService};
pub use config::load_config;
pub use domain::entities::{
    AttemptError, AttemptResult, GeoRecord, ProviderSpec, ResolutionOutcome,
};
pub use domain::ports::GeoProvider;
pub use domain::services::ResolutionSelector;
pub use domain::value_objects::{AccuracyRank, Coordinates};
