//! Resolver Service - Main application use case
//!
//! The single public entry point for resolution: fan out to every
//! configured provider, then reduce the completed attempts to one outcome.

use crate::application::dispatch::FanOutDispatcher;
use crate::domain::entities::{ProviderSpec, ResolutionOutcome};
use crate::domain::ports::GeoProvider;
use crate::domain::services::ResolutionSelector;
use std::net::IpAddr;
use std::sync::Arc;

/// One configured provider: its immutable spec paired with the adapter
/// that talks to it.
#[derive(Clone)]
pub struct ProviderEntry {
    pub spec: ProviderSpec,
    pub adapter: Arc<dyn GeoProvider>,
}

impl ProviderEntry {
    pub fn new(spec: ProviderSpec, adapter: Arc<dyn GeoProvider>) -> Self {
        Self { spec, adapter }
    }
}

/// Errors the facade can surface to the caller.
///
/// Provider-level failures are absorbed into the attempt results and show
/// up only as an `Unresolved` outcome; the sole hard error is a
/// misconfiguration detected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no providers configured")]
    NoProvidersConfigured,
}

/// Resolver service - main application use case.
///
/// Holds the provider list (declaration order is tie-break order) and
/// composes the dispatcher and the selector:
/// 1. Fan out one concurrent attempt per provider
/// 2. Reduce the completed attempts to the highest-ranked success
/// 3. Return `Resolved` or `Unresolved`; never an error for provider
///    failures
pub struct ResolverService {
    providers: Vec<ProviderEntry>,
}

impl ResolverService {
    /// Create a new resolver service over the configured providers.
    pub fn new(providers: Vec<ProviderEntry>) -> Self {
        Self { providers }
    }

    /// Number of configured providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Resolve the location of an IP address.
    ///
    /// Fails fast with [`ResolveError::NoProvidersConfigured`] when the
    /// provider list is empty; every other failure mode degrades to
    /// `Unresolved`. If at least one provider succeeds the outcome is
    /// always `Resolved`, no matter how many siblings failed or timed out.
    pub async fn resolve(&self, ip: IpAddr) -> Result<ResolutionOutcome, ResolveError> {
        if self.providers.is_empty() {
            return Err(ResolveError::NoProvidersConfigured);
        }

        tracing::debug!(%ip, providers = self.providers.len(), "dispatching attempts");
        let attempts = FanOutDispatcher::dispatch_all(&self.providers, ip).await;

        let outcome = ResolutionSelector::select(attempts);
        match &outcome {
            ResolutionOutcome::Resolved { rank, record } => tracing::info!(
                %ip,
                rank = %rank,
                country = record.country.as_deref().unwrap_or("-"),
                city = record.city.as_deref().unwrap_or("-"),
                "resolved"
            ),
            ResolutionOutcome::Unresolved => tracing::info!(%ip, "unresolved"),
        }

        Ok(outcome)
    }
}
