//! ipscout - Multi-provider IP geolocation resolver
//!
//! This is the composition root that wires together all the components.

mod adapters;
mod application;
mod config;
mod domain;

use crate::adapters::outbound::{IpApiComProvider, IpapiProvider, IpwhoisProvider};
use crate::application::{ProviderEntry, ResolverService};
use crate::config::load_config;
use crate::domain::entities::{ProviderSpec, ResolutionOutcome};
use crate::domain::ports::GeoProvider;
use std::net::IpAddr;
use std::sync::Arc;

/// Build the adapter for one configured spec.
fn build_adapter(spec: &ProviderSpec) -> anyhow::Result<Arc<dyn GeoProvider>> {
    let adapter: Arc<dyn GeoProvider> = match spec.name.as_str() {
        IpapiProvider::NAME => Arc::new(IpapiProvider::new(spec.endpoint.clone())),
        IpApiComProvider::NAME => Arc::new(IpApiComProvider::new(spec.endpoint.clone())),
        IpwhoisProvider::NAME => Arc::new(IpwhoisProvider::new(spec.endpoint.clone())),
        other => anyhow::bail!("no adapter for provider '{}'", other),
    };
    Ok(adapter)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    let ip: IpAddr = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: ipscout <ip-address>"))?
        .parse()?;

    // ===== COMPOSITION ROOT =====
    // Wire configured specs to their adapters and hand them to the service

    let mut entries = Vec::with_capacity(cfg.providers.len());
    for spec in &cfg.providers {
        let adapter = build_adapter(spec)?;
        tracing::debug!(provider = %spec.name, endpoint = %spec.endpoint, rank = %spec.rank, "provider configured");
        entries.push(ProviderEntry::new(spec.clone(), adapter));
    }

    let service = ResolverService::new(entries);

    tracing::info!(
        %ip,
        providers = service.provider_count(),
        "starting ipscout resolution"
    );

    match service.resolve(ip).await? {
        ResolutionOutcome::Resolved { record, rank } => {
            tracing::info!(rank = %rank, "location resolved");
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ResolutionOutcome::Unresolved => {
            tracing::warn!("no provider could resolve the address");
            println!("{{}}");
        }
    }

    Ok(())
}
