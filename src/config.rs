//! Configuration
//!
//! Providers are configuration, not code paths: the set of specs, their
//! trust ranks and their timeouts are all decided here, before any
//! resolution call. The resolver itself never discovers providers
//! dynamically.

use crate::domain::entities::ProviderSpec;
use crate::domain::value_objects::AccuracyRank;
use std::time::Duration;

/// Static trust table: provider name, default rank, default endpoint.
///
/// Order is significant - it is the default declaration order, and the
/// declaration order breaks rank ties. Higher rank = more trusted.
const TRUST_TABLE: &[(&str, u8, &str)] = &[
    ("ipapi", 3, "https://ipapi.co"),
    ("ipapicom", 2, "http://ip-api.com"),
    ("ipwhois", 1, "https://ipwho.is"),
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Providers in declaration order (tie-break order)
    pub providers: Vec<ProviderSpec>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: TRUST_TABLE
                .iter()
                .map(|(name, rank, endpoint)| {
                    ProviderSpec::new(
                        *name,
                        *endpoint,
                        AccuracyRank(*rank),
                        Duration::from_millis(5000),
                    )
                })
                .collect(),
            debug: false,
        }
    }
}

/// Look up a provider's default rank in the trust table.
pub fn default_rank(name: &str) -> Option<AccuracyRank> {
    TRUST_TABLE
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, rank, _)| AccuracyRank(*rank))
}

/// Look up a provider's default endpoint in the trust table.
pub fn default_endpoint(name: &str) -> Option<&'static str> {
    TRUST_TABLE
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, _, endpoint)| *endpoint)
}

/// Load configuration from the environment.
///
/// * `IPSCOUT_PROVIDERS` - comma-separated provider names in declaration
///   order (default: `ipapi,ipapicom,ipwhois`)
/// * `IPSCOUT_TIMEOUT_MS` - per-attempt timeout (default: 5000)
/// * `IPSCOUT_<NAME>_URL` - endpoint override for one provider
/// * `IPSCOUT_<NAME>_RANK` - rank override for one provider
/// * `DEBUG` - enable debug logging
///
/// Naming an unknown provider is a deployment defect and fails loading.
pub fn load_config() -> anyhow::Result<Config> {
    let provider_names: Vec<String> = std::env::var("IPSCOUT_PROVIDERS")
        .unwrap_or_else(|_| "ipapi,ipapicom,ipwhois".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let timeout_ms: u64 = std::env::var("IPSCOUT_TIMEOUT_MS")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    let debug = std::env::var("DEBUG").is_ok();

    let mut providers = Vec::with_capacity(provider_names.len());
    for name in &provider_names {
        let upper = name.to_uppercase();

        let endpoint = match std::env::var(format!("IPSCOUT_{}_URL", upper)) {
            Ok(url) => url,
            Err(_) => match default_endpoint(name) {
                Some(url) => url.to_string(),
                None => anyhow::bail!("unknown provider '{}' in IPSCOUT_PROVIDERS", name),
            },
        };

        let rank = std::env::var(format!("IPSCOUT_{}_RANK", upper))
            .ok()
            .and_then(|v| v.parse().ok())
            .map(AccuracyRank)
            .or_else(|| default_rank(name))
            .unwrap_or(AccuracyRank(0));

        providers.push(ProviderSpec::new(
            name.clone(),
            endpoint,
            rank,
            Duration::from_millis(timeout_ms),
        ));
    }

    Ok(Config { providers, debug })
}
