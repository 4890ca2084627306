//! Fan-Out Dispatcher
//!
//! Issues one attempt per configured provider, all concurrently, each cut
//! off by its own timeout. Completion is the join of every attempt, so the
//! batch latency is bounded by the slowest timeout, not the sum.

use crate::application::resolver_service::ProviderEntry;
use crate::domain::entities::{AttemptError, AttemptResult, ProviderSpec};
use std::net::IpAddr;
use std::time::Instant;

/// Concurrent dispatcher over the configured provider set.
pub struct FanOutDispatcher;

impl FanOutDispatcher {
    /// Query every provider for `ip` and collect one result per provider.
    ///
    /// Results come back in declaration order regardless of completion
    /// order, which is what the selector's tie-break relies on. Each
    /// attempt runs on its own task under its own `ProviderSpec::timeout`;
    /// an attempt that overruns is recorded as `Failed(Timeout)` without
    /// affecting its siblings. A panicking adapter degrades to
    /// `Failed(Transport)` instead of aborting the batch.
    pub async fn dispatch_all(
        providers: &[ProviderEntry],
        ip: IpAddr,
    ) -> Vec<(ProviderSpec, AttemptResult)> {
        let mut handles = Vec::with_capacity(providers.len());

        for entry in providers {
            let adapter = entry.adapter.clone();
            let spec = entry.spec.clone();

            let handle = tokio::spawn(async move {
                let started = Instant::now();
                let result = match tokio::time::timeout(spec.timeout, adapter.attempt(ip)).await {
                    Ok(result) => result,
                    Err(_) => AttemptResult::Failed(AttemptError::Timeout),
                };

                match &result {
                    AttemptResult::Success(_) => tracing::debug!(
                        provider = %spec.name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "attempt succeeded"
                    ),
                    AttemptResult::Empty => tracing::debug!(
                        provider = %spec.name,
                        "attempt returned no data"
                    ),
                    AttemptResult::Failed(err) => tracing::debug!(
                        provider = %spec.name,
                        error = %err,
                        "attempt failed"
                    ),
                }

                result
            });

            handles.push((entry.spec.clone(), handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (spec, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => {
                    tracing::warn!(provider = %spec.name, "attempt task aborted: {}", join_err);
                    AttemptResult::Failed(AttemptError::Transport(format!(
                        "attempt task aborted: {}",
                        join_err
                    )))
                }
            };
            results.push((spec, result));
        }

        results
    }
}
