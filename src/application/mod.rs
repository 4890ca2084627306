mod dispatch;
mod resolver_service;

pub use dispatch::FanOutDispatcher;
pub use resolver_service::{ProviderEntry, ResolveError, ResolverService};
