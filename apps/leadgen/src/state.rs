use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::providers::ProviderFactory;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Builds the completion and lead-search clients for each run. Default: `HttpProviders`.
    pub providers: Arc<dyn ProviderFactory>,
}
