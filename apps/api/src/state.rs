use std::sync::Arc;

use crate::config::Config;
use crate::matching::dispatch::MatchDispatcher;
use crate::matching::store::MatchStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable persistence. Default: PgMatchStore.
    pub store: Arc<dyn MatchStore>,
    /// Queue for background matching runs.
    pub dispatcher: MatchDispatcher,
}
