use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::token::SessionKeys;
use crate::config::Config;
use crate::store::MarketplaceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Postgres in production, in-memory for demos and tests.
    pub store: Arc<dyn MarketplaceStore>,
    pub sessions: SessionKeys,
    pub config: Config,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
