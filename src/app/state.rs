//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionRegistry;
use crate::strategy::Strategy;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub strategy: Arc<Strategy>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        // Stateless, shared by every session
        let strategy = Arc::new(Strategy::new(config.strategy.clone()));

        Self {
            config: Arc::new(config),
            strategy,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
