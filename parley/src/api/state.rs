use std::sync::Arc;

use crate::config::Config;
use crate::relay::ChatRelay;

/// Shared request state: the immutable configuration plus the relay chosen at
/// startup. Both are read-only, so handlers need no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(config: Config, relay: ChatRelay) -> Self {
        Self {
            config: Arc::new(config),
            relay,
        }
    }
}
