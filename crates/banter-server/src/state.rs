//! Server state management.

use std::sync::Arc;

use banter_core::config::BotConfig;
use banter_core::monitor::ActivityClock;
use banter_core::responder::Responder;
use banter_quotes::TantivyQuoteStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The wired reply pipeline.
    pub responder: Arc<Responder<TantivyQuoteStore>>,
    /// Direct store handle for the admin surface and health reporting.
    pub store: Arc<TantivyQuoteStore>,
    /// Bot-wide last-activity clock, shared with the idle monitor.
    pub clock: Arc<ActivityClock>,
    /// Bot configuration.
    pub config: Arc<BotConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state from wired components.
    pub fn new(
        responder: Arc<Responder<TantivyQuoteStore>>,
        store: Arc<TantivyQuoteStore>,
        clock: Arc<ActivityClock>,
        config: BotConfig,
    ) -> Self {
        Self {
            responder,
            store,
            clock,
            config: Arc::new(config),
        }
    }
}
