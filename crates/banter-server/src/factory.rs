//! Wiring: build the store, responder, and idle monitor from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use banter_core::config::BotConfig;
use banter_core::error::BanterResult;
use banter_core::monitor::{ActivityClock, IdleMonitor};
use banter_core::responder::Responder;
use banter_core::traits::Transport;
use banter_quotes::{load_quotes, seed_store, TantivyQuoteStore};

use crate::state::AppState;
use crate::transport::{NullTransport, WebhookTransport};

/// Build the full bot from configuration.
///
/// Opens (or creates) the quote index, seeds it from the quote file when one
/// is configured, validates that the reply pools are non-empty, and wires
/// the responder, activity clock, and idle monitor together. Pool
/// validation failing here is the startup-time form of the fatal empty-pool
/// error; better now than mid-conversation.
pub async fn build_bot(config: BotConfig) -> BanterResult<(AppState, IdleMonitor)> {
    let store = Arc::new(TantivyQuoteStore::open(&config.index_path)?);
    info!(path = %config.index_path.display(), quotes = store.num_quotes(), "quote index opened");

    if let Some(path) = &config.quotes_path {
        let quotes = load_quotes(path)?;
        seed_store(&store, &quotes)?;
    }

    let responder = Arc::new(Responder::new(store.clone(), &config));
    responder.validate_pools().await?;

    let transport: Arc<dyn Transport> = match &config.webhook_url {
        Some(url) => Arc::new(WebhookTransport::new(url.clone())),
        None => {
            warn!("no webhook URL configured; unprompted messages will be dropped");
            Arc::new(NullTransport)
        }
    };

    let clock = Arc::new(ActivityClock::new());
    let monitor = IdleMonitor::new(store.clone(), transport, clock.clone(), &config).await?;

    let state = AppState::new(responder, store, clock, config);
    Ok((state, monitor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use banter_core::error::BanterError;
    use banter_core::types::QuoteCategory;

    const QUOTE_FILE: &str = r#"[
        {"text": "Even broken clocks are right twice a day.", "category": "general"},
        {"text": "Huh?", "category": "confused"},
        {"text": "Give it a rest.", "category": "annoyed"},
        {"text": "Anyone home?", "category": "bored"}
    ]"#;

    fn config_with_quotes(quote_json: &str) -> (BotConfig, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let quotes_path = dir.path().join("quotes.json");
        let mut file = std::fs::File::create(&quotes_path).unwrap();
        file.write_all(quote_json.as_bytes()).unwrap();

        let config = BotConfig::builder()
            .index_path(dir.path().join("index"))
            .quotes_path(quotes_path)
            .build();
        (config, dir)
    }

    #[tokio::test]
    async fn test_build_bot_seeds_and_validates() {
        let (config, _dir) = config_with_quotes(QUOTE_FILE);
        let (state, _monitor) = build_bot(config).await.unwrap();
        assert_eq!(state.store.num_quotes(), 4);
    }

    #[tokio::test]
    async fn test_build_bot_rejects_missing_pool() {
        // No bored quotes: startup must fail, not limp along.
        let (config, _dir) = config_with_quotes(
            r#"[
                {"text": "Huh?", "category": "confused"},
                {"text": "Give it a rest.", "category": "annoyed"}
            ]"#,
        );
        let err = build_bot(config).await.unwrap_err();
        assert!(matches!(
            err,
            BanterError::EmptyPool {
                category: QuoteCategory::Bored
            }
        ));
    }
}
