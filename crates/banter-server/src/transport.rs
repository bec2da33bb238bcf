//! Outbound transport implementations.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use banter_core::traits::Transport;

/// Fire-and-forget webhook delivery.
///
/// Posts `{"channel": target, "text": text}` to the configured URL. Failures
/// are logged and swallowed; nothing in the core inspects delivery results.
pub struct WebhookTransport {
    client: reqwest::Client,
    url: String,
}

impl WebhookTransport {
    /// Create a transport posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn send(&self, target: &str, text: &str) {
        let payload = json!({
            "channel": target,
            "text": text,
        });

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(target = %target, "webhook delivered");
            }
            Ok(response) => {
                warn!(
                    target = %target,
                    status = %response.status(),
                    "webhook rejected"
                );
            }
            Err(e) => {
                warn!(target = %target, error = %e, "webhook delivery failed");
            }
        }
    }
}

/// Transport that drops everything on the floor.
///
/// Used when no webhook URL is configured; outbound messages are logged so
/// a local run still shows what the bot would have said.
pub struct NullTransport;

#[async_trait]
impl Transport for NullTransport {
    async fn send(&self, target: &str, text: &str) {
        debug!(target = %target, text = %text, "transport unset, dropping message");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_transport_swallows() {
        // Nothing to assert beyond "does not panic or block".
        NullTransport.send("#general", "Anyone home?").await;
    }

    #[tokio::test]
    async fn test_webhook_failure_is_swallowed() {
        // Unroutable address: delivery fails, send still returns.
        let transport = WebhookTransport::new("http://127.0.0.1:1/hook");
        transport.send("#general", "Anyone home?").await;
    }
}
