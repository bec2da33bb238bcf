//! Outbound transport trait.

use async_trait::async_trait;

/// Fire-and-forget delivery of a message to a channel or target.
///
/// The core never inspects a result: implementations are expected to log
/// and swallow their own failures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `text` to `target`.
    async fn send(&self, target: &str, text: &str);
}
