//! Reply orchestration: the tiered retrieval chain behind every answer.

use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::error::{BanterError, BanterResult};
use crate::extract::extract;
use crate::history::HistoryStore;
use crate::traits::QuoteStore;
use crate::types::{QuoteCategory, RetrievalQuery};

/// Parse a channel message addressed to `handle`.
///
/// The bot answers messages of the form `<handle>: body`, `<handle>, body`,
/// or `<handle>> body`; anything else is channel chatter it stays out of.
/// Returns the message body when addressed.
pub fn addressed<'a>(handle: &str, message: &'a str) -> Option<&'a str> {
    if handle.is_empty() {
        return None;
    }
    let rest = message.strip_prefix(handle)?;
    let mut chars = rest.chars();
    if !matches!(chars.next()?, ':' | ',' | '>') {
        return None;
    }
    let after = chars.as_str();
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let body = after.trim_start();
    if body.is_empty() {
        return None;
    }
    Some(body)
}

/// The reply orchestrator.
///
/// Owns the per-sender history and drives the retrieval chain against the
/// quote store: burst deflection, importance extraction, scored query,
/// fuzzy query, confused fallback. Every reply is prefixed with the sender's
/// handle.
pub struct Responder<S> {
    store: Arc<S>,
    history: HistoryStore,
    min_score: f32,
}

impl<S: QuoteStore> Responder<S> {
    /// Create a responder over `store` with the configured history windows
    /// and relevance threshold.
    pub fn new(store: Arc<S>, config: &BotConfig) -> Self {
        Self {
            store,
            history: HistoryStore::new(config),
            min_score: config.min_score,
        }
    }

    /// Compute a reply to `text` from `sender`.
    pub async fn reply(&self, sender: &str, text: &str) -> BanterResult<String> {
        let mut rng = rand::rngs::StdRng::from_entropy();
        self.reply_with_rng(sender, text, &mut rng).await
    }

    /// Compute a reply using the provided RNG for all random picks.
    ///
    /// The message's own timestamp is recorded before the burst check, so a
    /// message always counts toward the burst it is part of.
    pub async fn reply_with_rng<R: Rng + Send>(
        &self,
        sender: &str,
        text: &str,
        rng: &mut R,
    ) -> BanterResult<String> {
        let now = Utc::now();
        self.history.record_interaction(sender, now);

        if !self.history.is_rate_ok(sender) {
            debug!(sender = %sender, "sender is bursting, deflecting");
            let quote = self.pool_pick(QuoteCategory::Annoyed, rng).await?;
            return Ok(format!("{}: {}", sender, quote));
        }

        let terms = extract(text);
        if terms.is_empty() {
            debug!(sender = %sender, "no salient terms extracted");
            let quote = self.pool_pick(QuoteCategory::Confused, rng).await?;
            return Ok(format!("{}: {}", sender, quote));
        }

        let support = self.history.context_words(sender, now);
        let query = RetrievalQuery::new(terms.clone()).with_support(support);
        debug!(
            sender = %sender,
            query = %query.query_string(),
            support_terms = query.support.len(),
            "running retrieval chain"
        );

        let quote = match self.retrieve(&query, rng).await {
            Some(quote) => quote,
            None => self.pool_pick(QuoteCategory::Confused, rng).await?,
        };

        self.history.record_words(sender, &terms);
        Ok(format!("{}: {}", sender, quote))
    }

    /// Check at startup that the three random-pick pools can actually serve
    /// a quote. An empty pool here is a configuration error that would
    /// otherwise only surface mid-conversation.
    pub async fn validate_pools(&self) -> BanterResult<()> {
        for category in QuoteCategory::pools() {
            let pool = self.store.fetch_pool(category).await?;
            if pool.is_empty() {
                return Err(BanterError::empty_pool(category));
            }
        }
        Ok(())
    }

    /// Scored tier, then fuzzy tier. A store failure at either tier is
    /// logged and treated as an empty result set for that tier.
    async fn retrieve<R: Rng + Send>(
        &self,
        query: &RetrievalQuery,
        rng: &mut R,
    ) -> Option<String> {
        let scored = match self.store.search_scored(query, self.min_score).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "scored query failed, falling through to fuzzy");
                Vec::new()
            }
        };
        if let Some(quote) = scored.choose(rng) {
            return Some(quote.clone());
        }

        let fuzzy = match self.store.search_fuzzy(query, self.min_score).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "fuzzy query failed, falling through");
                Vec::new()
            }
        };
        fuzzy.choose(rng).cloned()
    }

    async fn pool_pick<R: Rng + Send>(
        &self,
        category: QuoteCategory,
        rng: &mut R,
    ) -> BanterResult<String> {
        let pool = match self.store.fetch_pool(category).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!(category = %category, error = %e, "pool fetch failed");
                Vec::new()
            }
        };
        pool.choose(rng)
            .cloned()
            .ok_or_else(|| BanterError::empty_pool(category))
    }
}
