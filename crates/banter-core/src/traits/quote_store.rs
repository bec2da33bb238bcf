//! Quote store trait.

use async_trait::async_trait;

use crate::error::BanterResult;
use crate::types::{QuoteCategory, RetrievalQuery};

/// Read-only retrieval collaborator backing the reply pipeline.
///
/// Implementations index quotes by category. The core only ever reads:
/// two relevance queries against the `general` category and a bounded
/// random-access fetch for each of the three reply pools.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Relevance-scored search against the `general` category.
    ///
    /// Salient terms carry the primary weight; the query's support terms
    /// only nudge scoring. Results below `min_score` are dropped.
    async fn search_scored(
        &self,
        query: &RetrievalQuery,
        min_score: f32,
    ) -> BanterResult<Vec<String>>;

    /// Approximate (typo-tolerant) search against the `general` category.
    async fn search_fuzzy(
        &self,
        query: &RetrievalQuery,
        min_score: f32,
    ) -> BanterResult<Vec<String>>;

    /// Fetch one of the unscored reply pools (confused/annoyed/bored).
    ///
    /// Pools are bounded; implementations return at most a fixed number
    /// of entries regardless of how many are indexed.
    async fn fetch_pool(&self, category: QuoteCategory) -> BanterResult<Vec<String>>;
}
