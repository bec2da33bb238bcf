//! Tantivy full-text quote store with BM25 scoring.
//!
//! One index holds every quote; a raw `category` token separates the
//! searchable `general` quotes from the three canned reply pools.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, STORED, STRING, TEXT};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use banter_core::error::{BanterError, BanterResult};
use banter_core::traits::QuoteStore;
use banter_core::types::{Quote, QuoteCategory, RetrievalQuery};

/// Relevance boost applied to a message's own salient terms; support terms
/// from sender context stay at weight 1.
const SALIENT_TERM_BOOST: f32 = 4.0;

/// Maximum edit distance tolerated by the fuzzy tier.
const FUZZY_DISTANCE: u8 = 1;

/// Upper bound on entries returned from a reply pool.
const POOL_FETCH_LIMIT: usize = 50;

/// Upper bound on candidates returned from the scored and fuzzy tiers.
const SEARCH_FETCH_LIMIT: usize = 10;

/// Tantivy-based quote store.
///
/// Thread-safe: uses an internal Mutex for the IndexWriter, and a reader
/// that reloads on commit.
pub struct TantivyQuoteStore {
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    text_field: Field,
    category_field: Field,
}

impl TantivyQuoteStore {
    /// Open (or create) a persistent index in `index_path`.
    pub fn open(index_path: &Path) -> BanterResult<Self> {
        let schema = Self::schema();
        // An existing directory is only an existing index if it has metadata.
        let index = if index_path.join("meta.json").exists() {
            Index::open_in_dir(index_path).map_err(|e| {
                BanterError::Configuration(format!("Failed to open quote index: {}", e))
            })?
        } else {
            std::fs::create_dir_all(index_path).map_err(|e| {
                BanterError::Configuration(format!("Failed to create index dir: {}", e))
            })?;
            Index::create_in_dir(index_path, schema).map_err(|e| {
                BanterError::Configuration(format!("Failed to create quote index: {}", e))
            })?
        };
        Self::from_index(index)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> BanterResult<Self> {
        Self::from_index(Index::create_in_ram(Self::schema()))
    }

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        // TEXT for full-text search on the quote itself
        builder.add_text_field("text", TEXT | STORED);
        // STRING for exact category filtering
        builder.add_text_field("category", STRING | STORED);
        builder.build()
    }

    fn from_index(index: Index) -> BanterResult<Self> {
        let schema = index.schema();
        let text_field = schema
            .get_field("text")
            .map_err(|e| BanterError::Configuration(format!("Index schema mismatch: {}", e)))?;
        let category_field = schema
            .get_field("category")
            .map_err(|e| BanterError::Configuration(format!("Index schema mismatch: {}", e)))?;

        let writer = index
            .writer(50_000_000)
            .map_err(|e| BanterError::Configuration(format!("Failed to create writer: {}", e)))?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| BanterError::Configuration(format!("Failed to create reader: {}", e)))?;

        Ok(Self {
            reader,
            writer: Mutex::new(writer),
            text_field,
            category_field,
        })
    }

    /// Index a quote.
    ///
    /// # Note
    /// Call `commit()` afterwards to make it searchable.
    pub fn add(&self, quote: &Quote) -> BanterResult<()> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| BanterError::store("Failed to acquire writer lock"))?;

        let mut doc = TantivyDocument::default();
        doc.add_text(self.text_field, &quote.text);
        doc.add_text(self.category_field, quote.category.as_str());

        writer
            .add_document(doc)
            .map_err(|e| BanterError::store(format!("Failed to add quote: {}", e)))?;
        Ok(())
    }

    /// Commit pending quotes and reload the reader.
    pub fn commit(&self) -> BanterResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| BanterError::store("Failed to acquire writer lock"))?;
        writer
            .commit()
            .map_err(|e| BanterError::store(format!("Failed to commit: {}", e)))?;
        self.reader
            .reload()
            .map_err(|e| BanterError::store(format!("Failed to reload reader: {}", e)))?;
        Ok(())
    }

    /// Number of indexed quotes across all categories.
    pub fn num_quotes(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn category_filter(&self, category: QuoteCategory) -> TermQuery {
        TermQuery::new(
            Term::from_field_text(self.category_field, category.as_str()),
            IndexRecordOption::Basic,
        )
    }

    fn text_term(&self, word: &str) -> Term {
        Term::from_field_text(self.text_field, word)
    }

    /// Run `query` and collect stored texts at or above `min_score`.
    fn top_texts(
        &self,
        query: &dyn Query,
        min_score: f32,
        limit: usize,
    ) -> BanterResult<Vec<String>> {
        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(query, &TopDocs::with_limit(limit))
            .map_err(|e| BanterError::store(format!("Search failed: {}", e)))?;

        let mut texts = Vec::new();
        for (score, address) in top_docs {
            if score < min_score {
                continue;
            }
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| BanterError::store(format!("Doc fetch failed: {}", e)))?;
            if let Some(text) = doc.get_first(self.text_field).and_then(|v| v.as_str()) {
                texts.push(text.to_string());
            }
        }
        Ok(texts)
    }
}

#[async_trait]
impl QuoteStore for TantivyQuoteStore {
    async fn search_scored(
        &self,
        query: &RetrievalQuery,
        min_score: f32,
    ) -> BanterResult<Vec<String>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        // Salient terms boosted over support terms, any one is enough to match.
        let mut terms: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for word in &query.terms {
            let term_query = TermQuery::new(self.text_term(word), IndexRecordOption::Basic);
            terms.push((
                Occur::Should,
                Box::new(BoostQuery::new(Box::new(term_query), SALIENT_TERM_BOOST)),
            ));
        }
        for word in &query.support {
            terms.push((
                Occur::Should,
                Box::new(TermQuery::new(self.text_term(word), IndexRecordOption::Basic)),
            ));
        }

        let full = BooleanQuery::new(vec![
            (
                Occur::Must,
                Box::new(self.category_filter(QuoteCategory::General)) as Box<dyn Query>,
            ),
            (Occur::Must, Box::new(BooleanQuery::new(terms))),
        ]);
        self.top_texts(&full, min_score, SEARCH_FETCH_LIMIT)
    }

    async fn search_fuzzy(
        &self,
        query: &RetrievalQuery,
        min_score: f32,
    ) -> BanterResult<Vec<String>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut terms: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for word in &query.terms {
            terms.push((
                Occur::Should,
                Box::new(FuzzyTermQuery::new(
                    self.text_term(word),
                    FUZZY_DISTANCE,
                    true,
                )),
            ));
        }

        let full = BooleanQuery::new(vec![
            (
                Occur::Must,
                Box::new(self.category_filter(QuoteCategory::General)) as Box<dyn Query>,
            ),
            (Occur::Must, Box::new(BooleanQuery::new(terms))),
        ]);
        self.top_texts(&full, min_score, SEARCH_FETCH_LIMIT)
    }

    async fn fetch_pool(&self, category: QuoteCategory) -> BanterResult<Vec<String>> {
        let filter = self.category_filter(category);
        // Pools are unscored; the min-score gate does not apply.
        self.top_texts(&filter, f32::MIN, POOL_FETCH_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> TantivyQuoteStore {
        let store = TantivyQuoteStore::in_memory().unwrap();
        let quotes = [
            Quote::new(
                "Even broken clocks are right twice a day.",
                QuoteCategory::General,
            ),
            Quote::new("Measure twice, cut once.", QuoteCategory::General),
            Quote::new("A watched kettle never boils.", QuoteCategory::General),
            Quote::new("Huh?", QuoteCategory::Confused),
            Quote::new("Give it a rest.", QuoteCategory::Annoyed),
            Quote::new("Anyone home?", QuoteCategory::Bored),
        ];
        for quote in &quotes {
            store.add(quote).unwrap();
        }
        store.commit().unwrap();
        store
    }

    fn query(terms: &[&str]) -> RetrievalQuery {
        RetrievalQuery::new(terms.iter().map(|t| t.to_string()).collect())
    }

    #[tokio::test]
    async fn test_scored_search_finds_matching_general_quote() {
        let store = seeded();
        let results = store.search_scored(&query(&["clocks"]), 0.0).await.unwrap();
        assert_eq!(results, vec!["Even broken clocks are right twice a day.".to_string()]);
    }

    #[tokio::test]
    async fn test_scored_search_skips_other_categories() {
        let store = TantivyQuoteStore::in_memory().unwrap();
        store
            .add(&Quote::new("clocks are confusing", QuoteCategory::Confused))
            .unwrap();
        store.commit().unwrap();

        let results = store.search_scored(&query(&["clocks"]), 0.0).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_scored_search_honors_min_score() {
        let store = seeded();
        let results = store
            .search_scored(&query(&["clocks"]), 1000.0)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_support_terms_widen_the_match() {
        let store = seeded();
        let q = query(&["thimble"]).with_support(vec!["kettle".to_string()]);
        let results = store.search_scored(&q, 0.0).await.unwrap();
        assert_eq!(results, vec!["A watched kettle never boils.".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_query_yields_nothing() {
        let store = seeded();
        assert!(store
            .search_scored(&RetrievalQuery::default(), 0.0)
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .search_fuzzy(&RetrievalQuery::default(), 0.0)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_fuzzy_search_tolerates_a_typo() {
        let store = seeded();
        let results = store.search_fuzzy(&query(&["clockz"]), 0.0).await.unwrap();
        assert_eq!(results, vec!["Even broken clocks are right twice a day.".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_pool_returns_only_its_category() {
        let store = seeded();
        let pool = store.fetch_pool(QuoteCategory::Annoyed).await.unwrap();
        assert_eq!(pool, vec!["Give it a rest.".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_pool_is_bounded() {
        let store = TantivyQuoteStore::in_memory().unwrap();
        for i in 0..60 {
            store
                .add(&Quote::new(format!("bored quote {}", i), QuoteCategory::Bored))
                .unwrap();
        }
        store.commit().unwrap();

        let pool = store.fetch_pool(QuoteCategory::Bored).await.unwrap();
        assert_eq!(pool.len(), POOL_FETCH_LIMIT);
    }

    #[tokio::test]
    async fn test_num_quotes_counts_after_commit() {
        let store = seeded();
        assert_eq!(store.num_quotes(), 6);
    }

    #[tokio::test]
    async fn test_persistent_index_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = TantivyQuoteStore::open(dir.path()).unwrap();
            store
                .add(&Quote::new("Persisted wisdom.", QuoteCategory::General))
                .unwrap();
            store.commit().unwrap();
        }

        let reopened = TantivyQuoteStore::open(dir.path()).unwrap();
        assert_eq!(reopened.num_quotes(), 1);
        let results = reopened
            .search_scored(&query(&["wisdom"]), 0.0)
            .await
            .unwrap();
        assert_eq!(results, vec!["Persisted wisdom.".to_string()]);
    }
}
