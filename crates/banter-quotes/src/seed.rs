//! Quote-file loading and index seeding.
//!
//! The quote file is a JSON array of `{"text": ..., "category": ...}`
//! entries. Seeding indexes the whole file in one batch and commits once;
//! the report it returns lets startup validation reject empty pools before
//! the bot goes live.

use std::path::Path;

use tracing::info;

use banter_core::error::BanterResult;
use banter_core::types::{Quote, QuoteCategory};

use crate::store::TantivyQuoteStore;

/// Per-category counts from one seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub general: usize,
    pub confused: usize,
    pub annoyed: usize,
    pub bored: usize,
}

impl SeedReport {
    /// Count for one category.
    pub fn count(&self, category: QuoteCategory) -> usize {
        match category {
            QuoteCategory::General => self.general,
            QuoteCategory::Confused => self.confused,
            QuoteCategory::Annoyed => self.annoyed,
            QuoteCategory::Bored => self.bored,
        }
    }

    /// Total quotes seeded.
    pub fn total(&self) -> usize {
        self.general + self.confused + self.annoyed + self.bored
    }
}

/// Load quotes from a JSON quote file.
pub fn load_quotes(path: impl AsRef<Path>) -> BanterResult<Vec<Quote>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let quotes: Vec<Quote> = serde_json::from_str(&content)?;
    Ok(quotes)
}

/// Index `quotes` into `store` and commit once.
pub fn seed_store(store: &TantivyQuoteStore, quotes: &[Quote]) -> BanterResult<SeedReport> {
    let mut report = SeedReport::default();
    for quote in quotes {
        store.add(quote)?;
        match quote.category {
            QuoteCategory::General => report.general += 1,
            QuoteCategory::Confused => report.confused += 1,
            QuoteCategory::Annoyed => report.annoyed += 1,
            QuoteCategory::Bored => report.bored += 1,
        }
    }
    store.commit()?;
    info!(
        general = report.general,
        confused = report.confused,
        annoyed = report.annoyed,
        bored = report.bored,
        "quote index seeded"
    );
    Ok(report)
}
