//! banter-quotes - Tantivy-backed quote store.
//!
//! Implements the core's `QuoteStore` trait on a BM25 full-text index:
//! scored and fuzzy retrieval over the `general` category plus bounded
//! random-access pools for the canned reply categories, and the seeding
//! path that loads a quote file into the index at startup.

pub mod seed;
pub mod store;

pub use seed::{load_quotes, seed_store, SeedReport};
pub use store::TantivyQuoteStore;
