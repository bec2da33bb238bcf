//! Domain types shared across the banter crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Category a quote belongs to.
///
/// `General` quotes are searchable and relevance-scored; the other three are
/// unscored pools picked from uniformly at random. Categories serialize to
/// lowercase so they match the raw tokens stored in the index.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuoteCategory {
    /// Searchable quotes answered through the scored/fuzzy retrieval tiers.
    General,
    /// Fallback pool when the bot cannot make sense of a message.
    Confused,
    /// Pool used to deflect senders who are bursting.
    Annoyed,
    /// Pool the idle monitor draws from when the channel goes quiet.
    Bored,
}

impl QuoteCategory {
    /// Static string form, matching the indexed category token.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// The three random-pick pools (everything except `General`).
    pub fn pools() -> [QuoteCategory; 3] {
        [
            QuoteCategory::Confused,
            QuoteCategory::Annoyed,
            QuoteCategory::Bored,
        ]
    }
}

/// A single quote: opaque text plus the category it is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote text.
    pub text: String,
    /// The category it belongs to.
    pub category: QuoteCategory,
}

impl Quote {
    /// Create a new quote.
    pub fn new(text: impl Into<String>, category: QuoteCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// A retrieval query derived from one inbound message.
///
/// `terms` are the salient words extracted from the message itself and carry
/// the primary relevance weight; `support` words come from the sender's
/// recent history and only nudge scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalQuery {
    /// Salient terms, in ranked order.
    pub terms: Vec<String>,
    /// Supporting terms from sender context.
    pub support: Vec<String>,
}

impl RetrievalQuery {
    /// Create a query from salient terms.
    pub fn new(terms: Vec<String>) -> Self {
        Self {
            terms,
            support: Vec::new(),
        }
    }

    /// Attach supporting context terms.
    pub fn with_support(mut self, support: Vec<String>) -> Self {
        self.support = support;
        self
    }

    /// True when there are no salient terms to search with.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whitespace-joined rendering of the salient terms.
    pub fn query_string(&self) -> String {
        self.terms.join(" ")
    }
}
