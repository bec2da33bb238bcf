//! banter-core - Core library for banter.
//!
//! This crate provides the types, traits, and reply pipeline for the banter
//! channel bot: importance extraction over inbound text, per-sender history
//! with burst detection, the tiered quote-retrieval chain, and the idle
//! monitor that speaks up when the channel goes quiet.
//!
//! # Example
//!
//! ```ignore
//! use banter_core::{BotConfig, Responder};
//! use std::sync::Arc;
//!
//! let config = BotConfig::default();
//! let responder = Responder::new(store, &config);
//!
//! // Answer a message addressed to the bot
//! let reply = responder.reply("alice", "why does this always break").await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod history;
pub mod monitor;
pub mod responder;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::BotConfig;
pub use error::{BanterError, BanterResult};
pub use extract::extract;
pub use history::{HistoryStore, SenderHistory};
pub use monitor::{ActivityClock, IdleMonitor};
pub use responder::{addressed, Responder};
pub use traits::{QuoteStore, Transport};
pub use types::{Quote, QuoteCategory, RetrievalQuery};
