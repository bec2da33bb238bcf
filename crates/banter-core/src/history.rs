//! Per-sender interaction history.
//!
//! Each sender gets two bounded FIFO windows: the salient words from their
//! recent messages (retrieval support context) and the instants they last
//! spoke (burst detection). Histories are created lazily and live for the
//! process lifetime; the sender set itself is unbounded.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::config::BotConfig;

/// How many timestamps make up a burst.
const BURST_LEN: usize = 3;

/// Bounded history for a single sender.
#[derive(Debug, Clone, Default)]
pub struct SenderHistory {
    words: VecDeque<String>,
    timestamps: VecDeque<DateTime<Utc>>,
}

impl SenderHistory {
    /// Recent salient words, oldest first.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Recent interaction instants, oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.timestamps.iter()
    }

    fn push_word(&mut self, word: String, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while self.words.len() >= capacity {
            self.words.pop_front();
        }
        self.words.push_back(word);
    }

    fn push_timestamp(&mut self, at: DateTime<Utc>, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while self.timestamps.len() >= capacity {
            self.timestamps.pop_front();
        }
        self.timestamps.push_back(at);
    }
}

/// Store of per-sender histories.
///
/// Interior mutability behind a single mutex keeps each mutation atomic with
/// respect to concurrent messages from the same sender; histories for
/// different senders are independent entries in the map.
pub struct HistoryStore {
    senders: Mutex<HashMap<String, SenderHistory>>,
    word_capacity: usize,
    timestamp_capacity: usize,
    annoy_window: Duration,
    context_max_age: Option<Duration>,
}

impl HistoryStore {
    /// Create a store from the bot configuration.
    pub fn new(config: &BotConfig) -> Self {
        Self {
            senders: Mutex::new(HashMap::new()),
            word_capacity: config.word_capacity,
            timestamp_capacity: config.timestamp_capacity,
            annoy_window: config.annoy_window(),
            context_max_age: config.context_max_age(),
        }
    }

    /// Record an interaction instant for `sender`.
    ///
    /// Callers record in chronological order, so the stored sequence stays
    /// non-decreasing.
    pub fn record_interaction(&self, sender: &str, at: DateTime<Utc>) {
        let mut senders = self.senders.lock().expect("history lock poisoned");
        senders
            .entry(sender.to_string())
            .or_default()
            .push_timestamp(at, self.timestamp_capacity);
    }

    /// Append salient words for `sender`, evicting the oldest past capacity.
    pub fn record_words(&self, sender: &str, words: &[String]) {
        if words.is_empty() {
            return;
        }
        let mut senders = self.senders.lock().expect("history lock poisoned");
        let history = senders.entry(sender.to_string()).or_default();
        for word in words {
            history.push_word(word.clone(), self.word_capacity);
        }
    }

    /// False when `sender` is bursting: at least three recorded instants with
    /// the newest and third-newest closer together than the annoy window.
    ///
    /// A sender's current message is expected to be recorded before this is
    /// evaluated, so a message counts toward the burst it is part of.
    pub fn is_rate_ok(&self, sender: &str) -> bool {
        let senders = self.senders.lock().expect("history lock poisoned");
        let Some(history) = senders.get(sender) else {
            return true;
        };
        let len = history.timestamps.len();
        if len < BURST_LEN {
            return true;
        }
        let newest = history.timestamps[len - 1];
        let third_newest = history.timestamps[len - BURST_LEN];
        newest - third_newest >= self.annoy_window
    }

    /// The stored context words for `sender`, oldest first.
    ///
    /// When stale-context invalidation is configured and too much time has
    /// passed since the sender's previous interaction, the stored words are
    /// discarded and an empty sequence is returned. Staleness is judged
    /// against the second-newest instant: the newest is the in-flight message
    /// itself, recorded before this read.
    pub fn context_words(&self, sender: &str, now: DateTime<Utc>) -> Vec<String> {
        let mut senders = self.senders.lock().expect("history lock poisoned");
        let Some(history) = senders.get_mut(sender) else {
            return Vec::new();
        };

        if let Some(max_age) = self.context_max_age {
            let previous = history.timestamps.iter().rev().nth(1);
            if let Some(&previous) = previous {
                if now - previous > max_age {
                    history.words.clear();
                    return Vec::new();
                }
            }
        }

        history.words.iter().cloned().collect()
    }

    /// Snapshot a sender's history (for inspection and tests).
    pub fn snapshot(&self, sender: &str) -> Option<SenderHistory> {
        let senders = self.senders.lock().expect("history lock poisoned");
        senders.get(sender).cloned()
    }
}
