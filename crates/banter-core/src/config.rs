//! Configuration system for banter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::error::{BanterError, BanterResult};

fn default_handle() -> String {
    "banter".to_string()
}

fn default_channel() -> String {
    "#general".to_string()
}

fn default_word_capacity() -> usize {
    8
}

fn default_timestamp_capacity() -> usize {
    8
}

fn default_annoy_window_secs() -> u64 {
    30
}

fn default_bore_window_secs() -> u64 {
    3600
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_context_max_age_secs() -> u64 {
    300
}

fn default_min_score() -> f32 {
    0.8
}

fn default_index_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".banter"))
        .unwrap_or_else(|| PathBuf::from(".banter"))
        .join("index")
}

/// Main bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Bot identity used for addressing checks and nothing else.
    pub handle: String,
    /// Shared channel target for unprompted (bored) output.
    pub channel: String,
    /// Per-sender bound on remembered salient words.
    pub word_capacity: usize,
    /// Per-sender bound on remembered interaction timestamps.
    pub timestamp_capacity: usize,
    /// Rolling window in which 3+ messages from one sender count as a burst.
    pub annoy_window_secs: u64,
    /// Channel silence after which the bot speaks up on its own.
    pub bore_window_secs: u64,
    /// Idle monitor polling period.
    pub poll_interval_secs: u64,
    /// Age after which a sender's stored context words are discarded.
    /// `0` keeps context words indefinitely.
    pub context_max_age_secs: u64,
    /// Minimum relevance score for scored and fuzzy retrieval.
    pub min_score: f32,
    /// Directory holding the quote index.
    pub index_path: PathBuf,
    /// Optional quote file (JSON array of `{text, category}`) seeded at startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes_path: Option<PathBuf>,
    /// Optional webhook URL the transport posts outbound messages to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            handle: default_handle(),
            channel: default_channel(),
            word_capacity: default_word_capacity(),
            timestamp_capacity: default_timestamp_capacity(),
            annoy_window_secs: default_annoy_window_secs(),
            bore_window_secs: default_bore_window_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            context_max_age_secs: default_context_max_age_secs(),
            min_score: default_min_score(),
            index_path: default_index_path(),
            quotes_path: None,
            webhook_url: None,
        }
    }
}

impl BotConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> BanterResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| BanterError::Configuration(e.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| BanterError::Configuration(e.to_string()))
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| BanterError::Configuration(e.to_string()))
            }
            _ => Err(BanterError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `BANTER_HANDLE`, `BANTER_CHANNEL`, `BANTER_WORD_CAPACITY`,
    /// `BANTER_TIMESTAMP_CAPACITY`, `BANTER_ANNOY_WINDOW_SECS`,
    /// `BANTER_BORE_WINDOW_SECS`, `BANTER_POLL_INTERVAL_SECS`,
    /// `BANTER_CONTEXT_MAX_AGE_SECS`, `BANTER_MIN_SCORE`,
    /// `BANTER_INDEX_PATH`, `BANTER_QUOTES_PATH`, `BANTER_WEBHOOK_URL`.
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(handle) = std::env::var("BANTER_HANDLE") {
            config.handle = handle;
        }
        if let Ok(channel) = std::env::var("BANTER_CHANNEL") {
            config.channel = channel;
        }
        if let Ok(value) = std::env::var("BANTER_WORD_CAPACITY") {
            if let Ok(n) = value.parse() {
                config.word_capacity = n;
            }
        }
        if let Ok(value) = std::env::var("BANTER_TIMESTAMP_CAPACITY") {
            if let Ok(n) = value.parse() {
                config.timestamp_capacity = n;
            }
        }
        if let Ok(value) = std::env::var("BANTER_ANNOY_WINDOW_SECS") {
            if let Ok(n) = value.parse() {
                config.annoy_window_secs = n;
            }
        }
        if let Ok(value) = std::env::var("BANTER_BORE_WINDOW_SECS") {
            if let Ok(n) = value.parse() {
                config.bore_window_secs = n;
            }
        }
        if let Ok(value) = std::env::var("BANTER_POLL_INTERVAL_SECS") {
            if let Ok(n) = value.parse() {
                config.poll_interval_secs = n;
            }
        }
        if let Ok(value) = std::env::var("BANTER_CONTEXT_MAX_AGE_SECS") {
            if let Ok(n) = value.parse() {
                config.context_max_age_secs = n;
            }
        }
        if let Ok(value) = std::env::var("BANTER_MIN_SCORE") {
            if let Ok(score) = value.parse() {
                config.min_score = score;
            }
        }
        if let Ok(path) = std::env::var("BANTER_INDEX_PATH") {
            config.index_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("BANTER_QUOTES_PATH") {
            config.quotes_path = Some(PathBuf::from(path));
        }
        if let Ok(url) = std::env::var("BANTER_WEBHOOK_URL") {
            config.webhook_url = Some(url);
        }

        config
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Burst window as a duration.
    pub fn annoy_window(&self) -> Duration {
        Duration::seconds(self.annoy_window_secs as i64)
    }

    /// Bore threshold as a duration.
    pub fn bore_window(&self) -> Duration {
        Duration::seconds(self.bore_window_secs as i64)
    }

    /// Idle monitor polling period. Clamped to at least one second.
    pub fn poll_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Stale-context window; `None` disables invalidation.
    pub fn context_max_age(&self) -> Option<Duration> {
        if self.context_max_age_secs == 0 {
            None
        } else {
            Some(Duration::seconds(self.context_max_age_secs as i64))
        }
    }
}

/// Builder for BotConfig.
#[derive(Default)]
pub struct BotConfigBuilder {
    config: BotConfig,
}

impl BotConfigBuilder {
    /// Set the bot handle.
    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.config.handle = handle.into();
        self
    }

    /// Set the shared channel target.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.config.channel = channel.into();
        self
    }

    /// Set the per-sender word capacity.
    pub fn word_capacity(mut self, capacity: usize) -> Self {
        self.config.word_capacity = capacity;
        self
    }

    /// Set the per-sender timestamp capacity.
    pub fn timestamp_capacity(mut self, capacity: usize) -> Self {
        self.config.timestamp_capacity = capacity;
        self
    }

    /// Set the burst window in seconds.
    pub fn annoy_window_secs(mut self, secs: u64) -> Self {
        self.config.annoy_window_secs = secs;
        self
    }

    /// Set the bore threshold in seconds.
    pub fn bore_window_secs(mut self, secs: u64) -> Self {
        self.config.bore_window_secs = secs;
        self
    }

    /// Set the idle monitor polling period in seconds.
    pub fn poll_interval_secs(mut self, secs: u64) -> Self {
        self.config.poll_interval_secs = secs;
        self
    }

    /// Set the stale-context window in seconds (0 disables).
    pub fn context_max_age_secs(mut self, secs: u64) -> Self {
        self.config.context_max_age_secs = secs;
        self
    }

    /// Set the minimum retrieval score.
    pub fn min_score(mut self, score: f32) -> Self {
        self.config.min_score = score;
        self
    }

    /// Set the index directory.
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = path.into();
        self
    }

    /// Set the quote seed file.
    pub fn quotes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.quotes_path = Some(path.into());
        self
    }

    /// Set the outbound webhook URL.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.config.webhook_url = Some(url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> BotConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.handle, "banter");
        assert_eq!(config.word_capacity, 8);
        assert_eq!(config.annoy_window_secs, 30);
        assert_eq!(config.poll_interval_secs, 5);
        assert!((config.min_score - 0.8).abs() < f32::EPSILON);
        assert!(config.quotes_path.is_none());
    }

    #[test]
    fn test_builder() {
        let config = BotConfig::builder()
            .handle("sage")
            .channel("#quotes")
            .annoy_window_secs(10)
            .context_max_age_secs(0)
            .min_score(0.5)
            .build();

        assert_eq!(config.handle, "sage");
        assert_eq!(config.channel, "#quotes");
        assert_eq!(config.annoy_window_secs, 10);
        assert!(config.context_max_age().is_none());
        assert!((config.min_score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_duration_accessors() {
        let config = BotConfig::builder()
            .annoy_window_secs(30)
            .bore_window_secs(60)
            .poll_interval_secs(0)
            .build();

        assert_eq!(config.annoy_window(), Duration::seconds(30));
        assert_eq!(config.bore_window(), Duration::seconds(60));
        // Polling period never goes to zero.
        assert_eq!(config.poll_interval(), StdDuration::from_secs(1));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "handle = \"sage\"\nannoy_window_secs = 12\nmin_score = 0.4"
        )
        .unwrap();

        let config = BotConfig::from_file(file.path()).unwrap();
        assert_eq!(config.handle, "sage");
        assert_eq!(config.annoy_window_secs, 12);
        assert!((config.min_score - 0.4).abs() < f32::EPSILON);
        // Unset fields keep their defaults.
        assert_eq!(config.channel, "#general");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = BotConfig::from_file(file.path());
        assert!(matches!(err, Err(BanterError::Configuration(_))));
    }
}
