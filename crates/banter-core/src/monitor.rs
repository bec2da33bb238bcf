//! Idle monitoring: the bot speaks up when the channel goes quiet.
//!
//! A periodic job compares the bot-wide last-activity instant against the
//! bore window and, once the channel has been silent long enough, sends a
//! random bored quote to the shared channel. The bot's own message counts as
//! activity, so it will not pipe up again until another window of silence
//! has passed.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::config::BotConfig;
use crate::error::{BanterError, BanterResult};
use crate::traits::{QuoteStore, Transport};
use crate::types::QuoteCategory;

/// The bot-wide clock of last channel activity.
///
/// Written by the message-handling path on every inbound message and by the
/// idle monitor when it speaks; read by the idle monitor's periodic check.
pub struct ActivityClock {
    last: Mutex<DateTime<Utc>>,
}

impl ActivityClock {
    /// Create a clock marking now as the last activity.
    pub fn new() -> Self {
        Self {
            last: Mutex::new(Utc::now()),
        }
    }

    /// Mark activity at the current instant.
    pub fn touch(&self) {
        self.touch_at(Utc::now());
    }

    /// Mark activity at `at`.
    pub fn touch_at(&self, at: DateTime<Utc>) {
        let mut last = self.last.lock().expect("activity clock lock poisoned");
        *last = at;
    }

    /// Elapsed time between the last recorded activity and `now`.
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        let last = self.last.lock().expect("activity clock lock poisoned");
        now - *last
    }
}

impl Default for ActivityClock {
    fn default() -> Self {
        Self::new()
    }
}

/// One idleness evaluation, shared between the scheduled job and tests.
struct IdleCheck {
    clock: Arc<ActivityClock>,
    store: Arc<dyn QuoteStore>,
    transport: Arc<dyn Transport>,
    channel: String,
    bore_window: Duration,
}

impl IdleCheck {
    fn due(&self, now: DateTime<Utc>) -> bool {
        self.clock.idle_for(now) > self.bore_window
    }

    async fn fetch_bored(&self) -> Vec<String> {
        match self.store.fetch_pool(QuoteCategory::Bored).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "bored pool fetch failed");
                Vec::new()
            }
        }
    }

    /// Evaluate idleness at `now`; returns whether the bot spoke.
    async fn run(&self, now: DateTime<Utc>) -> BanterResult<bool> {
        if !self.due(now) {
            return Ok(false);
        }
        let pool = self.fetch_bored().await;
        let quote = {
            let mut rng = rand::thread_rng();
            pool.choose(&mut rng).cloned()
        }
        .ok_or_else(|| BanterError::empty_pool(QuoteCategory::Bored))?;
        self.speak(&quote, now).await;
        Ok(true)
    }

    /// Same as `run`, with an injectable RNG for reproducible tests.
    #[allow(dead_code)]
    async fn run_with_rng<R: Rng + Send>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> BanterResult<bool> {
        if !self.due(now) {
            return Ok(false);
        }
        let pool = self.fetch_bored().await;
        let quote = pool
            .choose(rng)
            .cloned()
            .ok_or_else(|| BanterError::empty_pool(QuoteCategory::Bored))?;
        self.speak(&quote, now).await;
        Ok(true)
    }

    async fn speak(&self, quote: &str, now: DateTime<Utc>) {
        info!(channel = %self.channel, "channel is quiet, speaking up");
        self.transport.send(&self.channel, quote).await;
        self.clock.touch_at(now);
    }
}

/// Scheduler wrapper running the idle check at a fixed polling interval.
///
/// # Example
///
/// ```ignore
/// let mut monitor = IdleMonitor::new(store, transport, clock, &config).await?;
/// monitor.start().await?;
/// // ... bot runs ...
/// monitor.shutdown().await?;
/// ```
pub struct IdleMonitor {
    scheduler: JobScheduler,
    check: Arc<IdleCheck>,
    poll_interval: std::time::Duration,
}

impl std::fmt::Debug for IdleMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdleMonitor")
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl IdleMonitor {
    /// Create a monitor over the shared activity clock.
    ///
    /// Note: call `start()` to begin polling.
    pub async fn new(
        store: Arc<dyn QuoteStore>,
        transport: Arc<dyn Transport>,
        clock: Arc<ActivityClock>,
        config: &BotConfig,
    ) -> BanterResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| BanterError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            check: Arc::new(IdleCheck {
                clock,
                store,
                transport,
                channel: config.channel.clone(),
                bore_window: config.bore_window(),
            }),
            poll_interval: config.poll_interval(),
        })
    }

    /// Start polling.
    pub async fn start(&self) -> BanterResult<()> {
        let check = self.check.clone();

        let job = Job::new_repeated_async(self.poll_interval, move |_uuid, _lock| {
            let check = check.clone();
            Box::pin(async move {
                debug!("running idle check");
                match check.run(Utc::now()).await {
                    Ok(true) => info!("bored message sent"),
                    Ok(false) => {}
                    Err(e) => error!(error = %e, "idle check failed"),
                }
            })
        })
        .map_err(|e| BanterError::internal(format!("Failed to create idle job: {}", e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| BanterError::internal(format!("Failed to add idle job: {}", e)))?;
        self.scheduler
            .start()
            .await
            .map_err(|e| BanterError::internal(format!("Failed to start scheduler: {}", e)))?;

        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            "idle monitor started"
        );
        Ok(())
    }

    /// Stop polling gracefully.
    pub async fn shutdown(&mut self) -> BanterResult<()> {
        info!("shutting down idle monitor");
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| BanterError::internal(format!("Failed to shutdown scheduler: {}", e)))
    }
}
