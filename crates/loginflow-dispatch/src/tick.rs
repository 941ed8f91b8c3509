//! Fixed-rate tick scheduler for the owner loop.
//!
//! Each tick the loop drains the [`Dispatcher`](crate::Dispatcher) and
//! polls its timers. The scheduler only decides *when* a tick fires; it
//! never runs work itself.
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         _ = &mut shutdown => break,
//!         _info = scheduler.wait_for_tick() => {
//!             dispatcher.drain(&mut controller);
//!             controller.tick(Instant::now());
//!             scheduler.record_tick_end();
//!         }
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the tick scheduler.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Tick rate in Hz. Clamped to `MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ`.
    pub tick_rate_hz: u32,
    /// Budget warning threshold (0.0–1.0). A tracing warning is emitted
    /// when one tick's work exceeds this fraction of the tick budget.
    pub budget_warn_threshold: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            budget_warn_threshold: 0.80,
        }
    }
}

impl TickConfig {
    /// Slowest supported loop.
    pub const MIN_TICK_RATE_HZ: u32 = 1;
    /// Fastest supported loop.
    pub const MAX_TICK_RATE_HZ: u32 = 240;

    /// Create a config for a specific tick rate with default thresholds.
    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TickScheduler::new`].
    pub fn validated(mut self) -> Self {
        let clamped = self
            .tick_rate_hz
            .clamp(Self::MIN_TICK_RATE_HZ, Self::MAX_TICK_RATE_HZ);
        if clamped != self.tick_rate_hz {
            warn!(
                rate = self.tick_rate_hz,
                clamped, "tick_rate_hz out of range, clamping"
            );
            self.tick_rate_hz = clamped;
        }
        self.budget_warn_threshold = self.budget_warn_threshold.clamp(0.0, 1.0);
        self
    }

    /// Duration of a single tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }
}

// ---------------------------------------------------------------------------
// Tick info
// ---------------------------------------------------------------------------

/// Information about a fired tick, returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1).
    pub tick: u64,
    /// Fixed tick duration.
    pub dt: Duration,
    /// `true` if this tick fired more than 10% late.
    pub overrun: bool,
    /// Whole ticks skipped because of the overrun.
    pub ticks_skipped: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-rate scheduler driving one owner loop.
///
/// Overruns always skip ahead: after a late tick the next one is
/// scheduled from *now*, so a slow tick never causes a burst of catch-up
/// ticks.
pub struct TickScheduler {
    config: TickConfig,
    tick_duration: Duration,
    tick_count: u64,
    next_tick: TokioInstant,
    /// Set by `wait_for_tick`, consumed by `record_tick_end`.
    tick_start: Option<Instant>,
    total_overruns: u64,
}

impl TickScheduler {
    /// Create a new scheduler. The first tick fires one period from now.
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let tick_duration = config.tick_duration();

        debug!(
            rate_hz = config.tick_rate_hz,
            budget_ms = tick_duration.as_secs_f64() * 1000.0,
            "tick scheduler created"
        );

        Self {
            config,
            tick_duration,
            tick_count: 0,
            next_tick: TokioInstant::now() + tick_duration,
            tick_start: None,
            total_overruns: 0,
        }
    }

    /// Create a scheduler for a specific tick rate with default settings.
    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self::new(TickConfig::with_rate(tick_rate_hz))
    }

    /// Wait until the next tick is due.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let next = self.next_tick;
        let dur = self.tick_duration;

        time::sleep_until(next).await;

        let now = TokioInstant::now();
        self.tick_count += 1;
        self.tick_start = Some(Instant::now());

        let late_by = now.saturating_duration_since(next);
        let overrun = late_by > dur / 10;
        let mut ticks_skipped = 0u64;

        if overrun {
            self.total_overruns += 1;
            ticks_skipped = (late_by.as_nanos() / dur.as_nanos()) as u64;
            if ticks_skipped > 0 {
                warn!(
                    tick = self.tick_count,
                    skipped = ticks_skipped,
                    late_ms = late_by.as_secs_f64() * 1000.0,
                    "tick overrun, skipping ahead"
                );
            }
            self.next_tick = now + dur;
        } else {
            self.next_tick = next + dur;
        }

        trace!(tick = self.tick_count, overrun, "tick fired");

        TickInfo {
            tick: self.tick_count,
            dt: dur,
            overrun,
            ticks_skipped,
        }
    }

    /// Record that the work for the current tick has finished.
    ///
    /// Emits a warning when the tick used more than the configured
    /// fraction of its budget. Returns the measured work time, or `None`
    /// if no tick was in progress.
    pub fn record_tick_end(&mut self) -> Option<Duration> {
        let start = self.tick_start.take()?;
        let elapsed = start.elapsed();

        let utilization = elapsed.as_secs_f64() / self.tick_duration.as_secs_f64();
        if utilization >= self.config.budget_warn_threshold {
            warn!(
                tick = self.tick_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = self.tick_duration.as_secs_f64() * 1000.0,
                utilization_pct = format!("{:.1}", utilization * 100.0),
                "tick approaching budget limit"
            );
        }
        Some(elapsed)
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Ticks that fired late.
    pub fn total_overruns(&self) -> u64 {
        self.total_overruns
    }

    /// The configured tick rate in Hz (after clamping).
    pub fn tick_rate_hz(&self) -> u32 {
        self.config.tick_rate_hz
    }

    /// The fixed tick duration.
    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }
}
