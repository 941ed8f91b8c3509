//! Integration tests for the tick scheduler.
//!
//! Uses `start_paused` so `sleep_until` resolves as soon as the runtime
//! auto-advances the clock.

use std::time::Duration;

use loginflow_dispatch::{Dispatcher, TickConfig, TickScheduler};

// =========================================================================
// TickConfig
// =========================================================================

#[test]
fn test_default_config_is_60hz() {
    let cfg = TickConfig::default();
    assert_eq!(cfg.tick_rate_hz, 60);
    assert_eq!(cfg.tick_duration(), Duration::from_secs_f64(1.0 / 60.0));
}

#[test]
fn test_with_rate_sets_duration() {
    let cfg = TickConfig::with_rate(20);
    assert_eq!(cfg.tick_duration(), Duration::from_millis(50));
}

#[test]
fn test_validated_clamps_rate_and_threshold() {
    let cfg = TickConfig {
        tick_rate_hz: 10_000,
        budget_warn_threshold: 3.0,
    }
    .validated();
    assert_eq!(cfg.tick_rate_hz, TickConfig::MAX_TICK_RATE_HZ);
    assert_eq!(cfg.budget_warn_threshold, 1.0);

    let cfg = TickConfig::with_rate(0).validated();
    assert_eq!(cfg.tick_rate_hz, TickConfig::MIN_TICK_RATE_HZ);
}

// =========================================================================
// Tick firing
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_wait_for_tick_fires_and_increments() {
    let mut s = TickScheduler::with_rate(20);

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 1);
    assert_eq!(info.dt, Duration::from_millis(50));
    assert!(!info.overrun);
    assert_eq!(info.ticks_skipped, 0);
    assert_eq!(s.tick_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_multiple_ticks_increment_monotonically() {
    let mut s = TickScheduler::with_rate(20);

    for expected in 1..=5 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, expected);
    }
    assert_eq!(s.tick_count(), 5);
    assert_eq!(s.total_overruns(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_late_tick_is_reported_as_overrun() {
    let mut s = TickScheduler::with_rate(20);

    // Stall the loop for three periods before asking for the tick.
    tokio::time::advance(Duration::from_millis(200)).await;
    let info = s.wait_for_tick().await;

    assert!(info.overrun);
    assert_eq!(info.ticks_skipped, 3);
    assert_eq!(s.total_overruns(), 1);

    // The next tick is scheduled from now, not from the missed deadline.
    let info = s.wait_for_tick().await;
    assert!(!info.overrun);
}

#[tokio::test(start_paused = true)]
async fn test_record_tick_end_without_wait_is_none() {
    let mut s = TickScheduler::with_rate(20);
    assert!(s.record_tick_end().is_none());

    s.wait_for_tick().await;
    assert!(s.record_tick_end().is_some());
    // Consumed: a second call has nothing to measure.
    assert!(s.record_tick_end().is_none());
}

// =========================================================================
// Dispatcher inside the loop
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_one_drain_per_tick() {
    let mut s = TickScheduler::with_rate(30);
    let mut d = Dispatcher::<Vec<u64>>::new();
    let h = d.handle();
    let mut log = Vec::new();

    for round in 1..=3u64 {
        h.submit(move |log| log.push(round));
        let info = s.wait_for_tick().await;
        d.drain(&mut log);
        s.record_tick_end();
        assert_eq!(info.tick, round);
    }

    assert_eq!(log, vec![1, 2, 3]);
}
