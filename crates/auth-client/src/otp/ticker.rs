//! Source of once-per-second countdown ticks.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[async_trait]
pub trait Ticker: Send {
    /// Resolve at the next tick
    async fn tick(&mut self);
}

/// Wall-clock ticker backed by a tokio interval.
///
/// The first tick fires one period after creation, not immediately.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
