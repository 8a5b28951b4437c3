//! Cumulative downtime accounting.
//!
//! # Responsibilities
//! - Track the total duration spent offline across arbitrarily many outages
//! - Expose a live total that includes the still-open outage interval
//! - Render totals as a zero-padded `HH:MM:SS` label
//!
//! # Design Decisions
//! - The open interval is folded into the total only when the outage closes;
//!   live reads add the open span on the fly, so the total is gap-free
//! - Opening an already-open outage (or closing a closed one) is a
//!   programming error under the transition table: debug_assert, no-op in
//!   release

use std::time::Duration;

use tokio::time::Instant;

/// Accumulates offline time across outages.
///
/// Invariant: `outage_start` is set exactly while the connection is
/// considered offline. `total` never decreases.
#[derive(Debug, Default)]
pub struct DowntimeAccumulator {
    total: Duration,
    outage_start: Option<Instant>,
}

impl DowntimeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an outage interval at `now`.
    pub fn on_lost(&mut self, now: Instant) {
        debug_assert!(self.outage_start.is_none(), "outage already open");
        if self.outage_start.is_none() {
            self.outage_start = Some(now);
        }
    }

    /// Close the open outage interval, folding its span into the total.
    pub fn on_restored(&mut self, now: Instant) {
        debug_assert!(self.outage_start.is_some(), "no outage open");
        if let Some(start) = self.outage_start.take() {
            self.total += now.duration_since(start);
        }
    }

    /// Total downtime as of `now`, including the open interval if any.
    ///
    /// Monotonically non-decreasing in `now` while an outage is open,
    /// constant while online. Callable on every poll tick.
    pub fn live_total(&self, now: Instant) -> Duration {
        match self.outage_start {
            Some(start) => self.total + now.duration_since(start),
            None => self.total,
        }
    }

    /// Whether an outage interval is currently open.
    pub fn is_open(&self) -> bool {
        self.outage_start.is_some()
    }
}

/// Render a downtime total as zero-padded `HH:MM:SS`.
///
/// Truncates to the second. Hours are unbounded, not wrapped at 24.
pub fn format_downtime(total: Duration) -> String {
    let secs = total.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn closed_interval_is_folded_into_total() {
        let mut downtime = DowntimeAccumulator::new();
        downtime.on_lost(Instant::now());

        time::advance(Duration::from_secs(10)).await;
        downtime.on_restored(Instant::now());

        assert!(!downtime.is_open());
        assert_eq!(downtime.live_total(Instant::now()), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn live_total_grows_while_open() {
        let mut downtime = DowntimeAccumulator::new();
        downtime.on_lost(Instant::now());

        time::advance(Duration::from_secs(5)).await;
        let first = downtime.live_total(Instant::now());
        assert_eq!(first, Duration::from_secs(5));

        time::advance(Duration::from_secs(3)).await;
        let second = downtime.live_total(Instant::now());
        assert_eq!(second, Duration::from_secs(8));
        assert!(second >= first);
    }

    #[tokio::test(start_paused = true)]
    async fn total_is_frozen_while_online() {
        let mut downtime = DowntimeAccumulator::new();
        downtime.on_lost(Instant::now());
        time::advance(Duration::from_secs(7)).await;
        downtime.on_restored(Instant::now());

        let frozen = downtime.live_total(Instant::now());
        time::advance(Duration::from_secs(60)).await;
        assert_eq!(downtime.live_total(Instant::now()), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn total_spans_multiple_outages() {
        let mut downtime = DowntimeAccumulator::new();

        downtime.on_lost(Instant::now());
        time::advance(Duration::from_secs(4)).await;
        downtime.on_restored(Instant::now());

        time::advance(Duration::from_secs(100)).await;

        downtime.on_lost(Instant::now());
        time::advance(Duration::from_secs(6)).await;

        // Sum of the closed interval plus the live span of the open one.
        assert_eq!(downtime.live_total(Instant::now()), Duration::from_secs(10));
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_downtime(Duration::ZERO), "00:00:00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(
            format_downtime(Duration::from_millis(3_661_000)),
            "01:01:01"
        );
    }

    #[test]
    fn truncates_subsecond_remainder() {
        assert_eq!(format_downtime(Duration::from_millis(5_999)), "00:00:05");
    }

    #[test]
    fn hours_are_not_wrapped_at_24() {
        assert_eq!(
            format_downtime(Duration::from_millis(90_000_000)),
            "25:00:00"
        );
    }
}
