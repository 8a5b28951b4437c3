//! Raw sample debouncing.
//!
//! # Responsibilities
//! - Collapse a rapid sequence of raw probe results into one settled value
//! - Restart the settle window whenever a new sample arrives
//! - Emit each settled value exactly once
//!
//! # Design Decisions
//! - Pure state; scheduling the deadline check is the caller's job
//! - Settle semantics, not sample-after-fixed-delay: a value that keeps
//!   changing faster than the window never settles
//! - The caller polls slower than the window, so a single flap always
//!   has time to settle before the next sample lands

use std::time::Duration;

use tokio::time::Instant;

/// Debounces a boolean signal over a fixed settle window.
///
/// Feed raw samples through [`observe`](Self::observe) and arrange for
/// [`settle`](Self::settle) to run at the returned deadline. A value
/// settles only after it has gone unchallenged for the full window.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<bool>,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Record a raw sample and (re)start the settle window anchored at `now`.
    ///
    /// Returns the new deadline the caller must schedule a
    /// [`settle`](Self::settle) check at. Any earlier deadline is superseded.
    pub fn observe(&mut self, raw: bool, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.pending = Some(raw);
        self.deadline = Some(deadline);
        deadline
    }

    /// Deadline check. Settles the pending value once its window has fully
    /// elapsed with no new sample restarting it.
    ///
    /// Returns the settled value exactly once, then clears the pending state.
    /// Returns `None` when no window is armed or the deadline has not been
    /// reached yet (a newer sample moved it).
    pub fn settle(&mut self, now: Instant) -> Option<bool> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Currently armed deadline, if a sample is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use super::*;

    const WINDOW: Duration = Duration::from_millis(1000);

    // All tests use start_paused so Instant::now() is deterministic
    // and time::advance() controls the clock.

    #[tokio::test(start_paused = true)]
    async fn settles_after_quiet_window() {
        let mut debouncer = Debouncer::new(WINDOW);
        let deadline = debouncer.observe(true, Instant::now());

        time::advance(WINDOW).await;
        assert_eq!(Instant::now(), deadline);
        assert_eq!(debouncer.settle(Instant::now()), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_settle_before_deadline() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.observe(false, Instant::now());

        time::advance(Duration::from_millis(999)).await;
        assert_eq!(debouncer.settle(Instant::now()), None);

        time::advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.settle(Instant::now()), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn settled_value_is_emitted_exactly_once() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.observe(true, Instant::now());

        time::advance(WINDOW).await;
        assert_eq!(debouncer.settle(Instant::now()), Some(true));
        assert_eq!(debouncer.settle(Instant::now()), None);
        assert!(debouncer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_sample_restarts_the_window() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.observe(false, Instant::now());

        // 500ms later a differing sample arrives; the old deadline is void.
        time::advance(Duration::from_millis(500)).await;
        debouncer.observe(true, Instant::now());

        time::advance(Duration::from_millis(500)).await;
        assert_eq!(debouncer.settle(Instant::now()), None);

        time::advance(Duration::from_millis(500)).await;
        assert_eq!(debouncer.settle(Instant::now()), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_sample_also_restarts_the_window() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.observe(true, Instant::now());

        time::advance(Duration::from_millis(900)).await;
        debouncer.observe(true, Instant::now());

        time::advance(Duration::from_millis(100)).await;
        assert_eq!(debouncer.settle(Instant::now()), None);

        time::advance(Duration::from_millis(900)).await;
        assert_eq!(debouncer.settle(Instant::now()), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_alternation_never_settles() {
        let mut debouncer = Debouncer::new(WINDOW);
        let mut value = true;

        for _ in 0..20 {
            debouncer.observe(value, Instant::now());
            value = !value;
            time::advance(Duration::from_millis(400)).await;
            assert_eq!(debouncer.settle(Instant::now()), None);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_settles_to_last_value_one_window_after_it() {
        // Samples [false, false, true] 500ms apart: settlement happens
        // 1000ms after the last sample, to the last value.
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.observe(false, Instant::now());

        time::advance(Duration::from_millis(500)).await;
        debouncer.observe(false, Instant::now());

        time::advance(Duration::from_millis(500)).await;
        let deadline = debouncer.observe(true, Instant::now());

        assert_eq!(debouncer.settle(Instant::now()), None);
        time::advance(WINDOW).await;
        assert_eq!(Instant::now(), deadline);
        assert_eq!(debouncer.settle(Instant::now()), Some(true));
    }
}
