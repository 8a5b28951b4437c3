//! Connectivity state machine.
//!
//! # States
//! - Unknown: before the first settled sample
//! - Online: last settled sample was reachable
//! - Offline: last settled sample was unreachable
//!
//! # State Transitions
//! ```text
//! Unknown → Online | Offline: first settlement, no event emitted
//! Offline → Online: Restored event, outage interval closes
//! Online → Offline: Lost event, outage interval opens
//! ```
//!
//! # Design Decisions
//! - The first settlement only initializes state, so a process started
//!   while online never raises a spurious Restored notification
//! - Self-transitions are no-ops: no event, accumulator untouched
//! - Starting offline opens the outage interval immediately, eventless

use std::time::Duration;

use tokio::time::Instant;

use super::downtime::DowntimeAccumulator;

/// Settled reachability state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityState {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Direction of a settled-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Restored,
    Lost,
}

impl TransitionKind {
    /// Token used in audit log records.
    pub fn log_token(&self) -> &'static str {
        match self {
            TransitionKind::Restored => "RESTORED",
            TransitionKind::Lost => "LOST",
        }
    }
}

/// A settled-state change, emitted exactly once per qualifying edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub at: Instant,
}

/// Owns the settled connectivity state and drives downtime accounting.
#[derive(Debug, Default)]
pub struct ConnectivityStateMachine {
    state: ConnectivityState,
    downtime: DowntimeAccumulator,
}

impl ConnectivityStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Total downtime as of `now`, including any open outage interval.
    pub fn live_downtime(&self, now: Instant) -> Duration {
        self.downtime.live_total(now)
    }

    /// Apply a settled sample.
    ///
    /// Returns the transition this settlement caused, if any. The first
    /// settlement never emits one; repeats of the current state are no-ops.
    pub fn on_settled(&mut self, online: bool, now: Instant) -> Option<Transition> {
        match (self.state, online) {
            (ConnectivityState::Unknown, true) => {
                self.state = ConnectivityState::Online;
                None
            }
            (ConnectivityState::Unknown, false) => {
                // The outage clock starts even though no event fires.
                self.state = ConnectivityState::Offline;
                self.downtime.on_lost(now);
                None
            }
            (ConnectivityState::Offline, true) => {
                self.downtime.on_restored(now);
                self.state = ConnectivityState::Online;
                Some(Transition {
                    kind: TransitionKind::Restored,
                    at: now,
                })
            }
            (ConnectivityState::Online, false) => {
                self.downtime.on_lost(now);
                self.state = ConnectivityState::Offline;
                Some(Transition {
                    kind: TransitionKind::Lost,
                    at: now,
                })
            }
            // Settled value matches current state.
            (ConnectivityState::Online, true) | (ConnectivityState::Offline, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_settlement_online_emits_nothing() {
        let mut machine = ConnectivityStateMachine::new();
        assert_eq!(machine.on_settled(true, Instant::now()), None);
        assert_eq!(machine.state(), ConnectivityState::Online);
        assert_eq!(machine.live_downtime(Instant::now()), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn first_settlement_offline_opens_outage_without_event() {
        let mut machine = ConnectivityStateMachine::new();
        assert_eq!(machine.on_settled(false, Instant::now()), None);
        assert_eq!(machine.state(), ConnectivityState::Offline);

        time::advance(Duration::from_secs(5)).await;
        assert_eq!(
            machine.live_downtime(Instant::now()),
            Duration::from_secs(5)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restore_closes_outage_and_emits_once() {
        let mut machine = ConnectivityStateMachine::new();
        machine.on_settled(false, Instant::now());

        time::advance(Duration::from_secs(10)).await;
        let at = Instant::now();
        let transition = machine.on_settled(true, at);

        assert_eq!(
            transition,
            Some(Transition {
                kind: TransitionKind::Restored,
                at,
            })
        );
        assert_eq!(machine.state(), ConnectivityState::Online);
        assert_eq!(machine.live_downtime(at), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn loss_emits_and_opens_outage() {
        let mut machine = ConnectivityStateMachine::new();
        machine.on_settled(true, Instant::now());

        time::advance(Duration::from_secs(1)).await;
        let transition = machine.on_settled(false, Instant::now());

        assert_eq!(transition.map(|t| t.kind), Some(TransitionKind::Lost));
        assert_eq!(machine.state(), ConnectivityState::Offline);
    }

    #[tokio::test(start_paused = true)]
    async fn self_transitions_are_silent() {
        let mut machine = ConnectivityStateMachine::new();
        machine.on_settled(true, Instant::now());

        assert_eq!(machine.on_settled(true, Instant::now()), None);

        machine.on_settled(false, Instant::now());
        time::advance(Duration::from_secs(3)).await;
        assert_eq!(machine.on_settled(false, Instant::now()), None);

        // Repeated offline settlements must not reset the open interval.
        time::advance(Duration::from_secs(2)).await;
        assert_eq!(
            machine.live_downtime(Instant::now()),
            Duration::from_secs(5)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn downtime_accumulates_over_flaps() {
        let mut machine = ConnectivityStateMachine::new();
        machine.on_settled(true, Instant::now());

        for _ in 0..3 {
            machine.on_settled(false, Instant::now());
            time::advance(Duration::from_secs(2)).await;
            machine.on_settled(true, Instant::now());
            time::advance(Duration::from_secs(30)).await;
        }

        assert_eq!(
            machine.live_downtime(Instant::now()),
            Duration::from_secs(6)
        );
    }
}
