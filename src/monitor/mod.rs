//! Connectivity monitoring core.
//!
//! # Data Flow
//! ```text
//! Poll ticker (2s, driver.rs)
//!     → spawn reachability probe
//!     → Input::Sample { online, at }
//!     → Debouncer (1s settle window)
//!     → Effect::ArmDebounce { deadline }
//!
//! Debounce deadline (driver.rs)
//!     → Input::DebounceExpired { at }
//!     → settled value → ConnectivityStateMachine
//!     → Restored / Lost
//!     → Effect::Notify + Effect::LogStatus + Effect::RefreshLabel
//! ```
//!
//! # Design Decisions
//! - All mutable monitor state lives in `MonitorState`; every mutation goes
//!   through `handle`, a reducer from inputs to effects
//! - The reducer owns no timers and performs no I/O, so transition logic is
//!   testable with a paused clock; the driver executes effects
//! - Poll period and settle window are fixed constants, not configuration

pub mod debounce;
pub mod downtime;
pub mod driver;
pub mod machine;

use std::time::Duration;

use tokio::time::Instant;

use debounce::Debouncer;
use machine::{ConnectivityState, ConnectivityStateMachine, TransitionKind};

pub use driver::{Monitor, MonitorHandle};
pub use machine::Transition;

/// Period of the reachability poll ticker.
pub const POLL_PERIOD: Duration = Duration::from_millis(2000);

/// Quiet window a raw value must survive before it settles.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

/// Everything that can happen to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A raw probe result landed.
    Sample { online: bool, at: Instant },
    /// The armed debounce deadline fired.
    DebounceExpired { at: Instant },
    /// The operator toggled monitoring.
    SetEnabled { enabled: bool },
}

/// Side effects requested by the reducer, executed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)arm the debounce deadline timer.
    ArmDebounce { deadline: Instant },
    /// Dispatch a native notification for a transition.
    Notify { kind: TransitionKind },
    /// Append a `Connection {LOST|RESTORED}` record to the audit log.
    LogStatus { kind: TransitionKind },
    /// Refresh the displayed downtime label with this total.
    RefreshLabel { total: Duration },
}

/// All mutable state of the monitor, mutated only through [`handle`](Self::handle).
#[derive(Debug)]
pub struct MonitorState {
    enabled: bool,
    debouncer: Debouncer,
    machine: ConnectivityStateMachine,
}

impl MonitorState {
    pub fn new(start_enabled: bool) -> Self {
        Self {
            enabled: start_enabled,
            debouncer: Debouncer::new(DEBOUNCE_WINDOW),
            machine: ConnectivityStateMachine::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> ConnectivityState {
        self.machine.state()
    }

    /// Total downtime as of `now`, including any open outage.
    pub fn live_downtime(&self, now: Instant) -> Duration {
        self.machine.live_downtime(now)
    }

    /// Reduce one input to the effects it causes.
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        match input {
            Input::Sample { online, at } => self.on_sample(online, at),
            Input::DebounceExpired { at } => self.on_debounce_expired(at),
            Input::SetEnabled { enabled } => {
                // No event is synthesized from the toggle itself; settled
                // state, accumulator and any pending debounce all survive.
                self.enabled = enabled;
                Vec::new()
            }
        }
    }

    fn on_sample(&mut self, online: bool, at: Instant) -> Vec<Effect> {
        if !self.enabled {
            // A probe that was in flight when monitoring was disabled may
            // still deliver its result; drop it.
            return Vec::new();
        }

        let deadline = self.debouncer.observe(online, at);
        let mut effects = vec![Effect::ArmDebounce { deadline }];

        // Live downtime refresh rides the poll tick, not the settlement.
        if self.machine.state() == ConnectivityState::Offline {
            effects.push(Effect::RefreshLabel {
                total: self.machine.live_downtime(at),
            });
        }

        effects
    }

    fn on_debounce_expired(&mut self, at: Instant) -> Vec<Effect> {
        let Some(online) = self.debouncer.settle(at) else {
            return Vec::new();
        };

        let Some(transition) = self.machine.on_settled(online, at) else {
            return Vec::new();
        };

        match transition.kind {
            TransitionKind::Restored => vec![
                Effect::RefreshLabel {
                    total: self.machine.live_downtime(at),
                },
                Effect::Notify {
                    kind: TransitionKind::Restored,
                },
                Effect::LogStatus {
                    kind: TransitionKind::Restored,
                },
            ],
            TransitionKind::Lost => vec![
                Effect::Notify {
                    kind: TransitionKind::Lost,
                },
                Effect::LogStatus {
                    kind: TransitionKind::Lost,
                },
            ],
        }
    }
}
