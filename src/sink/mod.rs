//! Side-effect sinks.
//!
//! # Data Flow
//! ```text
//! Monitor effects (monitor/driver.rs):
//!     Notify       → EventSink (notify.rs, native notification command)
//!     LogStatus    → AuditLog (logfile.rs, append-only record)
//!     RefreshLabel → LabelSink (downtime label, tray surrogate)
//! ```
//!
//! # Design Decisions
//! - Sinks are trait objects injected into the monitor, so the core stays
//!   deterministic and tests can record effects instead of performing them
//! - Every sink is fire-and-forget: failures are logged and never reach
//!   core state

pub mod logfile;
pub mod notify;

use crate::monitor::machine::TransitionKind;

pub use logfile::AuditLog;
pub use notify::DesktopNotifier;

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    /// The notification shown for a connectivity transition.
    pub fn for_transition(kind: TransitionKind) -> Self {
        match kind {
            TransitionKind::Restored => Self {
                title: "Connection Restored".to_string(),
                message: "Internet Connection Restored".to_string(),
            },
            TransitionKind::Lost => Self {
                title: "Connection Lost".to_string(),
                message: "Internet Connection Lost".to_string(),
            },
        }
    }
}

/// Dispatches user-visible notifications. Fire-and-forget: a failed
/// dispatch must be logged and swallowed, never surfaced to the monitor.
pub trait EventSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Receives the single mutable downtime label, `"Downtime: HH:MM:SS"`.
///
/// Refreshed with the frozen total on every Restored transition and with
/// the live total on every poll tick while offline. A tray frontend would
/// implement this; the daemon installs a tracing-backed one.
pub trait LabelSink: Send + Sync {
    fn set_downtime(&self, label: &str);
}

/// Label sink that reports through the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingLabel;

impl LabelSink for TracingLabel {
    fn set_downtime(&self, label: &str) {
        tracing::debug!(%label, "downtime label updated");
    }
}
