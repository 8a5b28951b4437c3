//! OS signal handling.
//!
//! # Responsibilities
//! - Translate ctrl-c into the shutdown broadcast
//! - Translate operator signals into monitor commands (unix only)
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Signals are the headless stand-in for a tray menu: toggle, DNS flush
//!   and log opening are all reachable without a UI

use crate::monitor::MonitorHandle;

/// Wait for an interrupt (ctrl-c). Errors from the signal driver are
/// logged and treated as an interrupt so the daemon still exits cleanly.
pub async fn wait_for_interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for ctrl-c, shutting down");
    }
}

/// Route operator signals to a running monitor.
///
/// SIGUSR1 toggles monitoring, SIGUSR2 flushes the DNS cache, SIGHUP opens
/// the audit log.
#[cfg(unix)]
pub fn spawn_operator_signals(handle: MonitorHandle) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut toggle = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(%error, "failed to install SIGUSR1 handler");
                return;
            }
        };
        let mut flush_dns = match signal(SignalKind::user_defined2()) {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(%error, "failed to install SIGUSR2 handler");
                return;
            }
        };
        let mut open_log = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(%error, "failed to install SIGHUP handler");
                return;
            }
        };

        loop {
            tokio::select! {
                Some(_) = toggle.recv() => handle.toggle(),
                Some(_) = flush_dns.recv() => handle.clear_dns_cache(),
                Some(_) = open_log.recv() => handle.open_log(),
                else => break,
            }
        }
    });
}

/// No operator signals outside unix; the handle is simply unused.
#[cfg(not(unix))]
pub fn spawn_operator_signals(_handle: MonitorHandle) {}
