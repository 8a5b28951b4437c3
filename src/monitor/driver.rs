//! Monitor driver.
//!
//! # Responsibilities
//! - Own the poll ticker and the debounce deadline timer
//! - Dispatch probe checks and feed their results to the reducer
//! - Execute reducer effects against the injected sinks
//! - Serve operator commands (toggle, DNS flush, open log)
//!
//! # Design Decisions
//! - One task owns all monitor state; probes run on spawned tasks and
//!   report over a channel, so probe latency never stalls the debounce
//!   deadline accounting
//! - The ticker fires every period regardless of in-flight probes (no
//!   backpressure); overlapping probes are tolerated and their results
//!   serialize through the channel
//! - Disable drops the ticker outright rather than skipping its body; an
//!   already-armed debounce window is allowed to finish

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Instant, Interval};

use crate::oscmd;
use crate::probe::Probe;
use crate::sink::{AuditLog, EventSink, LabelSink, Notification};

use super::downtime::format_downtime;
use super::{Effect, Input, MonitorState, POLL_PERIOD};

/// Operator commands, the surface a frontend (tray menu, signals) drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetEnabled(bool),
    Toggle,
    ClearDnsCache,
    OpenLog,
}

/// Cheap cloneable handle for sending [`Command`]s to a running monitor.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl MonitorHandle {
    pub fn set_enabled(&self, enabled: bool) {
        let _ = self.commands.send(Command::SetEnabled(enabled));
    }

    pub fn toggle(&self) {
        let _ = self.commands.send(Command::Toggle);
    }

    pub fn clear_dns_cache(&self) {
        let _ = self.commands.send(Command::ClearDnsCache);
    }

    pub fn open_log(&self) {
        let _ = self.commands.send(Command::OpenLog);
    }
}

/// The monitor task: reducer state plus its timers and sinks.
pub struct Monitor<P> {
    state: MonitorState,
    probe: Arc<P>,
    events: Arc<dyn EventSink>,
    label: Arc<dyn LabelSink>,
    audit: AuditLog,
    commands: mpsc::UnboundedReceiver<Command>,
    // Keeps the command channel open even if every external handle drops.
    _keepalive: mpsc::UnboundedSender<Command>,
}

impl<P: Probe + 'static> Monitor<P> {
    pub fn new(
        probe: P,
        events: Arc<dyn EventSink>,
        label: Arc<dyn LabelSink>,
        audit: AuditLog,
        start_enabled: bool,
    ) -> (Self, MonitorHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let monitor = Self {
            state: MonitorState::new(start_enabled),
            probe: Arc::new(probe),
            events,
            label,
            audit,
            commands: rx,
            _keepalive: tx.clone(),
        };
        (monitor, MonitorHandle { commands: tx })
    }

    /// Run until the shutdown signal fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        let (sample_tx, mut samples) = mpsc::unbounded_channel();
        let mut ticker = self.state.enabled().then(poll_ticker);
        let mut debounce_deadline: Option<Instant> = None;

        tracing::info!(
            enabled = self.state.enabled(),
            poll_ms = POLL_PERIOD.as_millis() as u64,
            "connectivity monitor started"
        );

        loop {
            tokio::select! {
                _ = next_tick(&mut ticker) => {
                    // Fire every tick even if an earlier probe is still in
                    // flight; results serialize through the channel.
                    let probe = Arc::clone(&self.probe);
                    let results = sample_tx.clone();
                    tokio::spawn(async move {
                        let online = probe.check().await;
                        let _ = results.send((online, Instant::now()));
                    });
                }
                Some((online, at)) = samples.recv() => {
                    let effects = self.state.handle(Input::Sample { online, at });
                    self.apply(effects, &mut debounce_deadline).await;
                }
                _ = deadline_elapsed(debounce_deadline) => {
                    debounce_deadline = None;
                    let effects = self.state.handle(Input::DebounceExpired { at: Instant::now() });
                    self.apply(effects, &mut debounce_deadline).await;
                }
                Some(command) = self.commands.recv() => {
                    self.run_command(command, &mut ticker, &mut debounce_deadline).await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    async fn run_command(
        &mut self,
        command: Command,
        ticker: &mut Option<Interval>,
        debounce_deadline: &mut Option<Instant>,
    ) {
        match command {
            Command::SetEnabled(enabled) => {
                self.set_enabled(enabled, ticker, debounce_deadline).await;
            }
            Command::Toggle => {
                let enabled = !self.state.enabled();
                self.set_enabled(enabled, ticker, debounce_deadline).await;
            }
            Command::ClearDnsCache => {
                let audit = self.audit.clone();
                tokio::spawn(async move {
                    oscmd::clear_dns_cache(&audit).await;
                });
            }
            Command::OpenLog => {
                let audit = self.audit.clone();
                tokio::spawn(async move {
                    oscmd::open_log_file(&audit).await;
                });
            }
        }
    }

    async fn set_enabled(
        &mut self,
        enabled: bool,
        ticker: &mut Option<Interval>,
        debounce_deadline: &mut Option<Instant>,
    ) {
        if enabled == self.state.enabled() {
            return;
        }

        let effects = self.state.handle(Input::SetEnabled { enabled });
        self.apply(effects, debounce_deadline).await;

        if enabled {
            // Fresh ticker; the next sample starts a fresh debounce cycle.
            *ticker = Some(poll_ticker());
            tracing::info!("monitoring enabled, polling resumed");
        } else {
            // Drop the interval so no poll wake-ups happen at all.
            *ticker = None;
            tracing::info!("monitoring disabled, poll ticker cancelled");
        }
    }

    async fn apply(&mut self, effects: Vec<Effect>, debounce_deadline: &mut Option<Instant>) {
        for effect in effects {
            match effect {
                Effect::ArmDebounce { deadline } => {
                    *debounce_deadline = Some(deadline);
                }
                Effect::Notify { kind } => {
                    self.events.notify(&Notification::for_transition(kind));
                }
                Effect::LogStatus { kind } => {
                    tracing::info!(status = kind.log_token(), "connectivity transition");
                    if let Err(error) = self.audit.append_status(kind).await {
                        tracing::error!(%error, "audit log append failed");
                    }
                }
                Effect::RefreshLabel { total } => {
                    let label = format!("Downtime: {}", format_downtime(total));
                    self.label.set_downtime(&label);
                }
            }
        }
    }
}

fn poll_ticker() -> Interval {
    time::interval(POLL_PERIOD)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
