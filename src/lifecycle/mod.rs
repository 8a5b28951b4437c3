//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build sinks and probe → Spawn monitor
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c → broadcast signal → monitor exits loop → timers dropped
//!
//! Operator signals (signals.rs, unix):
//!     SIGUSR1 → toggle monitoring
//!     SIGUSR2 → flush DNS cache
//!     SIGHUP  → open the audit log
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every task
//! - Operator signals stand in for the tray menu on headless hosts
//! - Shutdown terminates timers before exit; outstanding notifications are
//!   not flushed

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
