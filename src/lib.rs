//! NetProbe internet reachability monitor.
//!
//! A background daemon that polls reachability, debounces transient flaps
//! into stable Restored/Lost transitions, accumulates total downtime and
//! feeds notifications, an audit log and a downtime label.
//!
//! # Architecture Overview
//!
//! ```text
//!  Poll ticker (2s)          Debounce deadline (1s)
//!       │                            │
//!       ▼                            ▼
//!  ┌─────────┐   raw sample   ┌────────────┐   settled   ┌──────────────┐
//!  │  probe  │───────────────▶│ Debouncer  │────────────▶│ Connectivity │
//!  │ (HTTP)  │                │ (1s quiet) │             │ StateMachine │
//!  └─────────┘                └────────────┘             └──────┬───────┘
//!                                                               │ Restored/Lost
//!                              ┌────────────────────────────────┼────────────┐
//!                              ▼                                ▼            ▼
//!                        ┌───────────┐                   ┌────────────┐ ┌─────────┐
//!                        │ EventSink │                   │  AuditLog  │ │ Label   │
//!                        │ (notify)  │                   │ (append)   │ │ (HH:MM) │
//!                        └───────────┘                   └────────────┘ └─────────┘
//!
//!  Cross-cutting: config (TOML), lifecycle (shutdown + operator signals),
//!  oscmd (DNS flush, log opening)
//! ```

// Core subsystems
pub mod config;
pub mod monitor;
pub mod probe;

// Side effects
pub mod oscmd;
pub mod sink;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::MonitorConfig;
pub use lifecycle::Shutdown;
pub use monitor::{Monitor, MonitorHandle};
