//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the daemon.
//! All types derive Serde traits for deserialization from config files.
//!
//! The poll period and debounce window are deliberately absent: they are
//! fixed constants of the monitor, not configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the daemon.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Reachability probe settings.
    pub probe: ProbeConfig,

    /// Audit log settings.
    pub log: LogConfig,

    /// Native notification settings.
    pub notifications: NotificationConfig,

    /// Monitoring lifecycle settings.
    pub monitoring: MonitoringConfig,
}

/// Reachability probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Endpoint probed for reachability. Expected to be always up and to
    /// answer with a success status.
    pub url: String,

    /// Probe timeout in seconds; a probe slower than this is an offline
    /// sample.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: "http://clients3.google.com/generate_204".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Audit log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path of the append-only audit log.
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("netprobe_log.txt"),
        }
    }
}

/// Native notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Dispatch native notifications on connectivity transitions.
    pub enabled: bool,

    /// Application name shown by the platform notifier.
    pub app_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "NetProbe".to_string(),
        }
    }
}

/// Monitoring lifecycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Whether polling starts enabled. The operator toggle flips this at
    /// runtime.
    pub start_enabled: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            start_enabled: true,
        }
    }
}
