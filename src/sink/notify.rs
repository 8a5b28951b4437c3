//! Native notification dispatch.
//!
//! # Responsibilities
//! - Translate a [`Notification`] into the platform's notifier command
//! - Dispatch fire-and-forget on a spawned task
//! - Log failures; never surface them to the monitor
//!
//! # Design Decisions
//! - Notifications go through an external command, same dispatch mechanism
//!   as DNS-cache flushing, so there is one OS-integration surface
//! - Platforms without a known notifier command degrade to a log line

use tokio::process::Command;

use super::{EventSink, Notification};

/// [`EventSink`] backed by the platform's native notification command.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    enabled: bool,
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(enabled: bool, app_name: String) -> Self {
        Self { enabled, app_name }
    }
}

impl EventSink for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        if !self.enabled {
            tracing::debug!(title = %notification.title, "notifications disabled, skipping");
            return;
        }

        let Some(mut command) = notifier_command(&self.app_name, notification) else {
            tracing::info!(
                title = %notification.title,
                "no native notifier on this platform"
            );
            return;
        };

        let title = notification.title.clone();
        tokio::spawn(async move {
            match command.output().await {
                Ok(output) if output.status.success() => {}
                Ok(output) => tracing::warn!(
                    %title,
                    status = %output.status,
                    "notification command exited with failure"
                ),
                Err(error) => tracing::warn!(%title, %error, "notification dispatch failed"),
            }
        });
    }
}

/// Build the platform notifier invocation, if the platform has one.
fn notifier_command(app_name: &str, notification: &Notification) -> Option<Command> {
    match std::env::consts::OS {
        "linux" => {
            let mut command = Command::new("notify-send");
            command
                .arg("--app-name")
                .arg(app_name)
                .arg(&notification.title)
                .arg(&notification.message);
            Some(command)
        }
        "macos" => {
            // osascript takes the payload as an AppleScript literal.
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                applescript_escape(&notification.message),
                applescript_escape(&notification.title),
            );
            let mut command = Command::new("osascript");
            command.arg("-e").arg(script);
            Some(command)
        }
        _ => None,
    }
}

fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
