//! OS-conditional external command dispatch.
//!
//! # Responsibilities
//! - Flush the local DNS cache with the platform's resolver command
//! - Open the audit log with the platform's file opener
//! - Record every outcome in the audit log; never crash the core process
//!
//! # Design Decisions
//! - Command output is captured and written to the audit log verbatim,
//!   success and failure alike
//! - Unsupported platforms get an explicit audit record, not an error

use tokio::process::Command;

use crate::sink::AuditLog;

/// Flush the local DNS cache and record the outcome in the audit log.
pub async fn clear_dns_cache(audit: &AuditLog) {
    let (program, args): (&str, &[&str]) = match std::env::consts::OS {
        "windows" => ("ipconfig", &["/flushdns"]),
        "macos" => ("sudo", &["killall", "-HUP", "mDNSResponder"]),
        "linux" => ("sudo", &["resolvectl", "flush-caches"]),
        _ => {
            audit
                .append_lossy("OS doesn't support DNS cache clearing")
                .await;
            return;
        }
    };

    match Command::new(program).args(args).output().await {
        Err(error) => {
            audit
                .append_lossy(&format!("Error clearing DNS cache: {error}"))
                .await;
        }
        Ok(output) if !output.status.success() => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            audit
                .append_lossy(&format!(
                    "Error clearing DNS cache: {program} exited with {}: {}",
                    output.status,
                    stderr.trim()
                ))
                .await;
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                audit
                    .append_lossy(&format!(
                        "STDERR while clearing DNS cache: {}",
                        stderr.trim()
                    ))
                    .await;
                return;
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            audit
                .append_lossy(&format!("DNS cache cleared: {}", stdout.trim()))
                .await;
        }
    }
}

/// Open the audit log with the platform file opener, creating a placeholder
/// file first if the log went missing.
pub async fn open_log_file(audit: &AuditLog) {
    let path = audit.path();

    if !path.exists() {
        let placeholder = "Log file was absent or deleted before opening; created a blank one.\n";
        if let Err(error) = tokio::fs::write(path, placeholder).await {
            tracing::error!(path = %path.display(), %error, "failed to recreate audit log");
            return;
        }
    }

    let mut command = match std::env::consts::OS {
        "windows" => {
            // `start` is a cmd builtin; the empty string is its window title.
            let mut command = Command::new("cmd");
            command.arg("/C").arg("start").arg("").arg(path);
            command
        }
        "macos" => {
            let mut command = Command::new("open");
            command.arg(path);
            command
        }
        _ => {
            let mut command = Command::new("xdg-open");
            command.arg(path);
            command
        }
    };

    if let Err(error) = command.spawn() {
        tracing::error!(path = %path.display(), %error, "failed to open audit log");
    }
}
