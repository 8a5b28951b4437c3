//! Append-only audit log.
//!
//! # Responsibilities
//! - Append one UTF-8 record per line, suffixed with a wall-clock timestamp
//! - Render connectivity transitions as `Connection {LOST|RESTORED}` records
//! - Keep append failures operational: report and continue, never retry
//!
//! # Design Decisions
//! - Open-append-close per record; the file stays greppable and survives
//!   external truncation or deletion between records
//! - One timestamp format for the whole run

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::monitor::machine::TransitionKind;

/// Timestamp suffix format, consistent within one run.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Writer for the append-only audit log.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, suffixed with ` :: {timestamp}`.
    pub async fn append(&self, text: &str) -> io::Result<()> {
        let line = format!("{} :: {}\n", text, Local::now().format(TIMESTAMP_FORMAT));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await
    }

    /// Append a connectivity transition record.
    pub async fn append_status(&self, kind: TransitionKind) -> io::Result<()> {
        self.append(&format!("Connection {}", kind.log_token()))
            .await
    }

    /// Append, reporting any failure to the operational log instead of the
    /// caller. Audit writes must never take the monitor down.
    pub async fn append_lossy(&self, text: &str) {
        if let Err(error) = self.append(text).await {
            tracing::error!(path = %self.path.display(), %error, "audit log append failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_one_suffixed_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("netprobe_log.txt"));

        log.append("netprobe initialized").await.unwrap();
        log.append_status(TransitionKind::Lost).await.unwrap();
        log.append_status(TransitionKind::Restored).await.unwrap();

        let content = tokio::fs::read_to_string(log.path()).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("netprobe initialized :: "));
        assert!(lines[1].starts_with("Connection LOST :: "));
        assert!(lines[2].starts_with("Connection RESTORED :: "));
    }

    #[tokio::test]
    async fn append_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");
        assert!(!path.exists());

        AuditLog::new(path.clone()).append("hello").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn append_lossy_swallows_write_errors() {
        // Parent directory does not exist, so the open fails.
        let log = AuditLog::new(PathBuf::from("/nonexistent-dir/netprobe_log.txt"));
        log.append_lossy("should not panic").await;
    }
}
