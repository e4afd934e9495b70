//! Append-only diagnostic log for upstream failures
//!
//! Client responses carry only a generic message; the full error, its cause
//! chain and the captured stack (when backtraces are enabled) land here. Entries are appended under a mutex so concurrent
//! failures never interleave within one entry.

use biztone_common::Audience;
use chrono::{SecondsFormat, Utc};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Handle to the diagnostic log file (cheap to clone)
#[derive(Clone, Debug)]
pub struct ErrorLog {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one failure entry
    ///
    /// Write failures are reported through tracing only.
    pub async fn record(&self, audience: Audience, error: anyhow::Error) {
        let entry = format_entry(audience, &error);

        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.append(entry.as_bytes()).await {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write error log entry"
            );
        }
    }

    async fn append(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }
}

fn format_entry(audience: Audience, error: &anyhow::Error) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut entry = format!("[{}] target={} Error: {}\n", timestamp, audience, error);
    for cause in error.chain().skip(1) {
        entry.push_str(&format!("  Caused by: {}\n", cause));
    }
    entry.push_str(&stack_section(error.backtrace()));
    entry.push('\n');
    entry
}

/// Stack trace block; anyhow only captures one under `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`
fn stack_section(backtrace: &Backtrace) -> String {
    match backtrace.status() {
        BacktraceStatus::Captured => format!("Stack:\n{}\n", backtrace),
        _ => "Stack: not captured (set RUST_BACKTRACE=1 to record one)\n".to_string(),
    }
}
