use serde::Serialize;
use tokio::sync::mpsc;

use crate::shared::utils::logger::LogContext;

use super::types::{ImportOutcome, ImportProgress};

/// Events published over a job's progress channel. Exactly one of
/// `complete`/`error` terminates the sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImportEvent {
    Connected { message: String },
    Progress(ImportProgress),
    Log { message: String },
    Complete { data: ImportOutcome },
    Error { message: String },
}

/// Owns a job's mutable progress record and publishes snapshots after every
/// mutation. One tracker per job; nothing is shared across jobs.
pub struct ProgressTracker {
    progress: ImportProgress,
    created: usize,
    updated: usize,
    sender: Option<mpsc::UnboundedSender<ImportEvent>>,
}

impl ProgressTracker {
    pub fn new(sender: mpsc::UnboundedSender<ImportEvent>) -> Self {
        Self {
            progress: ImportProgress::default(),
            created: 0,
            updated: 0,
            sender: Some(sender),
        }
    }

    /// Tracker with no subscriber; progress still accumulates for the final
    /// outcome and log lines still reach the logger.
    pub fn detached() -> Self {
        Self {
            progress: ImportProgress::default(),
            created: 0,
            updated: 0,
            sender: None,
        }
    }

    pub fn snapshot(&self) -> ImportProgress {
        self.progress.clone()
    }

    pub fn set_total(&mut self, total: usize) {
        self.progress.total = total;
        self.emit_progress();
    }

    pub fn begin_item(&mut self, label: &str) {
        self.progress.current += 1;
        self.progress.current_item = label.to_string();
        LogContext::import_progress(self.progress.current, self.progress.total, label);
        self.emit_progress();
    }

    pub fn record_created(&mut self) {
        self.progress.success += 1;
        self.created += 1;
        self.emit_progress();
    }

    pub fn record_updated(&mut self) {
        self.progress.success += 1;
        self.updated += 1;
        self.emit_progress();
    }

    pub fn record_skipped(&mut self, message: String) {
        self.progress.skipped += 1;
        self.append_log(message);
        self.emit_progress();
    }

    pub fn record_failed(&mut self, message: String) {
        self.progress.failed += 1;
        self.append_log(message);
        self.emit_progress();
    }

    /// Append a status line and publish it as a discrete log event.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.append_log(message.clone());
        self.emit(ImportEvent::Log { message });
    }

    pub fn outcome(&self, duration_ms: u64) -> ImportOutcome {
        ImportOutcome {
            total: self.progress.total,
            success: self.progress.success,
            created: self.created,
            updated: self.updated,
            failed: self.progress.failed,
            skipped: self.progress.skipped,
            duration_ms,
        }
    }

    fn append_log(&mut self, message: String) {
        log::info!("{}", message);
        self.progress.logs.push(message);
    }

    fn emit_progress(&self) {
        self.emit(ImportEvent::Progress(self.progress.clone()));
    }

    fn emit(&self, event: ImportEvent) {
        if let Some(sender) = &self.sender {
            // A dropped receiver only means nobody is watching anymore.
            if sender.send(event).is_err() {
                log::debug!("Progress subscriber went away, event dropped");
            }
        }
    }
}
