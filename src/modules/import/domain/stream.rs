use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::engine::BatchImportEngine;
use super::progress::{ImportEvent, ProgressTracker};
use super::types::ImportRequest;

/// Consumable event sequence for one running import job.
///
/// Guarantees a `connected` event before work starts and exactly one
/// terminal event (`complete` or `error`), even when the job fails or its
/// task dies.
pub struct ImportProgressStream {
    receiver: mpsc::UnboundedReceiver<ImportEvent>,
    cancel: CancellationToken,
}

impl ImportProgressStream {
    /// Spawn the job and return its event stream.
    pub fn spawn(engine: Arc<BatchImportEngine>, request: ImportRequest) -> Self {
        let cancel = CancellationToken::new();
        let stream_cancel = cancel.clone();
        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let _ = sender.send(ImportEvent::Connected {
                message: format!("Import of {} started", request.store_url),
            });

            // The job runs on its own task so a panic inside it still
            // surfaces as a terminal error event here.
            let job_sender = sender.clone();
            let job = tokio::spawn(async move {
                let mut tracker = ProgressTracker::new(job_sender);
                engine.run(&request, &mut tracker, &cancel).await
            });

            let terminal = match job.await {
                Ok(Ok(outcome)) => ImportEvent::Complete { data: outcome },
                Ok(Err(e)) => ImportEvent::Error {
                    message: e.to_string(),
                },
                Err(e) => ImportEvent::Error {
                    message: format!("Import job aborted: {}", e),
                },
            };
            let _ = sender.send(terminal);
        });

        Self {
            receiver,
            cancel: stream_cancel,
        }
    }

    /// Next event, or `None` once the terminal event has been consumed and
    /// the job is gone.
    pub async fn next_event(&mut self) -> Option<ImportEvent> {
        self.receiver.recv().await
    }

    /// Token that ends the job after its current step.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drain every remaining event, ending with the terminal one.
    pub async fn collect_events(mut self) -> Vec<ImportEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            let terminal = matches!(
                event,
                ImportEvent::Complete { .. } | ImportEvent::Error { .. }
            );
            events.push(event);
            if terminal {
                break;
            }
        }
        events
    }
}
