//! Bounded worker pool that executes dispatches in the background.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use crate::config::DispatcherConfig;
use crate::metrics;
use crate::notifier::Notifier;
use crate::ticket::TicketEvent;
use crate::ticketing::TicketingApi;

use super::job::run_dispatch;
use super::types::SubmitError;

/// Handle for submitting accepted ticket events to the worker pool.
///
/// Events are queued on a bounded channel and picked up by a fixed number of
/// workers. When the queue is full, submission fails immediately instead of
/// blocking the webhook handler.
#[derive(Clone)]
pub struct JobDispatcher {
    tx: mpsc::Sender<TicketEvent>,
}

impl JobDispatcher {
    pub fn new(
        config: &DispatcherConfig,
        api: Arc<dyn TicketingApi>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<TicketEvent>(config.queue_capacity);
        let rx = Arc::new(Mutex::new(rx));

        for worker_id in 0..config.workers {
            let rx = Arc::clone(&rx);
            let api = Arc::clone(&api);
            let notifier = notifier.clone();
            tokio::spawn(async move {
                debug!(worker_id = worker_id, "Dispatch worker started");
                loop {
                    // Hold the lock only while receiving so idle workers
                    // don't serialize running dispatches.
                    let event = rx.lock().await.recv().await;
                    let Some(event) = event else {
                        debug!(worker_id = worker_id, "Dispatch worker stopping");
                        break;
                    };
                    run_dispatch(&event, api.as_ref(), notifier.as_deref()).await;
                }
            });
        }

        info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Dispatcher started"
        );

        Self { tx }
    }

    /// Queue an event for background dispatch.
    pub fn submit(&self, event: TicketEvent) -> Result<(), SubmitError> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                metrics::QUEUE_REJECTIONS.inc();
                SubmitError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }

    #[cfg(test)]
    fn without_workers(capacity: usize) -> (Self, mpsc::Receiver<TicketEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}
