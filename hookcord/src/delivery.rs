//! Background delivery of notifications to Discord.
//!
//! Webhook handlers hand finished notifications to a [`Dispatcher`] and
//! respond right away. The worker starts one task per notification as soon
//! as it arrives, so a slow Discord call never holds up the ones after it.
//! Each outcome goes to a [`DeliveryObserver`].
//!
//! ## Lifecycle
//!
//! ```text
//! handler → Dispatcher::dispatch() → worker → JoinSet task → DiscordClient::send() → observer
//! ```
//!
//! The worker exits once every `Dispatcher` clone is dropped and every
//! in-flight task has finished, so awaiting its handle after the server stops
//! flushes every accepted notification.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{error, info};

use crate::discord::{DeliveryError, DiscordClient};
use crate::notify::Notification;

/// A notification bound for one Discord webhook.
#[derive(Clone)]
pub struct DeliveryJob {
    pub webhook_url: String,
    pub notification: Notification,
}

// The webhook URL embeds Discord's token.
impl std::fmt::Debug for DeliveryJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryJob")
            .field("webhook_url", &"<REDACTED>")
            .field("notification", &self.notification)
            .finish()
    }
}

/// Receives the outcome of every delivery attempt.
pub trait DeliveryObserver: Send + Sync {
    fn delivered(&self, job: &DeliveryJob);
    fn failed(&self, job: &DeliveryJob, error: &DeliveryError);
}

/// Observer that writes outcomes to the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DeliveryObserver for TracingObserver {
    fn delivered(&self, job: &DeliveryJob) {
        info!(title = %job.notification.title, "discord_delivery_complete");
    }

    fn failed(&self, job: &DeliveryJob, error: &DeliveryError) {
        error!(
            title = %job.notification.title,
            is_timeout = error.is_timeout(),
            error = %error,
            "discord_delivery_failed"
        );
    }
}

/// The delivery worker is gone; the job is handed back.
#[derive(Debug, Error)]
#[error("delivery worker has stopped")]
pub struct DispatchError(pub DeliveryJob);

/// Cloneable handle for queueing deliveries.
#[derive(Clone)]
pub struct Dispatcher {
    sender: UnboundedSender<DeliveryJob>,
}

impl Dispatcher {
    /// Start the delivery worker.
    ///
    /// Returns the handle used to queue jobs and the worker's join handle.
    pub fn spawn(
        client: DiscordClient,
        observer: Arc<dyn DeliveryObserver>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = unbounded_channel();
        let worker = tokio::spawn(run_worker(receiver, client, observer));
        info!("delivery_worker_started");
        (Self { sender }, worker)
    }

    /// Hand a job to the worker. Never waits on the network.
    pub fn dispatch(&self, job: DeliveryJob) -> Result<(), DispatchError> {
        self.sender.send(job).map_err(|e| DispatchError(e.0))
    }
}

async fn run_worker(
    mut receiver: UnboundedReceiver<DeliveryJob>,
    client: DiscordClient,
    observer: Arc<dyn DeliveryObserver>,
) {
    let mut in_flight = JoinSet::new();
    let mut tally = Tally::default();

    loop {
        tokio::select! {
            job = receiver.recv() => match job {
                Some(job) => {
                    in_flight.spawn(deliver(client.clone(), observer.clone(), job));
                }
                None => break,
            },
            Some(outcome) = in_flight.join_next(), if !in_flight.is_empty() => {
                tally.record(outcome);
            }
        }
    }

    info!(in_flight = in_flight.len(), "delivery_worker_flushing");
    while let Some(outcome) = in_flight.join_next().await {
        tally.record(outcome);
    }

    info!(
        delivered = tally.delivered,
        failed = tally.failed,
        "delivery_worker_stopped"
    );
}

/// Post one job and report it. Returns whether Discord accepted it.
async fn deliver(
    client: DiscordClient,
    observer: Arc<dyn DeliveryObserver>,
    job: DeliveryJob,
) -> bool {
    match client.send(&job.webhook_url, &job.notification).await {
        Ok(()) => {
            observer.delivered(&job);
            true
        }
        Err(e) => {
            observer.failed(&job, &e);
            false
        }
    }
}

#[derive(Default)]
struct Tally {
    delivered: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, outcome: Result<bool, JoinError>) {
        match outcome {
            Ok(true) => self.delivered += 1,
            Ok(false) => self.failed += 1,
            Err(e) => {
                self.failed += 1;
                error!(error = %e, "delivery_task_panicked");
            }
        }
    }
}
