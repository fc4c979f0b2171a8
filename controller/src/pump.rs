//! Event pump: a single task that turns trigger events into passes.
//!
//! Events arrive through a bounded channel and are handled one at a time, so
//! passes run strictly in arrival order. Each pass runs on the blocking pool
//! because host queries block.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use locpopup_host::{EditorHost, EventSource, HostError, parse_notification};
use locpopup_types::HostEvent;

use crate::config::PopupConfig;
use crate::controller::{PassReport, PopupController};
use crate::sink::PopupSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event pump closed")]
pub struct PumpClosed;

struct PassRequest {
    event: Option<HostEvent>,
    reply: Option<oneshot::Sender<PassReport>>,
}

/// Sending half of the pump. Cheap to clone; the pump stops once every
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct PumpHandle {
    tx: mpsc::Sender<PassRequest>,
}

impl PumpHandle {
    /// Queue a pass without waiting for it to run. While the queue is full
    /// this waits for room; events are never dropped.
    pub async fn fire(&self, event: Option<HostEvent>) -> Result<(), PumpClosed> {
        self.tx
            .send(PassRequest { event, reply: None })
            .await
            .map_err(|_| PumpClosed)
    }

    /// Queue a pass and wait for its report.
    pub async fn request(&self, event: Option<HostEvent>) -> Result<PassReport, PumpClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(PassRequest {
                event,
                reply: Some(reply),
            })
            .await
            .map_err(|_| PumpClosed)?;
        rx.await.map_err(|_| PumpClosed)
    }

    /// Route an inbound host notification. Returns whether it asked for a
    /// pass (and one was queued).
    pub async fn deliver(
        &self,
        notification: &str,
        method: &str,
        args: &[serde_json::Value],
    ) -> Result<bool, PumpClosed> {
        let Some(update) = parse_notification(notification, method, args) else {
            return Ok(false);
        };
        self.fire(update.event).await?;
        Ok(true)
    }
}

/// Start the pump for `controller`. `capacity` bounds the request backlog.
pub fn spawn_pump<H, S>(
    controller: Arc<PopupController<H, S>>,
    capacity: usize,
) -> (PumpHandle, JoinHandle<()>)
where
    H: EditorHost + 'static,
    S: PopupSink + 'static,
{
    let (tx, mut rx) = mpsc::channel::<PassRequest>(capacity.max(1));
    let task = tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let pass_controller = Arc::clone(&controller);
            match tokio::task::spawn_blocking(move || pass_controller.run_pass()).await {
                Ok(report) => {
                    tracing::trace!(event = ?request.event, ?report, "Pass finished");
                    if let Some(reply) = request.reply {
                        let _ = reply.send(report);
                    }
                }
                // Dropping the reply tells a waiting requester the pass is lost.
                Err(e) => tracing::warn!(event = ?request.event, "Pass task failed: {e}"),
            }
        }
        tracing::debug!("Event pump stopped");
    });
    (PumpHandle { tx }, task)
}

/// Register trigger events with the host unless the popup is disabled.
/// Returns whether a subscription was made.
pub fn install_subscription<E: EventSource>(
    source: &E,
    config: &PopupConfig,
) -> Result<bool, HostError> {
    if !config.enabled {
        tracing::info!("Diagnostic popup disabled, not subscribing");
        return Ok(false);
    }
    source.subscribe(&config.notification)?;
    Ok(true)
}
