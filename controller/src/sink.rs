//! Outbound signals to the rendering layer.

use std::sync::Arc;

use tokio::sync::mpsc;

use locpopup_types::AggregateCounts;

/// Receiver of controller signals.
///
/// Called with the pass lock held: implementations must not call back into
/// the controller synchronously. Post to a queue and read state from there.
pub trait PopupSink: Send + Sync {
    /// The displayed popup state changed; read it and redraw.
    fn redraw(&self);

    /// Error/warning totals, sent when a pass that reached the host's location
    /// list computed different totals than the last ones sent.
    fn lint_counts(&self, _counts: AggregateCounts) {}
}

impl<S: PopupSink + ?Sized> PopupSink for Arc<S> {
    fn redraw(&self) {
        (**self).redraw();
    }

    fn lint_counts(&self, counts: AggregateCounts) {
        (**self).lint_counts(counts);
    }
}

/// A signal as delivered through [`ChannelSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Redraw,
    LintCounts(AggregateCounts),
}

/// Forwards signals onto an unbounded channel for a UI loop to drain.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<SinkEvent>,
}

impl ChannelSink {
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SinkEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: SinkEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!(?event, "Render loop gone, dropping signal");
        }
    }
}

impl PopupSink for ChannelSink {
    fn redraw(&self) {
        self.send(SinkEvent::Redraw);
    }

    fn lint_counts(&self, counts: AggregateCounts) {
        self.send(SinkEvent::LintCounts(counts));
    }
}
