//! The controller pass.
//!
//! A single mutex guards the displayed [`PopupState`] and the last counts. It
//! is taken at the start of a pass and released only after the notification
//! went out, so passes never interleave and state transitions happen in the
//! order passes acquire the lock. Readers take the same lock and therefore
//! never observe a half-applied pass.

use std::sync::{Mutex, MutexGuard, PoisonError};

use locpopup_host::{EditorHost, PassError, QueryClient};
use locpopup_types::{AggregateCounts, PopupState};

use crate::aggregate::aggregate;
use crate::select::select_nearest;
use crate::sink::PopupSink;
use crate::store::PopupStore;

/// How a pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// An entry on the cursor line is displayed.
    Shown,
    /// The cursor line has no diagnostics.
    NoCandidate,
    /// The host could not be read, or a guard applies. The popup is hidden.
    Aborted(PassError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub outcome: PassOutcome,
    /// Whether this pass signalled a redraw.
    pub notified: bool,
}

#[derive(Default)]
struct PassState {
    popup: PopupStore,
    /// Last counts forwarded to the sink; `None` until a pass reads the list.
    counts: Option<AggregateCounts>,
}

/// Owns the host query capability and the sink; both are injected.
pub struct PopupController<H, S> {
    client: QueryClient<H>,
    sink: S,
    state: Mutex<PassState>,
}

impl<H: EditorHost, S: PopupSink> PopupController<H, S> {
    pub fn new(host: H, sink: S) -> Self {
        Self {
            client: QueryClient::new(host),
            sink,
            state: Mutex::new(PassState::default()),
        }
    }

    pub fn host(&self) -> &H {
        self.client.host()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // A host implementation that panicked mid-pass must not take the
    // controller down with it; the state is valid between any two writes.
    fn lock(&self) -> MutexGuard<'_, PassState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one full pass: query, aggregate, select, diff, notify.
    pub fn run_pass(&self) -> PassReport {
        let mut state = self.lock();

        let snapshot = match self.client.query() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                let notified = self.hide(&mut state);
                tracing::debug!(reason = %err, notified, "Pass aborted");
                return PassReport {
                    outcome: PassOutcome::Aborted(err),
                    notified,
                };
            }
        };

        let entries = snapshot.locations.entries();
        let counts = aggregate(entries);
        if state.counts != Some(counts) {
            state.counts = Some(counts);
            self.sink.lint_counts(counts);
        }

        let Some(entry) = select_nearest(entries, snapshot.cursor) else {
            let notified = self.hide(&mut state);
            tracing::debug!(line = snapshot.cursor.line, notified, "No diagnostic on cursor line");
            return PassReport {
                outcome: PassOutcome::NoCandidate,
                notified,
            };
        };

        let notified = state.popup.show(entry.category(), entry.text());
        if notified {
            self.sink.redraw();
        }
        tracing::debug!(
            line = entry.line(),
            column = entry.column(),
            category = %entry.category(),
            notified,
            "Selected diagnostic"
        );
        PassReport {
            outcome: PassOutcome::Shown,
            notified,
        }
    }

    fn hide(&self, state: &mut PassState) -> bool {
        let changed = state.popup.hide();
        if changed {
            self.sink.redraw();
        }
        changed
    }

    /// Current displayed state. Waits for an in-flight pass.
    #[must_use]
    pub fn popup_state(&self) -> PopupState {
        self.lock().popup.state().clone()
    }

    /// Counts from the last pass that reached the location list.
    #[must_use]
    pub fn counts(&self) -> AggregateCounts {
        self.lock().counts.unwrap_or_default()
    }
}
