//! Scripted session replay.
//!
//! A session is a JSON list of steps. Each step updates what the scripted
//! host answers, then runs one pass through the event pump:
//!
//! ```json
//! { "steps": [
//!     { "event": "CursorMoved", "cursor": [3, 0],
//!       "loclist": [{ "lnum": 3, "col": 4, "type": "E", "text": "bad" }] },
//!     { "event": "InsertEnter", "mode": "i" },
//!     { "fail": "location_list" }
//! ] }
//! ```
//!
//! Overrides persist into later steps; `fail` applies to its own step only.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;

use locpopup_controller::{
    ChannelSink, PassOutcome, PassReport, PopupConfig, PopupController, PopupView, SinkEvent,
    spawn_pump,
};
use locpopup_host::{EditorHost, HostError, Query};
use locpopup_types::{CursorPosition, HostEvent};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Session {
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("parsing session JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Trigger event reported with the pass. Informational only.
    pub event: Option<HostEvent>,
    pub buftype: Option<String>,
    pub mode: Option<String>,
    /// `[line, column]`, line 1-indexed, column 0-indexed.
    pub cursor: Option<[i64; 2]>,
    pub loclist: Option<Vec<Value>>,
    /// Make this query fail for this step.
    pub fail: Option<Query>,
}

#[derive(Debug)]
struct HostScript {
    buftype: String,
    mode: String,
    cursor: CursorPosition,
    loclist: Vec<Value>,
    fail: Option<Query>,
}

impl Default for HostScript {
    fn default() -> Self {
        Self {
            buftype: String::new(),
            mode: "n".to_string(),
            cursor: CursorPosition::new(1, 0),
            loclist: Vec::new(),
            fail: None,
        }
    }
}

/// Editor host that answers from the current step's script.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    script: Mutex<HostScript>,
}

impl ScriptedHost {
    fn script(&self) -> MutexGuard<'_, HostScript> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, step: &Step) {
        let mut script = self.script();
        if let Some(buftype) = &step.buftype {
            script.buftype.clone_from(buftype);
        }
        if let Some(mode) = &step.mode {
            script.mode.clone_from(mode);
        }
        if let Some([line, column]) = step.cursor {
            script.cursor = CursorPosition::new(line, column);
        }
        if let Some(loclist) = &step.loclist {
            script.loclist.clone_from(loclist);
        }
        script.fail = step.fail;
    }

    fn answer<T>(&self, query: Query, read: impl FnOnce(&HostScript) -> T) -> Result<T, HostError> {
        let script = self.script();
        if script.fail == Some(query) {
            return Err(HostError::Disconnected);
        }
        Ok(read(&script))
    }
}

impl EditorHost for ScriptedHost {
    fn buffer_kind(&self) -> Result<String, HostError> {
        self.answer(Query::BufferKind, |s| s.buftype.clone())
    }

    fn mode(&self) -> Result<String, HostError> {
        self.answer(Query::Mode, |s| s.mode.clone())
    }

    fn cursor_position(&self) -> Result<CursorPosition, HostError> {
        self.answer(Query::Cursor, |s| s.cursor)
    }

    fn location_list(&self) -> Result<Vec<Value>, HostError> {
        self.answer(Query::LocationList, |s| s.loclist.clone())
    }
}

/// Run every step through a fresh controller. Returns one line per pass and
/// a final status line.
pub async fn replay(session: Session, config: &PopupConfig) -> Result<Vec<String>> {
    let host = Arc::new(ScriptedHost::default());
    let (sink, mut signals) = ChannelSink::channel();
    let controller = Arc::new(PopupController::new(Arc::clone(&host), sink));
    let (pump, task) = spawn_pump(Arc::clone(&controller), config.queue_capacity);

    let mut lines = Vec::with_capacity(session.steps.len() + 1);
    for (index, step) in session.steps.iter().enumerate() {
        host.apply(step);
        let report = pump
            .request(step.event)
            .await
            .with_context(|| format!("running step {}", index + 1))?;
        let redrawn = drain_redraws(&mut signals) > 0;
        let view = PopupView::from_state(&controller.popup_state(), &config.palette);
        lines.push(describe(index + 1, step.event, &report, view.as_ref(), redrawn));
    }

    drop(pump);
    task.await.context("event pump failed")?;

    let counts = controller.counts();
    tracing::info!(
        steps = session.steps.len(),
        errors = counts.errors,
        warnings = counts.warnings,
        "Replay finished"
    );
    lines.push(counts.status_string());
    Ok(lines)
}

fn drain_redraws(signals: &mut mpsc::UnboundedReceiver<SinkEvent>) -> usize {
    let mut redraws = 0;
    while let Ok(signal) = signals.try_recv() {
        if signal == SinkEvent::Redraw {
            redraws += 1;
        }
    }
    redraws
}

fn describe(
    index: usize,
    event: Option<HostEvent>,
    report: &PassReport,
    view: Option<&PopupView>,
    redrawn: bool,
) -> String {
    let trigger = event.map_or_else(|| "-".to_string(), |e| e.to_string());
    let shown = match (&report.outcome, view) {
        (PassOutcome::Aborted(err), _) => format!("aborted ({err})"),
        (_, Some(view)) => view.to_line(),
        (_, None) => "hidden".to_string(),
    };
    let suffix = if redrawn { " (redraw)" } else { "" };
    format!("#{index} {trigger}: {shown}{suffix}")
}
