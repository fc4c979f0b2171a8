//! Event pump and subscription wiring against the fake editor.

use std::sync::Arc;

use serde_json::json;

use locpopup_controller::{
    ChannelSink, PassOutcome, PopupConfig, PopupController, SinkEvent, install_subscription,
    spawn_pump,
};
use locpopup_host::NvimHost;
use locpopup_types::{AggregateCounts, Category, HostEvent, PopupState};

use crate::common::{FakeNvim, harness, loc};

#[test]
fn subscription_installs_one_autocmd_per_trigger_event() {
    let nvim = Arc::new(FakeNvim::default());
    let host = NvimHost::new(Arc::clone(&nvim));

    assert!(install_subscription(&host, &PopupConfig::default()).unwrap());

    assert_eq!(nvim.methods()[0], "nvim_subscribe");
    let commands = nvim.commands();
    assert_eq!(commands.len(), 7);
    assert_eq!(commands[0], "augroup LocPopup");
    assert_eq!(commands[1], "autocmd!");
    for (command, event) in commands[2..6].iter().zip(HostEvent::ALL) {
        assert_eq!(
            *command,
            format!(r#"autocmd {event} * call rpcnotify(0, "LocPopup", "update", "{event}")"#)
        );
    }
    assert_eq!(commands[6], "augroup END");
}

#[test]
fn disabled_config_makes_no_host_calls() {
    let nvim = Arc::new(FakeNvim::default());
    let host = NvimHost::new(Arc::clone(&nvim));
    let config = PopupConfig {
        enabled: false,
        ..PopupConfig::default()
    };

    assert!(!install_subscription(&host, &config).unwrap());
    assert!(nvim.methods().is_empty());
}

#[tokio::test]
async fn notifications_drive_passes_in_order() {
    let (nvim, sink, controller) = harness();
    let controller = Arc::new(controller);
    let (pump, task) = spawn_pump(Arc::clone(&controller), 16);
    nvim.edit(|s| {
        s.cursor = (5, 0);
        s.loclist = json!([loc(5, 3, "E", "bad"), loc(6, 1, "W", "unused")]);
    });

    let update = |event: &str| vec![json!("update"), json!(event)];
    assert!(pump.deliver("LocPopup", "LocPopup", &update("CursorMoved")).await.unwrap());
    assert!(pump.deliver("LocPopup", "LocPopup", &update("CursorHold")).await.unwrap());
    assert!(!pump.deliver("LocPopup", "OtherPlugin", &update("CursorHold")).await.unwrap());

    // Runs after both queued passes.
    let report = pump.request(None).await.unwrap();
    assert_eq!(report.outcome, PassOutcome::Shown);
    assert!(!report.notified);
    assert_eq!(sink.redraws(), 1);
    // Counts never changed, so they went out once.
    assert_eq!(sink.counts().len(), 1);

    drop(pump);
    task.await.unwrap();
}

#[tokio::test]
async fn cursor_movement_across_lines() {
    let (nvim, sink, controller) = harness();
    let controller = Arc::new(controller);
    let (pump, _task) = spawn_pump(Arc::clone(&controller), 4);
    nvim.edit(|s| s.loclist = json!([loc(2, 1, "E", "two"), loc(4, 1, "W", "four")]));

    let mut seen = Vec::new();
    for line in [1, 2, 2, 3, 4] {
        nvim.edit(|s| s.cursor = (line, 0));
        pump.request(Some(HostEvent::CursorMoved)).await.unwrap();
        seen.push(controller.popup_state());
    }

    assert_eq!(
        seen,
        [
            PopupState::hidden(),
            PopupState::shown(Category::Error, "two"),
            PopupState::shown(Category::Error, "two"),
            PopupState::hidden(),
            PopupState::shown(Category::Warning, "four"),
        ]
    );
    // Line 1 starts hidden, so only the show/hide/show transitions signal.
    assert_eq!(sink.redraws(), 3);
}

#[tokio::test]
async fn channel_sink_reports_counts_before_redraw() {
    let nvim = Arc::new(FakeNvim::default());
    nvim.edit(|s| {
        s.cursor = (1, 0);
        s.loclist = json!([loc(1, 1, "W", "unused")]);
    });
    let (sink, mut signals) = ChannelSink::channel();
    let controller = Arc::new(PopupController::new(NvimHost::new(Arc::clone(&nvim)), sink));
    let (pump, _task) = spawn_pump(controller, 4);

    pump.request(Some(HostEvent::InsertLeave)).await.unwrap();

    assert_eq!(
        signals.recv().await,
        Some(SinkEvent::LintCounts(AggregateCounts {
            errors: 0,
            warnings: 1,
        }))
    );
    assert_eq!(signals.recv().await, Some(SinkEvent::Redraw));
    assert!(signals.try_recv().is_err());
}
