//! Controller passes driven through the Neovim adapter.

use serde_json::json;

use locpopup_controller::{Palette, PassOutcome, PopupView};
use locpopup_host::{HostError, PassError, Query, SkipReason};
use locpopup_types::{AggregateCounts, Category, PopupState};

use crate::common::{harness, loc};

#[test]
fn single_entry_on_cursor_line_is_shown() {
    let (nvim, sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (3, 0);
        s.loclist = json!([loc(3, 4, "E", "bad")]);
    });

    let report = controller.run_pass();

    assert_eq!(report.outcome, PassOutcome::Shown);
    assert_eq!(
        controller.popup_state(),
        PopupState::shown(Category::Error, "bad")
    );
    assert_eq!(sink.redraws(), 1);
}

#[test]
fn queries_follow_the_documented_order() {
    let (nvim, _sink, controller) = harness();
    controller.run_pass();
    assert_eq!(
        nvim.methods(),
        [
            "nvim_get_current_buf",
            "nvim_buf_get_option",
            "nvim_call_function",
            "nvim_get_current_win",
            "nvim_win_get_cursor",
            "nvim_call_function",
        ]
    );
}

#[test]
fn nearest_entry_at_or_left_of_cursor_wins() {
    let (nvim, _sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (7, 6);
        s.loclist = json!([
            loc(7, 2, "W", "col two"),
            loc(7, 10, "E", "col ten"),
            loc(7, 5, "E", "col five")
        ]);
    });
    controller.run_pass();
    assert_eq!(controller.popup_state().text(), "col five");
}

#[test]
fn all_entries_right_of_cursor_falls_back_to_smallest_column() {
    let (nvim, _sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (3, 1);
        s.loclist = json!([loc(3, 10, "E", "ten"), loc(3, 8, "W", "eight")]);
    });
    controller.run_pass();
    assert_eq!(
        controller.popup_state(),
        PopupState::shown(Category::Warning, "eight")
    );
}

#[test]
fn identical_passes_notify_once() {
    let (nvim, sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (2, 0);
        s.loclist = json!([loc(2, 1, "W", "unused")]);
    });
    assert!(controller.run_pass().notified);
    assert!(!controller.run_pass().notified);
    assert_eq!(sink.redraws(), 1);
}

#[test]
fn terminal_buffer_changes_nothing() {
    let (nvim, sink, controller) = harness();
    nvim.edit(|s| {
        s.buftype = "terminal".to_string();
        s.cursor = (1, 0);
        s.loclist = json!([loc(1, 1, "E", "bad")]);
    });

    let report = controller.run_pass();

    assert_eq!(
        report.outcome,
        PassOutcome::Aborted(PassError::Skipped(SkipReason::TerminalBuffer))
    );
    assert_eq!(controller.popup_state(), PopupState::hidden());
    assert_eq!(sink.redraws(), 0);
    assert!(sink.counts().is_empty());
    assert_eq!(nvim.methods().len(), 2);
}

#[test]
fn leaving_normal_mode_hides_the_popup() {
    let (nvim, sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (1, 0);
        s.loclist = json!([loc(1, 1, "E", "bad")]);
    });
    controller.run_pass();

    nvim.edit(|s| s.mode = "i".to_string());
    let report = controller.run_pass();

    assert!(report.notified);
    assert!(!controller.popup_state().is_visible());
    assert_eq!(sink.redraws(), 2);
}

#[test]
fn counts_cover_every_line() {
    let (nvim, sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (50, 0);
        s.loclist = json!([
            loc(1, 1, "E", "a"),
            loc(2, 1, "E", "b"),
            loc(3, 1, "W", "c"),
            loc(4, 1, "I", "d")
        ]);
    });
    let report = controller.run_pass();

    let expected = AggregateCounts {
        errors: 2,
        warnings: 1,
    };
    assert_eq!(report.outcome, PassOutcome::NoCandidate);
    assert_eq!(controller.counts(), expected);
    assert_eq!(sink.counts(), [expected]);
    assert_eq!(expected.status_string(), "E:2 W:1");
}

#[test]
fn disconnected_host_hides_and_reports_the_failing_query() {
    let (nvim, sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (1, 0);
        s.loclist = json!([loc(1, 1, "E", "bad")]);
    });
    controller.run_pass();

    nvim.edit(|s| s.down = true);
    let report = controller.run_pass();

    assert_eq!(
        report.outcome,
        PassOutcome::Aborted(PassError::Host {
            query: Query::BufferKind,
            source: HostError::Disconnected,
        })
    );
    assert!(report.notified);
    assert_eq!(sink.redraws(), 2);
}

#[test]
fn non_array_location_list_is_an_unexpected_shape() {
    let (nvim, _sink, controller) = harness();
    nvim.edit(|s| s.loclist = json!("oops"));

    let report = controller.run_pass();

    assert!(matches!(
        report.outcome,
        PassOutcome::Aborted(PassError::Host {
            query: Query::LocationList,
            source: HostError::UnexpectedShape { .. },
        })
    ));
}

#[test]
fn malformed_records_are_dropped() {
    let (nvim, _sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (4, 0);
        s.loclist = json!([
            { "lnum": 4, "col": "x", "type": "E", "text": "bad col" },
            { "lnum": 4, "col": 1, "text": "no type" },
            loc(4, 2, "W", "kept")
        ]);
    });
    controller.run_pass();
    assert_eq!(
        controller.popup_state(),
        PopupState::shown(Category::Warning, "kept")
    );
    assert_eq!(controller.counts().errors, 0);
}

#[test]
fn displayed_state_maps_to_a_view() {
    let (nvim, _sink, controller) = harness();
    nvim.edit(|s| {
        s.cursor = (9, 3);
        s.loclist = json!([loc(9, 1, "E", "mismatched types")]);
    });
    controller.run_pass();

    let view = PopupView::from_state(&controller.popup_state(), &Palette::default()).unwrap();
    assert_eq!(view.to_line(), "[Error] mismatched types");
    assert_eq!(view.badge.unwrap().background.css(), "rgba(204, 62, 68, 1)");
}
