//! Config file loading and its effect on presentation.

use std::fs;

use tempfile::tempdir;

use locpopup_controller::{ConfigError, LocpopupConfig, PopupView, Rgba};
use locpopup_types::{Category, PopupState};

#[test]
fn custom_palette_reaches_the_view() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r##"
[popup]
notification = "Lint"

[popup.palette]
foreground = "#ffffff"
warning = "#00ff00"
"##,
    )
    .unwrap();

    let config = LocpopupConfig::load_from(&path).unwrap();
    let view = PopupView::from_state(
        &PopupState::shown(Category::Warning, "unused"),
        &config.popup.palette,
    )
    .unwrap();

    assert_eq!(config.popup.notification, "Lint");
    assert_eq!(view.foreground, Rgba::rgb(255, 255, 255));
    assert_eq!(view.badge.unwrap().background.css(), "rgba(0, 255, 0, 1)");
    assert_eq!(view.background.to_string(), "#181d22");
}

#[test]
fn unknown_color_syntax_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[popup.palette]\nerror = \"rgb(1,2,3)\"\n").unwrap();

    let err = LocpopupConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}
