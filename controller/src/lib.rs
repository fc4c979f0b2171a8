//! Nearest-diagnostic popup controller.
//!
//! One pass per trigger event: query the host, count errors and warnings,
//! pick the diagnostic nearest the cursor on its line, diff against what is
//! displayed, and signal the rendering layer only when that changed.
//!
//! ```text
//! PumpHandle ─▶ event pump task ─▶ PopupController::run_pass
//!                                   ├─ QueryClient::query
//!                                   ├─ aggregate      ─▶ PopupSink::lint_counts
//!                                   ├─ select_nearest
//!                                   └─ PopupStore diff ─▶ PopupSink::redraw
//! ```

pub mod aggregate;
pub mod config;
pub mod controller;
pub mod presentation;
pub mod pump;
pub mod select;
pub mod sink;
pub mod store;

pub use aggregate::aggregate;
pub use config::{ConfigError, LocpopupConfig, Palette, PopupConfig, Rgba};
pub use controller::{PassOutcome, PassReport, PopupController};
pub use presentation::{Badge, PopupView};
pub use pump::{PumpClosed, PumpHandle, install_subscription, spawn_pump};
pub use select::select_nearest;
pub use sink::{ChannelSink, PopupSink, SinkEvent};
pub use store::PopupStore;
