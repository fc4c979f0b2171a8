//! locpopup CLI - replays a scripted editor session through the popup
//! controller.
//!
//! ```text
//! main() -> load config -> Session::from_path() -> replay() -> stdout
//!                                                    |
//!                                                    v
//!                              ScriptedHost + ChannelSink + event pump
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); pass results go to stdout.

mod replay;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use locpopup_controller::LocpopupConfig;

use crate::replay::{Session, replay};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn session_path() -> Result<PathBuf> {
    let mut args = env::args_os().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: locpopup <session.json>");
    };
    if args.next().is_some() {
        bail!("usage: locpopup <session.json>");
    }
    Ok(PathBuf::from(path))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match LocpopupConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Using default config: {e}");
            LocpopupConfig::default()
        }
    };

    let path = session_path()?;
    let session = Session::from_path(&path)
        .with_context(|| format!("loading session {}", path.display()))?;

    for line in replay(session, &config.popup).await? {
        println!("{line}");
    }
    Ok(())
}
