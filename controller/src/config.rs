//! Popup configuration.
//!
//! ```toml
//! [popup]
//! enabled = true
//! notification = "LocPopup"
//! queue_capacity = 256
//!
//! [popup.palette]
//! foreground = "#cdd3de"
//! background = "#181d22"
//! error = "#cc3e44"
//! warning = "#cbcb41"
//! ```
//!
//! Read from `$LOCPOPUP_CONFIG` when set, else `~/.locpopup/config.toml`.
//! A missing file means defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fs, io};

use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "LOCPOPUP_CONFIG";

pub const DEFAULT_NOTIFICATION: &str = "LocPopup";

/// Pending pass requests the event pump buffers before senders wait.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

fn default_notification() -> String {
    DEFAULT_NOTIFICATION.to_string()
}

const fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocpopupConfig {
    #[serde(default)]
    pub popup: PopupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopupConfig {
    /// Subscribe to trigger events at all. Default: true.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Notification name the host's autocommands send. Also names the
    /// autocommand group, so it must be a plain identifier.
    #[serde(default = "default_notification")]
    pub notification: String,
    /// Bounded backlog of pass requests. Default: 256.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default)]
    pub palette: Palette,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            notification: default_notification(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            palette: Palette::default(),
        }
    }
}

impl PopupConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let valid_name = !self.notification.is_empty()
            && self
                .notification
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(ConfigError::Invalid(format!(
                "popup.notification must be a non-empty identifier, got {:?}",
                self.notification
            )));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "popup.queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl LocpopupConfig {
    /// Load the config file, if there is one.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Read and parse `path`. Failures are returned, not logged; the caller
    /// decides how loud to be.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse config text. Parse errors carry an empty path.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.popup.validate()?;
        Ok(config)
    }
}

/// Config file location: `$LOCPOPUP_CONFIG`, else `~/.locpopup/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".locpopup").join("config.toml"))
}

// ============================================================================
// Colors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rrggbb")]
pub struct ColorParseError(String);

/// An opaque RGB color, written `#rrggbb` in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS form, e.g. `rgba(204, 62, 68, 1)`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, 1)", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Popup colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub foreground: Rgba,
    pub background: Rgba,
    /// Badge background for errors.
    pub error: Rgba,
    /// Badge background for warnings.
    pub warning: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgba::rgb(205, 211, 222),
            background: Rgba::rgb(24, 29, 34),
            error: Rgba::rgb(204, 62, 68),
            warning: Rgba::rgb(203, 203, 65),
        }
    }
}
