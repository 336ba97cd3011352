//! Process-wide colour theme preference
//!
//! The preference is one of `light`, `dark` or `system`, kept in a small text
//! file. `system` resolves against the terminal background advertised in
//! `COLORFGBG`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

static THEME: OnceLock<RwLock<ThemeState>> = OnceLock::new();

/// Stored theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Always light
    Light,
    /// Always dark
    Dark,
    /// Follow the terminal
    #[default]
    System,
}

/// Concrete appearance after resolving [`ThemeMode::System`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    /// Dark ink on a light background
    Light,
    /// Light ink on a dark background
    Dark,
}

impl ThemeMode {
    /// Lowercase identifier used in the preference file
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Resolve against a known system appearance
    pub fn resolve_with(self, system: Appearance) -> Appearance {
        match self {
            ThemeMode::Light => Appearance::Light,
            ThemeMode::Dark => Appearance::Dark,
            ThemeMode::System => system,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" | "auto" => Ok(ThemeMode::System),
            other => Err(format!(
                "Unknown theme '{other}', expected light, dark or system"
            )),
        }
    }
}

/// Appearance advertised by the terminal, light when unknown
pub fn system_appearance() -> Appearance {
    appearance_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
}

/// Parse `COLORFGBG` (`fg;bg` or `fg;default;bg`); backgrounds 0-6 and 8 are dark
pub fn appearance_from_colorfgbg(value: Option<&str>) -> Appearance {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(0..=6 | 8) => Appearance::Dark,
        _ => Appearance::Light,
    }
}

/// Preference file backing the process-wide theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/sjqr/theme`, falling back to `$HOME/.config/sjqr/theme`
    pub fn default_location() -> Option<Self> {
        let base = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(Self::new(base.join("sjqr").join("theme")))
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored mode; missing or unreadable preferences yield `None`
    pub fn load(&self) -> Option<ThemeMode> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match contents.parse() {
            Ok(mode) => Some(mode),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "Ignoring theme preference: {err}");
                None
            }
        }
    }

    /// Persist `mode`
    pub fn save(&self, mode: ThemeMode) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!(
                    "Failed to create theme directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        std::fs::write(&self.path, mode.as_str()).map_err(|e| {
            Error::Config(format!(
                "Failed to persist theme preference {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[derive(Debug)]
struct ThemeState {
    mode: ThemeMode,
    store: Option<ThemeStore>,
}

fn state() -> &'static RwLock<ThemeState> {
    THEME.get_or_init(|| {
        RwLock::new(ThemeState {
            mode: ThemeMode::System,
            store: None,
        })
    })
}

/// Load the stored preference (or `system`) and make it current.
///
/// Calling again re-reads from the new store.
pub fn init(store: Option<ThemeStore>) -> ThemeMode {
    let mode = store
        .as_ref()
        .and_then(ThemeStore::load)
        .unwrap_or_default();

    let mut guard = state().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.mode = mode;
    guard.store = store;
    tracing::debug!(%mode, "Theme initialised");
    mode
}

/// Change the current mode and persist it when a store is configured
pub fn set(mode: ThemeMode) -> Result<()> {
    let mut guard = state().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(store) = &guard.store {
        store.save(mode)?;
    }
    guard.mode = mode;
    Ok(())
}

/// Current mode
pub fn current() -> ThemeMode {
    state()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .mode
}

/// Current mode resolved against the terminal
pub fn resolved() -> Appearance {
    current().resolve_with(system_appearance())
}
