//! sjqr runtime configuration handling
//!
//! Credentials are never read from configuration; only output, rendering and
//! logging preferences live here.

use crate::error::{Error, Result};
use crate::theme::ThemeStore;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File names looked up in the working directory, in order
const LOCAL_FILES: &[&str] = &["sjqr.toml", "sjqr.yaml", "sjqr.yml"];

/// File names looked up under `$XDG_CONFIG_HOME/sjqr`, in order
const XDG_FILES: &[&str] = &["config.toml", "config.yaml"];

fn candidate_paths(cwd: &Path, xdg_config: Option<&Path>) -> Vec<PathBuf> {
    let local = LOCAL_FILES.iter().map(|name| cwd.join(name));
    let xdg = xdg_config
        .into_iter()
        .flat_map(|base| XDG_FILES.iter().map(move |name| base.join("sjqr").join(name)));
    local.chain(xdg).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(Error::Config(format!(
                "Unsupported config format '{other}', expected toml/yaml"
            ))),
        }
    }

    fn parse(self, contents: &str) -> std::result::Result<SjqrConfig, String> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        }
    }
}

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SjqrConfig {
    /// Export configuration
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Theme preference storage
    pub theme: ThemeOptions,
}

impl SjqrConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No sjqr.toml / sjqr.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        let xdg = env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);

        Ok(candidate_paths(&cwd, xdg.as_deref())
            .into_iter()
            .find(|path| path.exists()))
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::of(path)?;
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        format
            .parse(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    fn apply_env_overrides(&mut self) {
        self.export.apply_env_overrides();
        self.logging.apply_env_overrides();
        self.theme.apply_env_overrides();
    }
}

/// Where and how exported artifacts are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory receiving exported files
    pub output_dir: PathBuf,
    /// Export the labeled card (`true`) or the bare QR image (`false`)
    pub labeled: bool,
    /// Also write the canonical JSON next to the image
    pub save_json: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            labeled: true,
            save_json: false,
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("SJQR_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
        if let Some(labeled) = env_flag("SJQR_LABELED") {
            self.labeled = labeled;
        }
        if let Some(save_json) = env_flag("SJQR_SAVE_JSON") {
            self.save_json = save_json;
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `SJQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("SJQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("SJQR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = env_flag("SJQR_LOG_COLOR") {
            self.color = color;
        }
        if let Ok(rotation) = env::var("SJQR_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Theme preference location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOptions {
    /// Preference file; defaults to `$XDG_CONFIG_HOME/sjqr/theme`
    pub file: Option<PathBuf>,
}

impl ThemeOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(file) = env::var("SJQR_THEME_FILE") {
            self.file = if file.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(file))
            };
        }
    }

    /// Store for the configured or default preference file
    pub fn store(&self) -> Option<ThemeStore> {
        match &self.file {
            Some(path) => Some(ThemeStore::new(path)),
            None => ThemeStore::default_location(),
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SjqrConfig::default();
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert!(config.export.labeled);
        assert_eq!(config.logging.level, "warn");
        assert!(config.theme.file.is_none());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sjqr.toml");
        fs::write(
            &path,
            "[export]\noutput_dir = \"out\"\nlabeled = false\n\n[logging]\nlevel = \"debug\"\nrotation = \"daily\"\n",
        )
        .unwrap();

        let config = SjqrConfig::from_file(&path).unwrap();
        assert_eq!(config.export.output_dir, PathBuf::from("out"));
        assert!(!config.export.labeled);
        assert!(!config.export.save_json);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sjqr.yaml");
        fs::write(&path, "export:\n  save_json: true\ntheme:\n  file: /tmp/theme\n").unwrap();

        let config = SjqrConfig::from_file(&path).unwrap();
        assert!(config.export.save_json);
        assert!(config.export.labeled);
        assert_eq!(config.theme.file, Some(PathBuf::from("/tmp/theme")));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sjqr.ini");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            SjqrConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rotation_parse() {
        assert_eq!(LogRotation::parse("HOURLY"), Some(LogRotation::Hourly));
        assert_eq!(LogRotation::parse("weekly"), None);
    }

    #[test]
    fn test_candidate_order() {
        let paths = candidate_paths(Path::new("/work"), Some(Path::new("/home/u/.config")));
        assert_eq!(
            paths,
            [
                "/work/sjqr.toml",
                "/work/sjqr.yaml",
                "/work/sjqr.yml",
                "/home/u/.config/sjqr/config.toml",
                "/home/u/.config/sjqr/config.yaml",
            ]
            .map(PathBuf::from)
        );
        assert_eq!(candidate_paths(Path::new("/work"), None).len(), LOCAL_FILES.len());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::of(Path::new("a.TOML")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::of(Path::new("a.yml")).unwrap(), ConfigFormat::Yaml);
        assert!(ConfigFormat::of(Path::new("a")).is_err());
    }
}
