use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional settings file, looked up next to the executable.
pub const CONFIG_FILE: &str = "school_dashboard.json";

/// Overrides `data_dir` when set.
pub const DATA_DIR_ENV: &str = "SCHOOL_DASHBOARD_DATA_DIR";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the resources. Relative paths resolve against the
    /// executable's directory; unset means the executable's directory itself.
    pub data_dir: Option<PathBuf>,
    /// Length of the date window used when no trend data is available.
    pub default_range_days: i64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_range_days: 365,
            window_width: 1280.0,
            window_height: 820.0,
        }
    }
}

impl Config {
    /// Read `school_dashboard.json` from `base` (if present) and apply the
    /// environment override.
    pub fn load(base: &Path) -> Result<Self> {
        let path = base.join(CONFIG_FILE);
        let config = if path.is_file() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        } else {
            Self::default()
        };
        Ok(config.with_env_override(std::env::var_os(DATA_DIR_ENV)))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid dashboard configuration")
    }

    /// Replace `data_dir` with a non-empty override value.
    pub fn with_env_override(mut self, value: Option<OsString>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(v));
        }
        self
    }

    /// Absolute data directory for a given executable directory.
    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        }
    }
}

/// Directory of the running executable, falling back to the working
/// directory.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
