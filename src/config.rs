// src/config.rs
use crate::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application name, also the per-user data directory name.
pub const APP_NAME: &str = "Support Call Timer";

const SETTINGS_FILE: &str = "support_timer_config.json";

/// Billing settings loaded once at startup.
///
/// Values pass through unvalidated: a zero rate makes every call free, a
/// zero minimum charges every non-zero duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Hourly rate in whole currency units
    #[serde(default = "default_rate")]
    pub rate_per_hour: Decimal,

    /// Calls at or under this many minutes are free. The field name matches
    /// settings files written by earlier releases.
    #[serde(default = "default_minimum", rename = "MINIMUM_TIME")]
    pub minimum_minutes: i64,
}

fn default_rate() -> Decimal {
    Decimal::new(12000, 2) // 120.00
}

fn default_minimum() -> i64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rate_per_hour: default_rate(),
            minimum_minutes: default_minimum(),
        }
    }
}

/// Resolved location of the settings file.
///
/// The directory holding the settings file doubles as the storage root for
/// the monthly call log.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Resolve the settings path: a file already beside the executable wins,
    /// else the executable's directory when writable (portable mode), else
    /// the per-user data directory named after the application.
    pub fn resolve() -> Self {
        let exe_dir = exe_dir();
        let exe_cfg = exe_dir.join(SETTINGS_FILE);
        if exe_cfg.exists() {
            return Self { path: exe_cfg };
        }
        if dir_is_writable(&exe_dir) {
            return Self { path: exe_cfg };
        }
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        let cfg_dir = base.join(APP_NAME);
        if let Err(e) = fs::create_dir_all(&cfg_dir) {
            warn!("Couldn't create {}: {}", cfg_dir.display(), e);
        }
        Self {
            path: cfg_dir.join(SETTINGS_FILE),
        }
    }

    /// Use an explicit settings path instead of the resolution heuristic.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the call log partitions live under.
    pub fn storage_root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Load settings, creating the file with defaults on first run.
    ///
    /// Never fails: an unwritable location or an unreadable/corrupt file
    /// degrades to built-in defaults for this session, and a corrupt file is
    /// left untouched.
    pub fn load_or_create(&self) -> Settings {
        if !self.path.exists() {
            let defaults = Settings::default();
            match self.save(&defaults) {
                Ok(()) => info!("Created default settings at {}", self.path.display()),
                Err(e) => warn!(
                    "Couldn't create settings at {}: {}. Using defaults for this session.",
                    self.path.display(),
                    e
                ),
            }
            return defaults;
        }

        let parsed = fs::read_to_string(&self.path)
            .map_err(AppError::from)
            .and_then(|text| serde_json::from_str(&text).map_err(AppError::from));
        match parsed {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Couldn't read settings at {}: {}. Using defaults for this session.",
                    self.path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    /// Write settings back to the resolved path as pretty-printed JSON.
    pub fn save(&self, settings: &Settings) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Probe a directory with a throwaway write; metadata alone misreports
/// network shares and ACL-restricted folders.
fn dir_is_writable(dir: &Path) -> bool {
    let probe = dir.join(".writetest.tmp");
    match fs::write(&probe, "ok") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
