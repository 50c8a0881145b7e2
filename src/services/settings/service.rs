use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::TimelineSettings;

const SETTINGS_FILE: &str = "timeline.toml";

/// Reads and writes `TimelineSettings` as a TOML file
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the per-user config file, falling back to the working
    /// directory when no home directory is known
    pub fn for_user() -> Self {
        Self::new(default_path().unwrap_or_else(|| PathBuf::from(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(&self) -> Result<TimelineSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings at {}, using defaults",
                self.path.display()
            );
            return Ok(TimelineSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: TimelineSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;
        Ok(settings)
    }

    /// Load settings, logging and falling back to defaults on any error
    pub fn load_or_default(&self) -> TimelineSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Failed to load settings: {:#}", err);
                TimelineSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &TimelineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Location of the per-user settings file
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "Ken24T", "RustTimeline")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}
