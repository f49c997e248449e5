use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::ui::settings::ClientSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jotto_client");
    path.push("settings.json");
    path
}

/// Settings from disk plus environment overrides. A missing or broken file
/// means defaults.
pub fn load_settings() -> ClientSettings {
    let path = settings_path();
    let mut settings = match read_settings(&path) {
        Ok(settings) => settings,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "using default settings");
            ClientSettings::default()
        }
    };
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    settings
}

pub fn save_settings(settings: &ClientSettings) {
    let path = settings_path();
    if let Err(err) = write_settings(&path, settings) {
        warn!(path = %path.display(), error = %err, "could not save settings");
    }
}

pub fn read_settings(path: &Path) -> anyhow::Result<ClientSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn write_settings(path: &Path, settings: &ClientSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
