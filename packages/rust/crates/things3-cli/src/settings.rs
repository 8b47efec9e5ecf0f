//! Settings loader for the `things3` CLI.
//!
//! Reads one YAML file:
//! - Explicit: `--config <path>`; any read or parse failure is an error.
//! - Default:  `<XDG_CONFIG_HOME or ~/.config>/things3-bridge/settings.yaml`;
//!   a missing or unparsable file falls back to defaults.
//!
//! Command-line flags overlay the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use things3_bridge::BridgeConfig;

const DEFAULT_SETTINGS_RELATIVE_PATH: &str = "things3-bridge/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) interpreter: Option<String>,
    pub(crate) interpreter_args: Option<Vec<String>>,
    pub(crate) application: Option<String>,
    /// `0` disables the timeout.
    pub(crate) timeout_secs: Option<u64>,
}

impl Settings {
    /// Values set in `overlay` win.
    pub(crate) fn merge(self, overlay: Self) -> Self {
        Self {
            interpreter: overlay.interpreter.or(self.interpreter),
            interpreter_args: overlay.interpreter_args.or(self.interpreter_args),
            application: overlay.application.or(self.application),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
        }
    }

    pub(crate) fn into_bridge_config(self) -> BridgeConfig {
        let defaults = BridgeConfig::default();
        BridgeConfig {
            interpreter: self.interpreter.unwrap_or(defaults.interpreter),
            interpreter_args: self.interpreter_args.unwrap_or(defaults.interpreter_args),
            application: self.application.unwrap_or(defaults.application),
            timeout: match self.timeout_secs {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.timeout,
            },
        }
    }
}

/// Load settings from `explicit`, or from the default location when `None`.
pub(crate) fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    if let Some(path) = explicit {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        return parse_settings(&raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()));
    }

    let Some(path) = default_settings_path() else {
        return Ok(Settings::default());
    };
    Ok(load_default(&path))
}

fn load_default(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return Settings::default();
        }
    };
    match parse_settings(&raw) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            settings
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            Settings::default()
        }
    }
}

fn parse_settings(raw: &str) -> Result<Settings, serde_yaml::Error> {
    // An empty file deserializes to `null`.
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(raw)
}

fn default_settings_path() -> Option<PathBuf> {
    let config_home = env_path("XDG_CONFIG_HOME")
        .or_else(|| env_path("HOME").map(|home| home.join(DEFAULT_CONFIG_HOME_RELATIVE_PATH)))?;
    Some(config_home.join(DEFAULT_SETTINGS_RELATIVE_PATH))
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
