use std::{env, path::PathBuf};

use crate::error::SettingsError;
use crate::player::{MAX_RATE, MIN_RATE};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `MONLIS__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and the resolved config file.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(resolve_config_path())
    }

    /// Load settings from environment and an explicit optional config file.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self, SettingsError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MONLIS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let c = &self.controls;
        for (name, v) in [
            ("controls.skip_back_seconds", c.skip_back_seconds),
            ("controls.skip_forward_seconds", c.skip_forward_seconds),
            ("controls.skip_long_seconds", c.skip_long_seconds),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be > 0")));
            }
        }
        if !(c.rate_step.is_finite() && c.rate_step > 0.0) {
            return Err(SettingsError::Invalid(
                "controls.rate_step must be > 0".to_string(),
            ));
        }
        let r = self.playback.initial_rate;
        if !(MIN_RATE..=MAX_RATE).contains(&r) {
            return Err(SettingsError::Invalid(format!(
                "playback.initial_rate must be within {MIN_RATE}..={MAX_RATE}"
            )));
        }
        Ok(())
    }
}

/// Resolve the config path from `MONLIS_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MONLIS_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/monlis/config.toml`
/// or `~/.config/monlis/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("monlis").join("config.toml"))
}
