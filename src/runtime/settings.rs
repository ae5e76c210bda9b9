use std::path::PathBuf;

use crate::config;

/// Load and validate settings. Config is optional, so a broken file falls
/// back to defaults; the returned message explains why.
pub fn load_settings(config_path: Option<PathBuf>) -> (config::Settings, Option<String>) {
    let loaded = match config_path {
        Some(path) => config::Settings::load_from(Some(path)),
        None => config::Settings::load(),
    };

    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(e) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {e}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
