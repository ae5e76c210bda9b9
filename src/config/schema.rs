use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/monlis/config.toml` or `~/.config/monlis/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MONLIS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show the resource locator of the current track on the player screen.
    pub show_locator: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " 年度と「第◯回」を選んで再生 ".to_string(),
            show_locator: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seconds to jump back with `H`.
    pub skip_back_seconds: f64,
    /// Seconds to jump forward with `L`.
    pub skip_forward_seconds: f64,
    /// Seconds to jump forward with `f`.
    pub skip_long_seconds: f64,
    /// Rate change applied by `-` / `+`.
    pub rate_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            skip_back_seconds: 3.0,
            skip_forward_seconds: 3.0,
            skip_long_seconds: 10.0,
            rate_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Playback rate at startup, within `0.5..=1.5`.
    pub initial_rate: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { initial_rate: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Index file or directory used when no catalog is given on the command line.
    pub catalog: Option<PathBuf>,
    /// File extensions to treat as audio when scanning (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            catalog: None,
            extensions: vec![
                "mp3".into(),
                "m4a".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
            ],
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file path. Logging is disabled when unset since the terminal belongs to the UI.
    pub file: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
