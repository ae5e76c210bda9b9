use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_monlis_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MONLIS_CONFIG_PATH", "/tmp/monlis-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/monlis-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("monlis")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("monlis")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_original_transport_increments() {
    let s = Settings::default();
    assert_eq!(s.controls.skip_back_seconds, 3.0);
    assert_eq!(s.controls.skip_forward_seconds, 3.0);
    assert_eq!(s.controls.skip_long_seconds, 10.0);
    assert_eq!(s.playback.initial_rate, 1.0);
    assert!(s.logging.file.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
initial_rate = 0.8

[audio]
quit_fade_out_ms = 0

[controls]
skip_back_seconds = 5
skip_forward_seconds = 5
skip_long_seconds = 30
rate_step = 0.05

[ui]
header_text = "hello"
show_locator = false

[library]
catalog = "/srv/listening/index.json"
extensions = ["mp3"]
include_hidden = true
follow_links = false

[logging]
file = "/tmp/monlis.log"
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MONLIS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MONLIS__PLAYBACK__INITIAL_RATE");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.initial_rate, 0.8);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.skip_back_seconds, 5.0);
    assert_eq!(s.controls.skip_forward_seconds, 5.0);
    assert_eq!(s.controls.skip_long_seconds, 30.0);
    assert_eq!(s.controls.rate_step, 0.05);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_locator);
    assert_eq!(
        s.library.catalog.as_deref(),
        Some(std::path::Path::new("/srv/listening/index.json"))
    );
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(
        s.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/monlis.log"))
    );
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MONLIS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MONLIS__AUDIO__QUIT_FADE_OUT_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_from(Some(dir.path().join("absent.toml"))).unwrap();
    assert_eq!(s.controls.skip_long_seconds, 10.0);
}

#[test]
fn validate_rejects_bad_increments_and_rates() {
    let mut s = Settings::default();
    s.controls.skip_back_seconds = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.rate_step = -0.1;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.initial_rate = 2.0;
    assert!(s.validate().is_err());
}
