//! MPRIS (D-Bus) integration so desktop media keys and `playerctl` can drive
//! the player.
//!
//! Interface methods only forward a [`ControlCmd`] to the event loop; the
//! event loop pushes state back through [`MprisHandle`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::warn;
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::catalog::TrackDescriptor;
use crate::player::{MAX_RATE, MIN_RATE, PlayState};

const LOG_TARGET: &str = "monlis::mpris";

#[derive(Clone, Debug, PartialEq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    /// Pause and rewind to the start.
    Stop,
    Next,
    /// Relative seek in microseconds.
    Seek(i64),
    SetRate(f64),
}

#[derive(Debug)]
struct SharedState {
    playback: PlayState,
    title: Option<String>,
    url: Option<String>,
    track_id: Option<String>,
    length_micros: Option<i64>,
    position_micros: i64,
    rate: f64,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            playback: PlayState::Stopped,
            title: None,
            url: None,
            track_id: None,
            length_micros: None,
            position_micros: 0,
            rate: 1.0,
        }
    }
}

fn micros(d: Duration) -> i64 {
    i64::try_from(d.as_micros()).unwrap_or(i64::MAX)
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlayState, position: Duration, rate: f32) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
            s.position_micros = micros(position);
            s.rate = f64::from(rate);
        }
    }

    pub fn set_track_metadata(&self, track: Option<&TrackDescriptor>, length: Option<Duration>) {
        if let Ok(mut s) = self.state.lock() {
            match track {
                Some(t) => {
                    s.title = Some(t.label());
                    s.url = Some(t.locator.clone());
                    s.track_id = Some(format!(
                        "/org/mpris/MediaPlayer2/track/{}_{}",
                        t.year, t.session
                    ));
                }
                None => {
                    s.title = None;
                    s.url = None;
                    s.track_id = None;
                }
            }
            s.length_micros = length.map(micros);
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "monlis"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn send(&self, cmd: ControlCmd) {
        let _ = self.tx.send(cmd);
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.send(ControlCmd::Next);
    }

    fn previous(&self) {
        // Only forward navigation exists.
    }

    fn play(&self) {
        self.send(ControlCmd::Play);
    }

    fn pause(&self) {
        self.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        self.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        self.send(ControlCmd::Stop);
    }

    fn seek(&self, offset: i64) {
        self.send(ControlCmd::Seek(offset));
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlayState::Stopped => "Stopped",
            PlayState::Playing => "Playing",
            PlayState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        self.state.lock().map(|s| s.rate).unwrap_or(1.0)
    }

    #[zbus(property)]
    fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() {
            self.send(ControlCmd::SetRate(rate));
        }
    }

    #[zbus(property)]
    fn minimum_rate(&self) -> f64 {
        f64::from(MIN_RATE)
    }

    #[zbus(property)]
    fn maximum_rate(&self) -> f64 {
        f64::from(MAX_RATE)
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        self.state.lock().map(|s| s.position_micros).unwrap_or(0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = s.track_id.as_deref() {
            if let Ok(path) = ObjectPath::try_from(id) {
                insert_value(&mut map, "mpris:trackid", Value::from(path));
            }
        }
        if let Some(title) = &s.title {
            insert_value(&mut map, "xesam:title", Value::from(title.clone()));
        }
        if let Some(url) = &s.url {
            insert_value(&mut map, "xesam:url", Value::from(url.clone()));
        }
        if let Some(len) = s.length_micros {
            insert_value(&mut map, "mpris:length", Value::from(len));
        }
        map
    }
}

fn insert_value(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
    if let Ok(v) = OwnedValue::try_from(value) {
        map.insert(key.to_string(), v);
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!(target: LOG_TARGET, "failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.monlis")
                .await
            {
                warn!(target: LOG_TARGET, "failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                warn!(target: LOG_TARGET, "failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!(target: LOG_TARGET, "failed to register player iface: {e}");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
