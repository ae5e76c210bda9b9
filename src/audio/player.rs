use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::player::{Generation, MediaEvent, MediaSurface};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

const LOG_TARGET: &str = "monlis::audio";

/// Media surface backed by the audio thread.
pub struct RodioSurface {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioSurface {
    /// Start the audio thread. Locators resolve against `base_dir`.
    ///
    /// The returned receiver yields the thread's notifications.
    pub fn spawn(base_dir: PathBuf) -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();

        let audio_handle = spawn_audio_thread(base_dir, rx, event_tx);

        let surface = Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        };
        (surface, event_rx)
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(target: LOG_TARGET, "audio thread is gone, dropping {:?}", e.0);
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_millis(fade_out),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// Whole milliseconds of `d`, saturating at `u64::MAX`.
pub(super) fn fade_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl MediaSurface for RodioSurface {
    fn load(&mut self, generation: Generation, locator: &str) {
        self.send(AudioCmd::Load {
            generation,
            locator: locator.to_string(),
        });
    }

    fn play(&mut self, generation: Generation) {
        self.send(AudioCmd::Play(generation));
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        self.send(AudioCmd::SeekTo(position));
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.send(AudioCmd::SetRate(rate));
    }
}
