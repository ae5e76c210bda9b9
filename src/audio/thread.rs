use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::error::AudioError;
use crate::player::{DEFAULT_RATE, Generation, MediaEvent, MediaEventKind};

use super::sink::{create_sink_at, probe_duration, resolve_locator};
use super::types::AudioCmd;

const LOG_TARGET: &str = "monlis::audio";
const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    base_dir: PathBuf,
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!(target: LOG_TARGET, "failed to open audio output: {e}");
                None
            }
        };

        let mut engine = Engine::new(stream, base_dir, events);

        loop {
            match rx.recv_timeout(TICK) {
                Ok(AudioCmd::Load {
                    generation,
                    locator,
                }) => engine.load(generation, &locator),
                Ok(AudioCmd::Play(generation)) => engine.play(generation),
                Ok(AudioCmd::Pause) => engine.pause(),
                Ok(AudioCmd::SeekTo(position)) => engine.seek_to(position),
                Ok(AudioCmd::SetRate(rate)) => engine.set_rate(rate),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    engine.shutdown(fade_out_ms);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// State owned by the audio thread for the one loaded track.
pub(super) struct Engine {
    stream: Option<OutputStream>,
    base_dir: PathBuf,
    events: Sender<MediaEvent>,

    generation: Generation,
    path: Option<PathBuf>,
    sink: Option<Sink>,
    /// Position the current sink started from; `sink.get_pos()` counts from here.
    offset: Duration,
    paused: bool,
    ended: bool,
    rate: f32,
}

impl Engine {
    pub(super) fn new(
        stream: Option<OutputStream>,
        base_dir: PathBuf,
        events: Sender<MediaEvent>,
    ) -> Self {
        Self {
            stream,
            base_dir,
            events,
            generation: Generation::default(),
            path: None,
            sink: None,
            offset: Duration::ZERO,
            paused: true,
            ended: false,
            rate: DEFAULT_RATE,
        }
    }

    fn emit(&self, kind: MediaEventKind) {
        let _ = self.events.send(MediaEvent::new(self.generation, kind));
    }

    fn position(&self) -> Duration {
        self.offset
            .saturating_add(self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos))
    }

    /// Replace the sink with one starting at `start_at`, keeping play/pause.
    fn rebuild_at(&mut self, start_at: Duration) -> Result<Option<Duration>, AudioError> {
        let stream = self.stream.as_ref().ok_or(AudioError::NoDevice)?;
        let path = self.path.as_ref().ok_or(AudioError::NothingLoaded)?;

        let (sink, total) = create_sink_at(stream, path, start_at, self.rate)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if !self.paused {
            sink.play();
        }
        self.sink = Some(sink);
        self.offset = start_at;
        self.ended = false;
        Ok(total)
    }

    pub(super) fn load(&mut self, generation: Generation, locator: &str) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.generation = generation;
        self.offset = Duration::ZERO;
        self.paused = true;
        self.ended = false;

        let path = resolve_locator(&self.base_dir, locator);
        debug!(target: LOG_TARGET, "loading {}", path.display());
        self.path = Some(path.clone());

        let decoder_total = match self.rebuild_at(Duration::ZERO) {
            Ok(total) => total,
            Err(e) => {
                warn!(target: LOG_TARGET, "cannot load {}: {e}", path.display());
                None
            }
        };

        if let Some(d) = probe_duration(&path).or(decoder_total) {
            self.emit(MediaEventKind::DurationKnown(d));
        }
    }

    pub(super) fn play(&mut self, generation: Generation) {
        if generation != self.generation {
            debug!(target: LOG_TARGET, "ignoring play for stale {generation:?}");
            return;
        }

        if self.sink.is_none() || self.ended {
            if let Err(e) = self.rebuild_at(Duration::ZERO) {
                self.emit(MediaEventKind::PlayFailed(e.to_string()));
                return;
            }
            self.emit(MediaEventKind::TimeUpdate(Duration::ZERO));
        }

        if let Some(sink) = self.sink.as_ref() {
            sink.play();
            self.paused = false;
            self.emit(MediaEventKind::PlayStarted);
        }
    }

    pub(super) fn pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.pause();
        let was_playing = !self.paused;
        self.paused = true;
        if was_playing {
            self.emit(MediaEventKind::PlayPaused);
        }
    }

    pub(super) fn seek_to(&mut self, position: Duration) {
        if self.path.is_none() {
            return;
        }
        match self.rebuild_at(position) {
            Ok(_) => self.emit(MediaEventKind::TimeUpdate(position)),
            Err(e) => warn!(target: LOG_TARGET, "seek failed: {e}"),
        }
    }

    fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_speed(rate);
        }
    }

    /// Periodic check: report position while playing and detect the end of the track.
    pub(super) fn tick(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }
        if sink.empty() {
            self.paused = true;
            self.ended = true;
            self.emit(MediaEventKind::Ended);
        } else {
            self.emit(MediaEventKind::TimeUpdate(self.position()));
        }
    }

    fn shutdown(&mut self, fade_out_ms: u64) {
        if let Some(sink) = self.sink.take() {
            // Fade out gently before stopping.
            if !self.paused {
                fade_out_sink(&sink, fade_out_ms);
            }
            sink.stop();
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
