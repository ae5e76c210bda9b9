use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, TrackDescriptor};
use crate::navigation;

use super::surface::MediaSurface;
use super::types::{
    Generation, MediaEvent, MediaEventKind, PlayState, PlaybackState, Selection, clamp_rate,
};

const LOG_TARGET: &str = "monlis::player";

/// Owns the selection and playback state and is the only thing that mutates them.
pub struct PlaybackController<M> {
    catalog: Catalog,
    surface: M,
    selection: Option<Selection>,
    playback: PlaybackState,
    generation: Generation,
    /// Generation of a `play` request whose outcome has not arrived yet.
    pending_play: Option<Generation>,
}

impl<M: MediaSurface> PlaybackController<M> {
    /// Create a controller with nothing selected (`Stopped`).
    pub fn new(catalog: Catalog, surface: M) -> Self {
        Self {
            catalog,
            surface,
            selection: None,
            playback: PlaybackState::default(),
            generation: Generation::default(),
            pending_play: None,
        }
    }

    /// Start with `rate` instead of the default, clamped like [`Self::set_rate`].
    pub fn with_rate(mut self, rate: f32) -> Self {
        if let Some(r) = clamp_rate(rate) {
            self.playback.rate = r;
        }
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    /// Descriptor of the selected track.
    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.selection
            .and_then(|s| navigation::resolve(&self.catalog, s))
    }

    /// Select a track and swap it in. Unknown coordinates are ignored.
    ///
    /// Returns whether the selection changed hands to a new resource.
    pub fn select(&mut self, year: i32, session: u32) -> bool {
        let selection = Selection::new(year, session);
        let Some(track) = navigation::resolve(&self.catalog, selection) else {
            debug!(target: LOG_TARGET, "ignoring select of unknown track {selection}");
            return false;
        };
        let locator = track.locator.clone();
        self.swap_to(selection, &locator);
        true
    }

    /// Move to the next track in catalog order and swap it in.
    ///
    /// With nothing selected yet this selects the initial track.
    pub fn advance(&mut self) -> bool {
        let next = match self.selection {
            Some(current) => navigation::next_selection(&self.catalog, current),
            None => navigation::initial_selection(&self.catalog),
        };
        match next {
            Some(s) => self.select(s.year, s.session),
            None => false,
        }
    }

    /// Resource swap: stop, reset position and duration, load, re-apply rate.
    fn swap_to(&mut self, selection: Selection, locator: &str) {
        if self.playback.state != PlayState::Stopped {
            self.surface.pause();
        }

        self.generation = self.generation.next();
        self.pending_play = None;
        self.selection = Some(selection);
        self.playback.state = PlayState::Paused;
        self.playback.position = Duration::ZERO;
        self.playback.duration = None;

        info!(
            target: LOG_TARGET,
            "loading {selection} from {locator} ({:?})",
            self.generation
        );
        self.surface.load(self.generation, locator);
        self.surface.set_playback_rate(self.playback.rate);
    }

    /// Pause when playing, request playback when paused.
    ///
    /// A toggle while a play request is still in flight counts as a pause.
    pub fn toggle_play_pause(&mut self) {
        match self.playback.state {
            PlayState::Stopped => {}
            PlayState::Playing => self.pause(),
            PlayState::Paused if self.pending_play.is_some() => self.pause(),
            PlayState::Paused => self.play(),
        }
    }

    /// Request playback of the loaded track. `is_playing` flips on `PlayStarted`.
    pub fn play(&mut self) {
        if self.playback.state != PlayState::Paused || self.pending_play.is_some() {
            return;
        }
        self.pending_play = Some(self.generation);
        self.surface.play(self.generation);
    }

    pub fn pause(&mut self) {
        if self.playback.state == PlayState::Stopped {
            return;
        }
        self.pending_play = None;
        self.surface.pause();
    }

    /// Move by `delta_secs`, clamped to `0..=duration` (no upper bound while unknown).
    pub fn seek_relative(&mut self, delta_secs: f64) {
        if self.playback.state == PlayState::Stopped || !delta_secs.is_finite() {
            return;
        }
        let mut target = (self.playback.position.as_secs_f64() + delta_secs).max(0.0);
        if let Some(d) = self.playback.duration {
            target = target.min(d.as_secs_f64());
        }
        self.seek_to(Duration::try_from_secs_f64(target).unwrap_or(Duration::MAX));
    }

    /// Jump to an absolute position, capped at the known duration.
    pub fn seek_to(&mut self, position: Duration) {
        if self.playback.state == PlayState::Stopped {
            return;
        }
        let position = match self.playback.duration {
            Some(d) => position.min(d),
            None => position,
        };
        self.playback.position = position;
        self.surface.seek_to(position);
    }

    /// Back to the start; play/pause state is left alone.
    pub fn restart(&mut self) {
        self.seek_to(Duration::ZERO);
    }

    /// Set the rate, clamped to `MIN_RATE..=MAX_RATE`. NaN is ignored.
    pub fn set_rate(&mut self, rate: f32) {
        let Some(rate) = clamp_rate(rate) else {
            return;
        };
        self.playback.rate = rate;
        if self.playback.state != PlayState::Stopped {
            self.surface.set_playback_rate(rate);
        }
    }

    pub fn slower(&mut self, step: f32) {
        self.set_rate(round_rate(self.playback.rate - step));
    }

    pub fn faster(&mut self, step: f32) {
        self.set_rate(round_rate(self.playback.rate + step));
    }

    /// Apply a surface notification. Notifications for an older resource are dropped.
    ///
    /// Returns whether the playback state changed.
    pub fn handle_event(&mut self, event: MediaEvent) -> bool {
        if self.selection.is_none() || event.generation != self.generation {
            debug!(
                target: LOG_TARGET,
                "dropping stale {:?} from {:?} (current {:?})",
                event.kind,
                event.generation,
                self.generation
            );
            return false;
        }

        let before = self.playback.clone();
        match event.kind {
            MediaEventKind::TimeUpdate(position) => {
                self.playback.position = position;
            }
            MediaEventKind::DurationKnown(duration) => {
                self.playback.duration = Some(duration);
            }
            MediaEventKind::PlayStarted => {
                self.pending_play = None;
                self.playback.state = PlayState::Playing;
            }
            MediaEventKind::PlayPaused => {
                self.pending_play = None;
                self.playback.state = PlayState::Paused;
            }
            MediaEventKind::Ended => {
                self.pending_play = None;
                self.playback.state = PlayState::Paused;
                if let Some(d) = self.playback.duration {
                    self.playback.position = d;
                }
            }
            MediaEventKind::PlayFailed(reason) => {
                self.pending_play = None;
                self.playback.state = PlayState::Paused;
                warn!(target: LOG_TARGET, "play request rejected: {reason}");
            }
        }
        self.playback != before
    }
}

/// Round to one decimal so steps land on the `0.1` grid (`0.7999999` → `0.8`, `0.95` → `1.0`).
fn round_rate(rate: f32) -> f32 {
    (rate * 10.0).round() / 10.0
}
