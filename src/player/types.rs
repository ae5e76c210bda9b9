//! Small value types shared by the controller and media surfaces.

use std::fmt;
use std::time::Duration;

pub const MIN_RATE: f32 = 0.5;
pub const MAX_RATE: f32 = 1.5;
pub const DEFAULT_RATE: f32 = 1.0;

/// Coordinates of the chosen track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub year: i32,
    pub session: u32,
}

impl Selection {
    pub const fn new(year: i32, session: u32) -> Self {
        Self { year, session }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年 第{}回", self.year, self.session)
    }
}

/// Transport state of the loaded resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Nothing loaded yet.
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Mirror of what the media surface last reported, plus the chosen rate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub state: PlayState,
    /// Always within `MIN_RATE..=MAX_RATE`.
    pub rate: f32,
    pub position: Duration,
    /// `None` until the surface reports it.
    pub duration: Option<Duration>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            state: PlayState::Stopped,
            rate: DEFAULT_RATE,
            position: Duration::ZERO,
            duration: None,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Position as a percentage of the duration, `0.0..=100.0`.
    ///
    /// Unknown or zero durations report 0.
    pub fn progress_percent(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                let pct = self.position.as_secs_f64() / d.as_secs_f64() * 100.0;
                if pct.is_finite() {
                    pct.clamp(0.0, 100.0)
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

/// Identifies one loaded resource. Bumped on every resource swap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A notification from a media surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    /// Resource the notification belongs to.
    pub generation: Generation,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(generation: Generation, kind: MediaEventKind) -> Self {
        Self { generation, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    TimeUpdate(Duration),
    DurationKnown(Duration),
    PlayStarted,
    PlayPaused,
    Ended,
    /// A `play` request was rejected.
    PlayFailed(String),
}

/// Clamp a requested rate into the supported range. `None` for NaN.
pub fn clamp_rate(rate: f32) -> Option<f32> {
    if rate.is_nan() {
        None
    } else {
        Some(rate.clamp(MIN_RATE, MAX_RATE))
    }
}
