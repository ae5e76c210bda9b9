//! Audio subsystem: a `rodio`-backed [`MediaSurface`](crate::player::MediaSurface).
//!
//! Playback runs on a dedicated thread. `RodioSurface` forwards controller
//! commands as `AudioCmd` values, and the thread reports what happened as
//! `MediaEvent`s on a channel drained by the event loop.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioSurface;
