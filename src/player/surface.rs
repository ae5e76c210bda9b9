use std::time::Duration;

use super::types::Generation;

/// The audio device the controller drives.
///
/// Commands are fire-and-forget. Whatever the surface observes afterwards
/// (position, duration, play/pause/end, a rejected play) is reported back as a
/// [`MediaEvent`](super::MediaEvent) stamped with the generation passed to
/// the latest `load`.
pub trait MediaSurface {
    /// Replace the current source. Prior position and duration are invalid afterwards.
    fn load(&mut self, generation: Generation, locator: &str);

    /// Request playback. The outcome arrives later as `PlayStarted` or `PlayFailed`.
    fn play(&mut self, generation: Generation);

    fn pause(&mut self);

    fn seek_to(&mut self, position: Duration);

    fn set_playback_rate(&mut self, rate: f32);
}
