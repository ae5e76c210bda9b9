//! Commands accepted by the audio thread.

use std::time::Duration;

use crate::player::Generation;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source with `locator`, paused at the start.
    Load {
        generation: Generation,
        locator: String,
    },
    /// Resume playback of the source loaded under `generation`.
    Play(Generation),
    /// Pause playback.
    Pause,
    /// Jump to an absolute position.
    SeekTo(Duration),
    /// Change the playback speed.
    SetRate(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
