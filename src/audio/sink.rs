//! Utilities for resolving locators and creating `rodio` sinks from them.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::AudioError;

/// Map a catalog locator onto a file path.
///
/// Existing absolute paths are used as they are. Anything else is taken as
/// relative to `base_dir`; a leading `/` is treated as the catalog root, so
/// site-style locators like `/audio/2023-1.mp3` work too.
pub fn resolve_locator(base_dir: &Path, locator: &str) -> PathBuf {
    let direct = Path::new(locator);
    if direct.is_absolute() && direct.exists() {
        return direct.to_path_buf();
    }
    base_dir.join(locator.trim_start_matches(['/', '\\']))
}

/// Track length from the file's metadata, if it reports a non-zero one.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the decoder's own idea of the total duration.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
    rate: f32,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.set_speed(rate);
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
