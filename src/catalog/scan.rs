use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Catalog, TrackDescriptor};

const LOG_TARGET: &str = "monlis::catalog";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Every maximal run of ASCII digits in `s`, paired with its digit count.
fn digit_runs(s: &str) -> Vec<(u64, usize)> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in s.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            if let Ok(n) = current.parse::<u64>() {
                runs.push((n, current.len()));
            }
            current.clear();
        }
    }
    runs
}

/// Leading number of a directory name such as `2023` or `2023年`.
fn leading_year(name: &str) -> Option<i32> {
    let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Map a path relative to the scan root onto `(year, session)`.
///
/// The year comes from the nearest numbered directory; without one a flat
/// `2023-1.mp3` style stem supplies both numbers.
pub(super) fn coordinates_for(relative: &Path) -> Option<(i32, u32)> {
    let stem = relative.file_stem()?.to_str()?;
    let runs = digit_runs(stem);

    let dir_year = relative
        .parent()
        .into_iter()
        .flat_map(Path::ancestors)
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .find_map(leading_year);

    match dir_year {
        Some(year) => {
            let session = match runs.as_slice() {
                [(first, _), (second, _), ..] if *first == year as u64 => *second,
                [(first, _), ..] => *first,
                [] => return None,
            };
            Some((year, u32::try_from(session).ok()?))
        }
        None => match runs.as_slice() {
            [(year, 4), (session, _), ..] => Some((
                i32::try_from(*year).ok()?,
                u32::try_from(*session).ok()?,
            )),
            _ => None,
        },
    }
}

/// Build a catalog by walking `dir` for audio files laid out as `YEAR/NN.ext`.
///
/// Locators are stored relative to `dir`, which becomes the catalog base.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Catalog {
    let mut tracks: Vec<TrackDescriptor> = Vec::new();

    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };

        match coordinates_for(relative) {
            Some((year, session)) => {
                let locator = relative.to_string_lossy().replace('\\', "/");
                tracks.push(TrackDescriptor::new(year, session, locator));
            }
            None => {
                debug!(
                    target: LOG_TARGET,
                    "skipping {}: no year/session in path",
                    relative.display()
                );
            }
        }
    }

    Catalog::new(tracks).with_base_dir(dir)
}
