use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

const LOG_TARGET: &str = "monlis::catalog";

/// One listening track, identified by its `(year, session)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackDescriptor {
    pub year: i32,
    #[serde(alias = "no")]
    pub session: u32,
    #[serde(alias = "file")]
    pub locator: String,
}

impl TrackDescriptor {
    pub fn new(year: i32, session: u32, locator: impl Into<String>) -> Self {
        Self {
            year,
            session,
            locator: locator.into(),
        }
    }

    /// Human-readable label, e.g. `2023年 第2回`.
    pub fn label(&self) -> String {
        format!("{}年 第{}回", self.year, self.session)
    }
}

/// Ordered, deduplicated collection of tracks.
///
/// Entries are stored by `(year asc, session asc)`. Every entry has a
/// non-empty locator and no two entries share a `(year, session)` pair.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<TrackDescriptor>,
    base_dir: PathBuf,
}

impl Catalog {
    /// Build a catalog from externally supplied descriptors.
    ///
    /// Entries with a blank locator are dropped, and for duplicate
    /// `(year, session)` pairs the first one in input order is kept.
    pub fn new(tracks: Vec<TrackDescriptor>) -> Self {
        let mut seen: HashSet<(i32, u32)> = HashSet::new();
        let mut kept: Vec<TrackDescriptor> = Vec::with_capacity(tracks.len());

        for track in tracks {
            if track.locator.trim().is_empty() {
                warn!(target: LOG_TARGET, "dropping {} with empty locator", track.label());
                continue;
            }
            if !seen.insert((track.year, track.session)) {
                warn!(
                    target: LOG_TARGET,
                    "dropping duplicate {} ({})",
                    track.label(),
                    track.locator
                );
                continue;
            }
            kept.push(track);
        }

        // Stable sort keeps the input order of anything that compares equal.
        kept.sort_by_key(|t| (t.year, t.session));

        Self {
            tracks: kept,
            base_dir: PathBuf::new(),
        }
    }

    /// Attach the directory relative locators are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by its coordinates.
    pub fn find(&self, year: i32, session: u32) -> Option<&TrackDescriptor> {
        self.tracks
            .binary_search_by_key(&(year, session), |t| (t.year, t.session))
            .ok()
            .map(|i| &self.tracks[i])
    }
}
