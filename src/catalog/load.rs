use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::config::LibrarySettings;
use crate::error::CatalogError;

use super::model::{Catalog, TrackDescriptor};
use super::scan::scan;

const LOG_TARGET: &str = "monlis::catalog";

/// TOML index layout: a list of `[[track]]` tables.
#[derive(Debug, Deserialize)]
struct TomlIndex {
    #[serde(default, alias = "tracks")]
    track: Vec<TrackDescriptor>,
}

/// Open a catalog from `path`: directories are scanned, files are read as an index.
pub fn open(path: &Path, settings: &LibrarySettings) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let catalog = if path.is_dir() {
        scan(path, settings)
    } else {
        load_index(path)?
    };

    info!(
        target: LOG_TARGET,
        "loaded {} tracks from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Read an index file. `.toml` files are parsed as TOML, anything else as JSON.
///
/// Relative locators resolve against the directory holding the index.
pub fn load_index(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let tracks = if is_toml {
        toml::from_str::<TomlIndex>(&text)
            .map_err(|source| CatalogError::Toml {
                path: path.to_path_buf(),
                source,
            })?
            .track
    } else {
        serde_json::from_str::<Vec<TrackDescriptor>>(&text).map_err(|source| {
            CatalogError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?
    };

    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(PathBuf::new);
    Ok(Catalog::new(tracks).with_base_dir(base_dir))
}
