use std::env;
use std::path::PathBuf;

use crate::app::App;
use crate::config;
use crate::player::{MediaSurface, PlaybackController};

/// Catalog location: command line, then `library.catalog`, then the working directory.
pub fn catalog_path(cli_catalog: Option<PathBuf>, settings: &config::Settings) -> PathBuf {
    cli_catalog
        .or_else(|| settings.library.catalog.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Select the newest year's first session and point the catalog cursor at it.
pub fn apply_initial_selection<M: MediaSurface>(
    app: &mut App,
    controller: &mut PlaybackController<M>,
) {
    if controller.advance() {
        if let Some(selection) = controller.selection() {
            app.focus(selection);
        }
    }
}
