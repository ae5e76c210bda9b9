use std::sync::mpsc;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioSurface;
use crate::catalog;
use crate::cli::Cli;
use crate::logging;
use crate::mpris::ControlCmd;
use crate::player::PlaybackController;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

const LOG_TARGET: &str = "monlis::runtime";

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let (settings, settings_warning) = settings::load_settings(cli.config);

    if let Err(msg) = logging::init(&settings.logging) {
        eprintln!("monlis: {msg}");
    }
    if let Some(msg) = settings_warning {
        eprintln!("monlis: {msg}");
        warn!(target: LOG_TARGET, "{msg}");
    }

    let catalog_path = startup::catalog_path(cli.catalog, &settings);
    let catalog = catalog::open(&catalog_path, &settings.library)
        .with_context(|| format!("cannot open catalog {}", catalog_path.display()))?;
    info!(
        target: LOG_TARGET,
        "catalog {} has {} tracks",
        catalog_path.display(),
        catalog.len()
    );

    let (surface, media_rx) = RodioSurface::spawn(catalog.base_dir().to_path_buf());
    let mut app = App::new(&catalog);
    let mut controller =
        PlaybackController::new(catalog, surface).with_rate(settings.playback.initial_rate);

    startup::apply_initial_selection(&mut app, &mut controller);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &controller);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &mpris,
        &media_rx,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
