use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Screen};
use crate::audio::RodioSurface;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{MediaEvent, MediaSurface, PlaybackController, PlaybackState, Selection};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// What a key press asks for, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Quit,
    YearDown,
    YearUp,
    SessionPrev,
    SessionNext,
    OpenCursor,
    Next,
    TogglePlayPause,
    SkipBack,
    SkipForward,
    SkipLong,
    Restart,
    Slower,
    Faster,
    ShowTop,
}

/// Map a key to an action for the current screen.
pub fn key_action(screen: Screen, code: KeyCode) -> Option<Action> {
    let action = match (screen, code) {
        (_, KeyCode::Char('q')) => Action::Quit,
        (_, KeyCode::Char('n')) => Action::Next,

        (Screen::Top, KeyCode::Char('j') | KeyCode::Down) => Action::YearDown,
        (Screen::Top, KeyCode::Char('k') | KeyCode::Up) => Action::YearUp,
        (Screen::Top, KeyCode::Char('h') | KeyCode::Left) => Action::SessionPrev,
        (Screen::Top, KeyCode::Char('l') | KeyCode::Right) => Action::SessionNext,
        (Screen::Top, KeyCode::Enter) => Action::OpenCursor,

        (Screen::Player, KeyCode::Char(' ') | KeyCode::Char('p')) => Action::TogglePlayPause,
        (Screen::Player, KeyCode::Char('H') | KeyCode::Left) => Action::SkipBack,
        (Screen::Player, KeyCode::Char('L') | KeyCode::Right) => Action::SkipForward,
        (Screen::Player, KeyCode::Char('f')) => Action::SkipLong,
        (Screen::Player, KeyCode::Char('0') | KeyCode::Char('r')) => Action::Restart,
        (Screen::Player, KeyCode::Char('-')) => Action::Slower,
        (Screen::Player, KeyCode::Char('+') | KeyCode::Char('=')) => Action::Faster,
        (Screen::Player, KeyCode::Char('t') | KeyCode::Esc) => Action::ShowTop,

        _ => return None,
    };
    Some(action)
}

/// Apply `action`. Returns `true` when the app should quit.
pub fn apply_action<M: MediaSurface>(
    action: Action,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<M>,
) -> bool {
    let controls = &settings.controls;
    match action {
        Action::Quit => return true,
        Action::YearDown => app.move_year(1),
        Action::YearUp => app.move_year(-1),
        Action::SessionPrev => app.move_session(-1),
        Action::SessionNext => app.move_session(1),
        Action::OpenCursor => {
            if let Some(target) = app.cursor_selection() {
                if controller.selection() != Some(target) {
                    controller.select(target.year, target.session);
                }
                app.show_player();
            }
        }
        Action::Next => {
            if controller.advance() {
                follow_selection(app, controller.selection());
                app.show_player();
            }
        }
        Action::TogglePlayPause => controller.toggle_play_pause(),
        Action::SkipBack => controller.seek_relative(-controls.skip_back_seconds),
        Action::SkipForward => controller.seek_relative(controls.skip_forward_seconds),
        Action::SkipLong => controller.seek_relative(controls.skip_long_seconds),
        Action::Restart => controller.restart(),
        Action::Slower => controller.slower(controls.rate_step),
        Action::Faster => controller.faster(controls.rate_step),
        Action::ShowTop => {
            follow_selection(app, controller.selection());
            app.show_top();
        }
    }
    false
}

/// Apply a desktop media-key command. Returns `true` when the app should quit.
pub fn apply_control_cmd<M: MediaSurface>(
    cmd: ControlCmd,
    app: &mut App,
    controller: &mut PlaybackController<M>,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => controller.play(),
        ControlCmd::Pause => controller.pause(),
        ControlCmd::PlayPause => controller.toggle_play_pause(),
        ControlCmd::Stop => {
            controller.pause();
            controller.restart();
        }
        ControlCmd::Next => {
            if controller.advance() {
                follow_selection(app, controller.selection());
            }
        }
        ControlCmd::Seek(micros) => controller.seek_relative(micros as f64 / 1_000_000.0),
        ControlCmd::SetRate(rate) => controller.set_rate(rate as f32),
    }
    false
}

fn follow_selection(app: &mut App, selection: Option<Selection>) {
    if let Some(s) = selection {
        app.focus(s);
    }
}

/// Main terminal event loop: applies audio notifications and MPRIS commands,
/// redraws, and handles keys. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<RodioSurface>,
    mpris: &MprisHandle,
    media_rx: &mpsc::Receiver<MediaEvent>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> anyhow::Result<()> {
    let fade_out = Duration::from_millis(settings.audio.quit_fade_out_ms);
    let mut last_synced: Option<(Option<Selection>, PlaybackState)> = None;

    loop {
        while let Ok(event) = media_rx.try_recv() {
            controller.handle_event(event);
        }

        let mut quit = false;
        while let Ok(cmd) = control_rx.try_recv() {
            if apply_control_cmd(cmd, app, controller) {
                quit = true;
                break;
            }
        }

        // Keep MPRIS in sync with changes from keys, media keys and the audio thread alike.
        let snapshot = (controller.selection(), controller.playback().clone());
        if last_synced.as_ref() != Some(&snapshot) {
            update_mpris(mpris, controller);
            last_synced = Some(snapshot);
        }

        if quit {
            break;
        }

        terminal.draw(|f| ui::draw(f, app, controller, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = key_action(app.screen, key.code) {
                    if apply_action(action, settings, app, controller) {
                        break;
                    }
                }
            }
        }
    }

    controller.surface().quit_softly(fade_out);
    Ok(())
}
