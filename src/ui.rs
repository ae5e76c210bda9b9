//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Screen};
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{MediaSurface, PlayState, PlaybackController};

/// Format a `Duration` as `m:ss`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Like [`format_mmss`], but unknown or zero lengths render as `--:--`.
fn format_clock(d: Option<Duration>) -> String {
    match d {
        Some(d) if !d.is_zero() => format_mmss(d),
        _ => "--:--".to_string(),
    }
}

/// Format a playback rate as `1.0倍` / `0.95倍`.
fn format_rate(rate: f32) -> String {
    let mut s = format!("{rate:.2}");
    if s.ends_with('0') {
        s.pop();
    }
    format!("{s}倍")
}

/// Format a seek increment without a trailing `.0`.
fn format_secs(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        format!("{secs}")
    }
}

/// Render the controls help text for `screen`.
fn controls_text(screen: Screen, controls: &ControlsSettings) -> String {
    let parts: Vec<String> = match screen {
        Screen::Top => vec![
            "[j/k] year".to_string(),
            "[h/l] session".to_string(),
            "[enter] play screen".to_string(),
            "[n] next track".to_string(),
            "[q] quit".to_string(),
        ],
        Screen::Player => vec![
            "[space/p] play/pause".to_string(),
            format!("[H] -{}s", format_secs(controls.skip_back_seconds)),
            format!("[L] +{}s", format_secs(controls.skip_forward_seconds)),
            format!("[f] +{}s", format_secs(controls.skip_long_seconds)),
            "[0/r] restart".to_string(),
            "[-/+] speed".to_string(),
            "[n] next track".to_string(),
            "[t/esc] top".to_string(),
            "[q] quit".to_string(),
        ],
    };
    parts.join(" | ")
}

fn play_state_text(state: PlayState) -> &'static str {
    match state {
        PlayState::Stopped => "Stopped",
        PlayState::Playing => "Playing",
        PlayState::Paused => "Paused",
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw<M: MediaSurface>(
    frame: &mut Frame,
    app: &App,
    controller: &PlaybackController<M>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" monlis ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Top => draw_top(frame, chunks[1], app, controller),
        Screen::Player => draw_player(frame, chunks[1], controller, ui_settings),
    }

    let footer = Paragraph::new(controls_text(app.screen, controls_settings))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

/// Catalog grid: one line per year, sessions laid out left to right.
fn draw_top<M: MediaSurface>(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    controller: &PlaybackController<M>,
) {
    if !app.has_tracks() {
        let empty = Paragraph::new("No tracks in catalog").block(padded_block(" catalog "));
        frame.render_widget(empty, area);
        return;
    }

    let selected = controller.selection();
    let (cursor_row, cursor_col) = app.cursor();

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let mut spans = vec![
                Span::from(format!("{}年", row.year)).bold(),
                Span::from(format!(" ({}本)  ", row.sessions.len())).dim(),
            ];
            for (c, &session) in row.sessions.iter().enumerate() {
                let is_selected = selected
                    .map(|s| s.year == row.year && s.session == session)
                    .unwrap_or(false);
                let mut style = Style::default();
                if is_selected {
                    style = style.fg(Color::Indexed(99)).add_modifier(Modifier::BOLD);
                }
                if r == cursor_row && c == cursor_col {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!(" 第{session}回 "), style));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(padded_block(" 年度 → 第何回 "))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(cursor_row));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Transport view for the selected track.
fn draw_player<M: MediaSurface>(
    frame: &mut Frame,
    area: Rect,
    controller: &PlaybackController<M>,
    ui_settings: &UiSettings,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let playback = controller.playback();

    let title = match controller.selection() {
        Some(s) => format!("{}年 ／ 第{}回", s.year, s.session),
        None => "No track selected".to_string(),
    };
    let info = Paragraph::new(Line::from(vec![
        Span::from(title).bold(),
        Span::from("  •  "),
        Span::from(play_state_text(playback.state)),
    ]))
    .block(padded_block(" now playing "));
    frame.render_widget(info, rows[0]);

    let pct = playback.progress_percent();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            format_mmss(playback.position),
            format_clock(playback.duration)
        ));
    frame.render_widget(gauge, rows[1]);

    let mut details = vec![
        Line::from(format!("速度: {}", format_rate(playback.rate))),
        Line::from(format!("長さ: {}", format_clock(playback.duration))),
    ];
    if ui_settings.show_locator {
        if let Some(track) = controller.current_track() {
            details.push(Line::from(format!("音源パス: {}", track.locator)).dim());
        }
    }
    let details = Paragraph::new(details)
        .block(padded_block(" details "))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, rows[2]);
}
