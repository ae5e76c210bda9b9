use super::*;
use crate::catalog::{Catalog, TrackDescriptor};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(Generation, String),
    Play(Generation),
    Pause,
    SeekTo(Duration),
    SetRate(f32),
}

#[derive(Debug, Default)]
struct FakeSurface {
    calls: Vec<Call>,
}

impl MediaSurface for FakeSurface {
    fn load(&mut self, generation: Generation, locator: &str) {
        self.calls.push(Call::Load(generation, locator.to_string()));
    }

    fn play(&mut self, generation: Generation) {
        self.calls.push(Call::Play(generation));
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        self.calls.push(Call::SeekTo(position));
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.calls.push(Call::SetRate(rate));
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        TrackDescriptor::new(2023, 1, "a"),
        TrackDescriptor::new(2023, 2, "b"),
        TrackDescriptor::new(2024, 1, "c"),
    ])
}

fn controller() -> PlaybackController<FakeSurface> {
    PlaybackController::new(catalog(), FakeSurface::default())
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

/// Controller with `(year, session)` loaded and the surface reporting `duration`.
fn loaded(year: i32, session: u32, duration: Option<Duration>) -> PlaybackController<FakeSurface> {
    let mut c = controller();
    assert!(c.select(year, session));
    if let Some(d) = duration {
        let g = c.generation();
        c.handle_event(MediaEvent::new(g, MediaEventKind::DurationKnown(d)));
    }
    c
}

fn start_playing(c: &mut PlaybackController<FakeSurface>) {
    c.toggle_play_pause();
    let g = c.generation();
    c.handle_event(MediaEvent::new(g, MediaEventKind::PlayStarted));
    assert!(c.playback().is_playing());
}

fn at_position(c: &mut PlaybackController<FakeSurface>, pos: Duration) {
    let g = c.generation();
    c.handle_event(MediaEvent::new(g, MediaEventKind::TimeUpdate(pos)));
}

#[test]
fn starts_stopped_with_nothing_selected() {
    let c = controller();
    assert_eq!(c.selection(), None);
    assert_eq!(c.playback().state, PlayState::Stopped);
    assert_eq!(c.playback().rate, 1.0);
    assert!(c.surface().calls.is_empty());
}

#[test]
fn select_then_read_returns_same_pair_for_every_track() {
    let mut c = controller();
    let tracks: Vec<TrackDescriptor> = c.catalog().tracks().to_vec();
    for t in tracks {
        assert!(c.select(t.year, t.session));
        assert_eq!(c.selection(), Some(Selection::new(t.year, t.session)));
        assert_eq!(c.current_track(), Some(&t));
    }
}

#[test]
fn select_loads_resource_and_applies_rate() {
    let mut c = controller().with_rate(0.8);
    c.select(2023, 2);

    assert_eq!(c.playback().state, PlayState::Paused);
    assert_eq!(
        c.surface().calls,
        vec![
            Call::Load(Generation(1), "b".to_string()),
            Call::SetRate(0.8)
        ]
    );
}

#[test]
fn select_unknown_track_is_a_no_op() {
    let mut c = loaded(2023, 1, Some(secs(60)));
    let calls_before = c.surface().calls.len();
    let state_before = c.playback().clone();

    assert!(!c.select(2030, 1));
    assert_eq!(c.selection(), Some(Selection::new(2023, 1)));
    assert_eq!(c.playback(), &state_before);
    assert_eq!(c.surface().calls.len(), calls_before);
}

#[test]
fn selecting_while_playing_resets_before_new_resource_loads() {
    let mut c = loaded(2023, 1, Some(secs(60)));
    start_playing(&mut c);
    at_position(&mut c, secs(42));

    c.select(2024, 1);

    assert!(!c.playback().is_playing());
    assert_eq!(c.playback().state, PlayState::Paused);
    assert_eq!(c.playback().position, Duration::ZERO);
    assert_eq!(c.playback().duration, None);

    let tail = &c.surface().calls[c.surface().calls.len() - 3..];
    assert_eq!(
        tail,
        &[
            Call::Pause,
            Call::Load(Generation(2), "c".to_string()),
            Call::SetRate(1.0)
        ]
    );
}

#[test]
fn advance_follows_catalog_order() {
    let mut c = loaded(2023, 2, None);
    c.advance();
    assert_eq!(c.selection(), Some(Selection::new(2024, 1)));

    c.advance();
    assert_eq!(c.selection(), Some(Selection::new(2023, 1)));

    c.advance();
    assert_eq!(c.selection(), Some(Selection::new(2023, 2)));
}

#[test]
fn advance_without_selection_picks_newest_year_first_session() {
    let mut c = controller();
    assert!(c.advance());
    assert_eq!(c.selection(), Some(Selection::new(2024, 1)));
}

#[test]
fn advance_on_empty_catalog_does_nothing() {
    let mut c = PlaybackController::new(Catalog::default(), FakeSurface::default());
    assert!(!c.advance());
    assert_eq!(c.playback().state, PlayState::Stopped);
}

#[test]
fn toggle_is_notification_driven() {
    let mut c = loaded(2023, 1, None);

    c.toggle_play_pause();
    assert_eq!(c.surface().calls.last(), Some(&Call::Play(Generation(1))));
    assert!(!c.playback().is_playing());

    let g = c.generation();
    assert!(c.handle_event(MediaEvent::new(g, MediaEventKind::PlayStarted)));
    assert!(c.playback().is_playing());

    c.toggle_play_pause();
    assert_eq!(c.surface().calls.last(), Some(&Call::Pause));
    assert!(c.handle_event(MediaEvent::new(g, MediaEventKind::PlayPaused)));
    assert_eq!(c.playback().state, PlayState::Paused);
}

#[test]
fn toggle_while_play_in_flight_pauses() {
    let mut c = loaded(2023, 1, None);
    c.toggle_play_pause();
    c.toggle_play_pause();
    assert_eq!(c.surface().calls.last(), Some(&Call::Pause));

    // Next toggle issues a fresh play.
    c.toggle_play_pause();
    assert_eq!(c.surface().calls.last(), Some(&Call::Play(Generation(1))));
}

#[test]
fn toggle_when_stopped_does_nothing() {
    let mut c = controller();
    c.toggle_play_pause();
    assert!(c.surface().calls.is_empty());
}

#[test]
fn rejected_play_stays_paused() {
    let mut c = loaded(2023, 1, None);
    c.toggle_play_pause();
    let g = c.generation();
    c.handle_event(MediaEvent::new(
        g,
        MediaEventKind::PlayFailed("autoplay blocked".into()),
    ));
    assert_eq!(c.playback().state, PlayState::Paused);

    // A later toggle retries.
    c.toggle_play_pause();
    assert_eq!(c.surface().calls.last(), Some(&Call::Play(g)));
}

#[test]
fn stale_play_resolution_after_swap_is_ignored() {
    let mut c = loaded(2023, 1, None);
    c.toggle_play_pause();
    let stale = c.generation();

    c.advance();
    assert!(!c.handle_event(MediaEvent::new(stale, MediaEventKind::PlayStarted)));
    assert!(!c.playback().is_playing());
    assert!(!c.handle_event(MediaEvent::new(
        stale,
        MediaEventKind::TimeUpdate(secs(30))
    )));
    assert_eq!(c.playback().position, Duration::ZERO);
}

#[test]
fn seek_backward_clamps_at_zero() {
    let mut c = loaded(2023, 1, Some(secs(10)));
    at_position(&mut c, secs(2));
    c.seek_relative(-3.0);
    assert_eq!(c.playback().position, Duration::ZERO);
    assert_eq!(c.surface().calls.last(), Some(&Call::SeekTo(Duration::ZERO)));
}

#[test]
fn seek_forward_clamps_at_duration() {
    let mut c = loaded(2023, 1, Some(secs(100)));
    at_position(&mut c, secs(95));
    c.seek_relative(10.0);
    assert_eq!(c.playback().position, secs(100));
}

#[test]
fn seek_with_unknown_duration_is_unbounded_above() {
    let mut c = loaded(2023, 1, None);
    at_position(&mut c, secs(95));
    c.seek_relative(10.0);
    assert_eq!(c.playback().position, secs(105));
}

#[test]
fn seek_with_unknown_duration_saturates_huge_delta() {
    let mut c = loaded(2023, 1, None);
    at_position(&mut c, secs(95));
    c.seek_relative(1e20);
    assert_eq!(c.playback().position, Duration::MAX);
    assert_eq!(c.surface().calls.last(), Some(&Call::SeekTo(Duration::MAX)));

    c.seek_relative(-1e20);
    assert_eq!(c.playback().position, Duration::ZERO);
}

#[test]
fn seek_ignores_non_finite_delta() {
    let mut c = loaded(2023, 1, Some(secs(100)));
    at_position(&mut c, secs(5));
    let calls = c.surface().calls.len();
    c.seek_relative(f64::NAN);
    c.seek_relative(f64::INFINITY);
    assert_eq!(c.playback().position, secs(5));
    assert_eq!(c.surface().calls.len(), calls);
}

#[test]
fn restart_is_idempotent_and_keeps_play_state() {
    let mut c = loaded(2023, 1, Some(secs(60)));
    start_playing(&mut c);
    at_position(&mut c, secs(20));

    c.restart();
    assert_eq!(c.playback().position, Duration::ZERO);
    c.restart();
    assert_eq!(c.playback().position, Duration::ZERO);
    assert!(c.playback().is_playing());
}

#[test]
fn set_rate_round_trips_within_range() {
    let mut c = loaded(2023, 1, None);
    for r in [0.5, 0.8, 1.0, 1.3, 1.5] {
        c.set_rate(r);
        assert_eq!(c.playback().rate, r);
        assert_eq!(c.surface().calls.last(), Some(&Call::SetRate(r)));
    }
}

#[test]
fn set_rate_clamps_out_of_range_values() {
    let mut c = controller();
    c.set_rate(2.0);
    assert_eq!(c.playback().rate, 1.5);
    c.set_rate(0.1);
    assert_eq!(c.playback().rate, 0.5);
    c.set_rate(f32::NAN);
    assert_eq!(c.playback().rate, 0.5);
    // Nothing loaded, so the surface is not touched.
    assert!(c.surface().calls.is_empty());
}

#[test]
fn rate_survives_resource_swap() {
    let mut c = loaded(2023, 1, None);
    c.set_rate(1.3);
    c.advance();
    assert_eq!(c.playback().rate, 1.3);
    assert_eq!(c.surface().calls.last(), Some(&Call::SetRate(1.3)));
}

#[test]
fn rate_steps_snap_off_grid_rates_to_one_decimal() {
    let mut c = loaded(2023, 1, None);
    c.set_rate(0.85);
    assert_eq!(c.playback().rate, 0.85);

    c.faster(0.1);
    assert_eq!(c.playback().rate, 1.0);

    c.set_rate(1.23);
    c.slower(0.1);
    assert_eq!(c.playback().rate, 1.1);
}

#[test]
fn slower_and_faster_step_without_drift() {
    let mut c = loaded(2023, 1, None);
    for _ in 0..2 {
        c.slower(0.1);
    }
    assert_eq!(c.playback().rate, 0.8);
    for _ in 0..10 {
        c.faster(0.1);
    }
    assert_eq!(c.playback().rate, 1.5);
    for _ in 0..20 {
        c.slower(0.1);
    }
    assert_eq!(c.playback().rate, 0.5);
}

#[test]
fn ended_pauses_at_end_and_allows_seeking() {
    let mut c = loaded(2023, 1, Some(secs(50)));
    start_playing(&mut c);
    let g = c.generation();
    c.handle_event(MediaEvent::new(g, MediaEventKind::Ended));

    assert_eq!(c.playback().state, PlayState::Paused);
    assert_eq!(c.playback().position, secs(50));

    c.seek_relative(-3.0);
    assert_eq!(c.playback().position, secs(47));
}

#[test]
fn progress_guards_unknown_and_zero_duration() {
    let mut state = PlaybackState {
        position: secs(5),
        ..PlaybackState::default()
    };
    assert_eq!(state.progress_percent(), 0.0);

    state.duration = Some(Duration::ZERO);
    assert_eq!(state.progress_percent(), 0.0);

    state.duration = Some(secs(20));
    assert_eq!(state.progress_percent(), 25.0);

    state.position = secs(40);
    assert_eq!(state.progress_percent(), 100.0);
}
