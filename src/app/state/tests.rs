use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tokio::sync::mpsc;

use super::{AppMode, AppState};
use crate::{
    app::events::AppEvent,
    domain::occupancy::StudioSnapshot,
    test_support::{afternoon_snapshot, test_cli},
};

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

#[test]
fn new_state_starts_loading_with_studio_name() {
    let state = AppState::new(&test_cli());
    assert_eq!(state.mode, AppMode::Loading);
    assert!(state.running);
    assert!(state.snapshot.is_none());
    assert_eq!(state.studio_name(), "Karlsruhe Oststadt");
}

#[tokio::test]
async fn quit_keys_emit_quit_event() {
    let cli = test_cli();
    let mut state = AppState::new(&cli);
    let (tx, mut rx) = mpsc::channel(8);

    for event in [
        key(KeyCode::Char('q'), KeyModifiers::NONE),
        key(KeyCode::Esc, KeyModifiers::NONE),
        key(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        state
            .handle_event(AppEvent::Input(event), &tx, &cli)
            .await
            .unwrap();
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Quit)));
    }
}

#[tokio::test]
async fn key_release_is_ignored() {
    let cli = test_cli();
    let mut state = AppState::new(&cli);
    let (tx, mut rx) = mpsc::channel(8);

    let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    release.state = KeyEventState::NONE;
    state
        .handle_event(AppEvent::Input(Event::Key(release)), &tx, &cli)
        .await
        .unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn refresh_is_skipped_while_fetch_in_flight() {
    let cli = test_cli();
    let mut state = AppState::new(&cli);
    state.fetch_in_flight = true;
    let (tx, mut rx) = mpsc::channel(8);

    state
        .handle_event(
            AppEvent::Input(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            &tx,
            &cli,
        )
        .await
        .unwrap();
    state
        .handle_event(AppEvent::TickRefresh, &tx, &cli)
        .await
        .unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn completed_fetch_makes_state_ready() {
    let cli = test_cli();
    let mut state = AppState::new(&cli);
    let (tx, _rx) = mpsc::channel(8);

    state
        .handle_event(AppEvent::FetchStarted, &tx, &cli)
        .await
        .unwrap();
    assert!(state.fetch_in_flight);
    assert_eq!(state.mode, AppMode::Loading);

    state
        .handle_event(
            AppEvent::FetchCompleted(Box::new(afternoon_snapshot())),
            &tx,
            &cli,
        )
        .await
        .unwrap();
    assert!(!state.fetch_in_flight);
    assert_eq!(state.mode, AppMode::Ready);
    assert!(state.updated_at.is_some());
    assert_eq!(
        state.snapshot.as_ref().and_then(|s| s.current_percentage),
        Some(42.0)
    );
}

#[tokio::test]
async fn failed_snapshot_still_counts_as_ready() {
    let cli = test_cli();
    let mut state = AppState::new(&cli);
    let (tx, _rx) = mpsc::channel(8);

    state
        .handle_event(
            AppEvent::FetchCompleted(Box::new(StudioSnapshot::failed("Somewhere"))),
            &tx,
            &cli,
        )
        .await
        .unwrap();
    state
        .handle_event(AppEvent::FetchStarted, &tx, &cli)
        .await
        .unwrap();
    assert_eq!(state.mode, AppMode::Ready);
    assert_eq!(state.studio_name(), "Somewhere");
}

#[tokio::test]
async fn quit_event_sets_quit_mode() {
    let cli = test_cli();
    let mut state = AppState::new(&cli);
    let (tx, _rx) = mpsc::channel(8);
    state.handle_event(AppEvent::Quit, &tx, &cli).await.unwrap();
    assert_eq!(state.mode, AppMode::Quit);
}
