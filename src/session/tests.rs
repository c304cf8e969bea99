use std::time::{Duration, Instant};

use super::*;
use crate::config::Settings;
use crate::import::{ImportStatus, PathSource};
use crate::library::SongRecord;
use crate::playback::PlaybackState;
use crate::playback::fake::FakeEngine;
use crate::testutil::wav_bytes;

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.playback.progress_tick_ms = 10;
    settings
}

fn session() -> (PlayerSession<FakeEngine>, FakeEngine) {
    let engine = FakeEngine::default();
    let probe = engine.clone();
    (PlayerSession::with_engine(engine, settings()), probe)
}

fn seeded(titles: &[&str]) -> (PlayerSession<FakeEngine>, FakeEngine) {
    let (mut session, probe) = session();
    for title in titles {
        session
            .insert(SongRecord::new(*title, FakeEngine::bytes(10)))
            .unwrap();
    }
    (session, probe)
}

/// Wait for background imports to land, polling the session the way a
/// host event loop would.
fn poll_until_report(
    session: &mut PlayerSession<FakeEngine>,
    deadline: Duration,
) -> Vec<crate::import::ImportReport> {
    let start = Instant::now();
    loop {
        let reports = session.poll();
        if !reports.is_empty() {
            return reports;
        }
        assert!(start.elapsed() < deadline, "no import report arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn transport_walkthrough() {
    let (mut session, probe) = seeded(&["First", "Second"]);

    session.play(0).unwrap();
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.track_index(), Some(0));
    assert_eq!(session.current_song().unwrap().title(), "First");

    probe.last_session().borrow_mut().position = Duration::from_secs(2);
    session.pause();
    assert_eq!(session.state(), PlaybackState::Paused);
    assert_eq!(session.cursor(), Duration::from_secs(2));

    session.skip_forward();
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.current_song().unwrap().title(), "Second");

    session.remove_track(1).unwrap();
    assert_eq!(session.state(), PlaybackState::Idle);
    assert!(session.current_song().is_none());
    assert_eq!(session.library().count(), 1);
}

#[test]
fn removing_earlier_track_keeps_the_current_song() {
    let (mut session, _) = seeded(&["A", "B", "C"]);

    session.play(2).unwrap();
    session.remove_track(0).unwrap();

    assert_eq!(session.track_index(), Some(1));
    assert_eq!(session.current_song().unwrap().title(), "C");
    assert_eq!(session.state(), PlaybackState::Playing);
}

#[test]
fn remove_track_out_of_range_is_rejected() {
    let (mut session, _) = seeded(&["A"]);
    let err = session.remove_track(5).unwrap_err();
    assert_eq!(err.position, 5);
    assert_eq!(err.len, 1);
}

#[test]
fn play_id_follows_the_song_across_removals() {
    let (mut session, _) = seeded(&["A", "B", "C"]);
    let id = session.library().get(2).unwrap().id();

    session.remove_track(0).unwrap();
    session.play_id(id).unwrap();
    assert_eq!(session.track_index(), Some(1));
    assert_eq!(session.current_song().unwrap().title(), "C");
}

#[test]
fn play_id_of_a_removed_song_fails() {
    let (mut session, _) = seeded(&["A"]);
    let id = session.library().get(0).unwrap().id();
    session.remove_track(0).unwrap();

    let err = session.play_id(id).unwrap_err();
    assert!(matches!(err, crate::playback::PlaybackError::UnknownSong(gone) if gone == id));
}

#[test]
fn insert_rejects_duplicate_titles() {
    let (mut session, _) = seeded(&["Same"]);
    let err = session
        .insert(SongRecord::new("Same", FakeEngine::bytes(5)))
        .unwrap_err();
    assert_eq!(err.title, "Same");
    assert_eq!(session.library().count(), 1);
}

#[test]
fn poll_applies_progress_ticks() {
    let (mut session, probe) = seeded(&["A"]);

    session.play(0).unwrap();
    probe.last_session().borrow_mut().position = Duration::from_secs(4);

    let start = Instant::now();
    loop {
        session.poll();
        if session.cursor() == Duration::from_secs(4) {
            break;
        }
        assert!(start.elapsed() < Duration::from_secs(5), "tick never landed");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn background_import_lands_in_the_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Evening Song.wav");
    std::fs::write(&path, wav_bytes(8_000, &[(b"IART", "The Band")])).unwrap();

    let (mut session, _) = session();
    session.import(Box::new(PathSource::new(&path)));

    let reports = poll_until_report(&mut session, Duration::from_secs(5));
    assert_eq!(reports.len(), 1);
    assert!(matches!(
        reports[0].outcome,
        Ok(ImportStatus::Added { position: 0 })
    ));

    let record = session.library().get(0).unwrap();
    assert_eq!(record.title(), "Evening Song");
    assert_eq!(record.artist(), Some("The Band"));
}

#[test]
fn duplicate_import_is_reported_and_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Repeat.wav");
    std::fs::write(&path, wav_bytes(8_000, &[])).unwrap();

    let (mut session, _) = session();
    session
        .insert(SongRecord::new("Repeat", FakeEngine::bytes(3)))
        .unwrap();
    session.import(Box::new(PathSource::new(&path)));

    let reports = poll_until_report(&mut session, Duration::from_secs(5));
    assert!(matches!(
        &reports[0].outcome,
        Ok(ImportStatus::Duplicate { title }) if title == "Repeat"
    ));
    assert_eq!(session.library().count(), 1);
}

#[test]
fn library_events_surface_through_the_session() {
    let (mut session, _) = session();
    let events = session.subscribe_library();

    session
        .insert(SongRecord::new("A", FakeEngine::bytes(3)))
        .unwrap();
    session.remove_track(0).unwrap();

    assert!(matches!(
        events.try_recv().unwrap(),
        crate::library::LibraryEvent::Inserted { position: 0, .. }
    ));
    assert!(matches!(
        events.try_recv().unwrap(),
        crate::library::LibraryEvent::Removed { position: 0, .. }
    ));
}

#[test]
fn shutdown_is_idempotent() {
    let (mut session, _) = seeded(&["A"]);
    session.shutdown();
    session.shutdown();
}
