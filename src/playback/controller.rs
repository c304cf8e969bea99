use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};

use crate::library::SongLibrary;

use super::engine::AudioEngine;
use super::types::{PlaybackError, PlaybackHandle, PlaybackSnapshot, PlaybackState};

struct ActiveTrack<S> {
    index: usize,
    session: S,
    paused: bool,
    cursor: Duration,
    total: Duration,
}

/// The transport state machine.
///
/// Owns at most one engine session at a time; the session exists
/// exactly when the state is Playing or Paused. Every failure leaves
/// the controller in a well-defined state: `InvalidIndex` keeps the
/// previous session, a decode failure recovers to Idle.
pub struct PlayerController<E: AudioEngine> {
    engine: E,
    active: Option<ActiveTrack<E::Session>>,
    shared: PlaybackHandle,
}

impl<E: AudioEngine> PlayerController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            active: None,
            shared: Arc::new(Mutex::new(PlaybackSnapshot::default())),
        }
    }

    /// Shared observable snapshot, refreshed after every mutation.
    pub fn playback_handle(&self) -> PlaybackHandle {
        self.shared.clone()
    }

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            None => PlaybackState::Idle,
            Some(a) if a.paused => PlaybackState::Paused,
            Some(_) => PlaybackState::Playing,
        }
    }

    /// Defined exactly when the state is not Idle.
    pub fn track_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// Elapsed time within the current track; zero when Idle.
    pub fn cursor(&self) -> Duration {
        self.active.as_ref().map_or(Duration::ZERO, |a| a.cursor)
    }

    /// Probed duration of the live session; authoritative over the
    /// record's stored duration. Zero when Idle or unknown.
    pub fn total_duration(&self) -> Duration {
        self.active.as_ref().map_or(Duration::ZERO, |a| a.total)
    }

    /// Start playing the track at `index`, tearing down any previous
    /// session first.
    pub fn play(&mut self, library: &SongLibrary, index: usize) -> Result<(), PlaybackError> {
        let record = library
            .get(index)
            .ok_or(PlaybackError::InvalidIndex(index))?;

        self.teardown();

        let mut session = match self.engine.load(record.audio_data()) {
            Ok(s) => s,
            Err(e) => {
                warn!(index, title = record.title(), error = %e, "decode failed");
                self.publish();
                return Err(e.into());
            }
        };

        let total = self
            .engine
            .total_duration(&session)
            .or(record.duration())
            .unwrap_or(Duration::ZERO);
        self.engine.play(&mut session);
        debug!(index, title = record.title(), "playback started");

        self.active = Some(ActiveTrack {
            index,
            session,
            paused: false,
            cursor: Duration::ZERO,
            total,
        });
        self.publish();
        Ok(())
    }

    /// Suspend the render clock; the cursor freezes at its last value.
    pub fn pause(&mut self) {
        if let Some(a) = self.active.as_mut() {
            if !a.paused {
                a.cursor = self.engine.position(&a.session).min(a.total);
                self.engine.pause(&mut a.session);
                a.paused = true;
                debug!(index = a.index, "paused");
            }
        }
        self.publish();
    }

    /// Resume the render clock from the frozen cursor.
    pub fn resume(&mut self) {
        if let Some(a) = self.active.as_mut() {
            if a.paused {
                self.engine.play(&mut a.session);
                a.paused = false;
                debug!(index = a.index, "resumed");
            }
        }
        self.publish();
    }

    /// Play/pause toggle. With no current track this is a no-op.
    pub fn toggle(&mut self) {
        match self.state() {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.resume(),
            PlaybackState::Idle => {}
        }
    }

    /// Tear down the session and return to Idle.
    pub fn stop(&mut self) {
        self.teardown();
        self.publish();
    }

    /// Reposition within the current track. `time` is clamped to
    /// `[0, total]`; the state is unchanged. No-op when Idle.
    pub fn seek(&mut self, time: Duration) {
        if let Some(a) = self.active.as_mut() {
            let clamped = time.min(a.total);
            self.engine.seek(&mut a.session, clamped);
            a.cursor = clamped;
        }
        self.publish();
    }

    /// Play the next track, wrapping past the end of the library.
    /// No-op on an empty library; from Idle this starts at the front.
    pub fn skip_forward(&mut self, library: &SongLibrary) {
        if library.is_empty() {
            return;
        }
        let next = match self.track_index() {
            Some(i) => (i + 1) % library.count(),
            None => 0,
        };
        if let Err(e) = self.play(library, next) {
            warn!(next, error = %e, "skip forward failed");
        }
    }

    /// Play the previous track, wrapping from the front to the end.
    /// No-op on an empty library; from Idle this starts at the back.
    pub fn skip_backward(&mut self, library: &SongLibrary) {
        if library.is_empty() {
            return;
        }
        let prev = match self.track_index() {
            Some(i) if i > 0 => i - 1,
            _ => library.count() - 1,
        };
        if let Err(e) = self.play(library, prev) {
            warn!(prev, error = %e, "skip backward failed");
        }
    }

    /// Progress-clock entry point: refresh the cursor from the live
    /// session and advance on natural end of track. Ignored while Idle
    /// or Paused.
    pub fn tick(&mut self, library: &SongLibrary) {
        let finished = match self.active.as_ref() {
            Some(a) if !a.paused => self.engine.finished(&a.session),
            _ => return,
        };

        if finished {
            debug!("track finished, advancing");
            if library.is_empty() {
                self.stop();
            } else {
                self.skip_forward(library);
            }
            return;
        }

        if let Some(a) = self.active.as_mut() {
            a.cursor = self.engine.position(&a.session).min(a.total);
        }
        self.publish();
    }

    /// Keep the session consistent after a library removal: stop if the
    /// current track was removed, shift the index if an earlier one was.
    pub fn handle_removed(&mut self, removed: usize) {
        let Some(index) = self.track_index() else {
            return;
        };
        if index == removed {
            self.stop();
        } else if removed < index {
            if let Some(a) = self.active.as_mut() {
                a.index -= 1;
            }
            self.publish();
        }
    }

    fn teardown(&mut self) {
        if let Some(mut a) = self.active.take() {
            self.engine.stop(&mut a.session);
            debug!(index = a.index, "session released");
        }
    }

    fn publish(&self) {
        if let Ok(mut snap) = self.shared.lock() {
            *snap = PlaybackSnapshot {
                state: self.state(),
                track_index: self.track_index(),
                cursor: self.cursor(),
                total: self.total_duration(),
            };
        }
    }
}
