//! Deterministic engine double for controller tests.
//!
//! Sessions share their state through `Rc<RefCell<..>>` so a test can
//! move the render clock or signal end-of-track by hand.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::engine::AudioEngine;
use super::types::DecodeError;

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub playing: bool,
    pub stopped: bool,
    pub position: Duration,
    pub total: Option<Duration>,
    pub finished: bool,
}

pub(crate) type FakeSession = Rc<RefCell<SessionState>>;

/// Fake decode primitive. Buffers starting with `b"bad"` fail to load;
/// otherwise the first byte is the probed duration in whole seconds
/// (0 or an empty buffer = unknown).
#[derive(Clone, Default)]
pub(crate) struct FakeEngine {
    sessions: Rc<RefCell<Vec<FakeSession>>>,
}

impl FakeEngine {
    /// Encode a buffer with the given probed duration.
    pub fn bytes(total_secs: u8) -> Vec<u8> {
        vec![total_secs]
    }

    /// The most recently loaded session.
    pub fn last_session(&self) -> FakeSession {
        self.sessions
            .borrow()
            .last()
            .cloned()
            .expect("no session loaded")
    }

    pub fn session_count(&self) -> usize {
        self.sessions.borrow().len()
    }
}

impl AudioEngine for FakeEngine {
    type Session = FakeSession;

    fn load(&self, audio_data: &[u8]) -> Result<FakeSession, DecodeError> {
        if audio_data.starts_with(b"bad") {
            return Err(DecodeError("fake decoder rejected the buffer".into()));
        }
        let total = audio_data
            .first()
            .copied()
            .filter(|&s| s > 0)
            .map(|s| Duration::from_secs(u64::from(s)));
        let session: FakeSession = Rc::new(RefCell::new(SessionState {
            total,
            ..SessionState::default()
        }));
        self.sessions.borrow_mut().push(session.clone());
        Ok(session)
    }

    fn total_duration(&self, session: &FakeSession) -> Option<Duration> {
        session.borrow().total
    }

    fn play(&self, session: &mut FakeSession) {
        session.borrow_mut().playing = true;
    }

    fn pause(&self, session: &mut FakeSession) {
        session.borrow_mut().playing = false;
    }

    fn seek(&self, session: &mut FakeSession, position: Duration) {
        session.borrow_mut().position = position;
    }

    fn stop(&self, session: &mut FakeSession) {
        let mut state = session.borrow_mut();
        state.playing = false;
        state.stopped = true;
    }

    fn position(&self, session: &FakeSession) -> Duration {
        session.borrow().position
    }

    fn finished(&self, session: &FakeSession) -> bool {
        session.borrow().finished
    }
}
