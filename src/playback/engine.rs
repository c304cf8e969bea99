//! The decode/render boundary.
//!
//! The controller never touches an audio backend directly; it drives a
//! session through this trait. `sink::RodioEngine` is the real
//! implementation, tests use a deterministic double.

use std::time::Duration;

use super::types::DecodeError;

/// An opaque decode/render primitive.
///
/// A session is scoped to one track: created by `load`, torn down by
/// `stop` or by being dropped when the controller replaces it.
pub trait AudioEngine {
    type Session;

    /// Decode the buffer and prepare a paused session.
    fn load(&self, audio_data: &[u8]) -> Result<Self::Session, DecodeError>;

    /// The probed duration of the loaded stream, if known.
    fn total_duration(&self, session: &Self::Session) -> Option<Duration>;

    /// Start or resume the render clock.
    fn play(&self, session: &mut Self::Session);

    /// Suspend the render clock.
    fn pause(&self, session: &mut Self::Session);

    /// Reposition the render clock. `position` has already been
    /// clamped by the caller.
    fn seek(&self, session: &mut Self::Session, position: Duration);

    /// Tear the session down. Idempotent.
    fn stop(&self, session: &mut Self::Session);

    /// Live position of the render clock.
    fn position(&self, session: &Self::Session) -> Duration;

    /// Whether the stream played to its natural end.
    fn finished(&self, session: &Self::Session) -> bool;
}
