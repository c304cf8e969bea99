//! Playback: the transport state machine, the engine boundary, the
//! rodio-backed engine and the progress clock.
//!
//! `PlayerController` owns at most one live engine session and moves
//! between Idle, Playing and Paused; `ProgressClock` drives its
//! periodic cursor refresh from a ticker thread.

mod clock;
mod controller;
mod engine;
mod sink;
mod types;

pub use clock::*;
pub use controller::*;
pub use engine::*;
pub use sink::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
