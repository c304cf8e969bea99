//! Rodio-backed `AudioEngine`.
//!
//! One `OutputStream` per engine; each session owns a `Sink` fed from a
//! decoder over the record's bytes. Seeking rebuilds the sink with
//! `skip_duration`, and elapsed time is tracked with a start instant
//! plus the time accumulated across pauses.

use std::io::Cursor;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::warn;

use super::engine::AudioEngine;
use super::types::DecodeError;

pub struct RodioEngine {
    stream: OutputStream,
}

pub struct RodioSession {
    sink: Sink,
    // Retained so seeking can rebuild the decoder.
    audio_data: Vec<u8>,
    total: Option<Duration>,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl RodioEngine {
    /// Open the default audio output device.
    pub fn new() -> Result<Self, rodio::StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. Useful in
        // debugging, noisy for library hosts.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }

    fn build_sink(
        &self,
        audio_data: &[u8],
        start_at: Duration,
    ) -> Result<(Sink, Option<Duration>), DecodeError> {
        let source = Decoder::new(Cursor::new(audio_data.to_vec()))
            .map_err(|e| DecodeError(e.to_string()))?;
        let total = source.total_duration();
        // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
        let source = source.skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        Ok((sink, total))
    }
}

impl AudioEngine for RodioEngine {
    type Session = RodioSession;

    fn load(&self, audio_data: &[u8]) -> Result<RodioSession, DecodeError> {
        let (sink, total) = self.build_sink(audio_data, Duration::ZERO)?;
        Ok(RodioSession {
            sink,
            audio_data: audio_data.to_vec(),
            total,
            started_at: None,
            accumulated: Duration::ZERO,
        })
    }

    fn total_duration(&self, session: &RodioSession) -> Option<Duration> {
        session.total
    }

    fn play(&self, session: &mut RodioSession) {
        session.sink.play();
        if session.started_at.is_none() {
            session.started_at = Some(Instant::now());
        }
    }

    fn pause(&self, session: &mut RodioSession) {
        session.sink.pause();
        if let Some(started) = session.started_at.take() {
            session.accumulated += started.elapsed();
        }
    }

    fn seek(&self, session: &mut RodioSession, position: Duration) {
        // Build the replacement before touching the old sink, so a
        // rebuild failure leaves the session playing where it was.
        let (sink, _) = match self.build_sink(&session.audio_data, position) {
            Ok(built) => built,
            Err(e) => {
                warn!(error = %e, "seek rebuild failed, position unchanged");
                return;
            }
        };

        let was_playing = session.started_at.is_some();
        session.sink.stop();
        if was_playing {
            sink.play();
        }
        session.sink = sink;

        session.accumulated = position;
        session.started_at = was_playing.then(Instant::now);
    }

    fn stop(&self, session: &mut RodioSession) {
        session.sink.stop();
        session.started_at = None;
        session.accumulated = Duration::ZERO;
    }

    fn position(&self, session: &RodioSession) -> Duration {
        session.accumulated
            + session
                .started_at
                .map_or(Duration::ZERO, |started| started.elapsed())
    }

    fn finished(&self, session: &RodioSession) -> bool {
        session.sink.empty()
    }
}
