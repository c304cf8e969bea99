use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::Settings;
use crate::import::{ImportReport, Importer, MediaSource};
use crate::library::{LibraryEvent, OutOfRange, SongId, SongLibrary, SongRecord};
use crate::playback::{
    AudioEngine, PlaybackError, PlaybackHandle, PlaybackState, PlayerController, ProgressClock,
    RodioEngine,
};

/// The single owning context for a player instance.
///
/// Everything mutable lives here: the song library, the transport
/// controller with its live engine session, the background importer and
/// the progress clock. Callers drive it from one thread and call
/// [`poll`](Self::poll) periodically (or whenever convenient) to land
/// finished imports and progress ticks.
pub struct PlayerSession<E: AudioEngine> {
    library: SongLibrary,
    controller: PlayerController<E>,
    importer: Importer,
    clock: ProgressClock,
    ticks: Receiver<Instant>,
}

impl PlayerSession<RodioEngine> {
    /// Open a session on the default audio output device.
    pub fn open(settings: Settings) -> Result<Self, rodio::StreamError> {
        let engine = RodioEngine::new()?;
        Ok(Self::with_engine(engine, settings))
    }
}

impl<E: AudioEngine> PlayerSession<E> {
    /// Build a session around a caller-supplied engine.
    pub fn with_engine(engine: E, settings: Settings) -> Self {
        let interval = Duration::from_millis(settings.playback.progress_tick_ms.max(1));
        let (clock, ticks) = ProgressClock::start(interval);
        info!(tick_ms = interval.as_millis() as u64, "session opened");

        Self {
            library: SongLibrary::new(),
            controller: PlayerController::new(engine),
            importer: Importer::new(settings.import),
            clock,
            ticks,
        }
    }

    pub fn library(&self) -> &SongLibrary {
        &self.library
    }

    /// Change notifications for the library (inserts and removals).
    pub fn subscribe_library(&mut self) -> Receiver<LibraryEvent> {
        self.library.subscribe()
    }

    /// Insert an already-built record, bypassing the import pipeline.
    pub fn insert(&mut self, record: SongRecord) -> Result<usize, crate::library::DuplicateSong> {
        self.library.insert(record)
    }

    /// The record the transport currently points at, if any.
    pub fn current_song(&self) -> Option<&SongRecord> {
        self.controller
            .track_index()
            .and_then(|i| self.library.get(i))
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.controller.playback_handle()
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn track_index(&self) -> Option<usize> {
        self.controller.track_index()
    }

    pub fn cursor(&self) -> Duration {
        self.controller.cursor()
    }

    pub fn total_duration(&self) -> Duration {
        self.controller.total_duration()
    }

    /// Queue a source for background import; returns immediately. The
    /// outcome lands in the library on a later [`poll`](Self::poll).
    pub fn import(&self, source: Box<dyn MediaSource>) {
        self.importer.submit(source);
    }

    /// Land pending work: finished imports are inserted into the
    /// library, and queued progress ticks are coalesced into a single
    /// controller refresh.
    pub fn poll(&mut self) -> Vec<ImportReport> {
        let reports = self.importer.drain_into(&mut self.library);

        let mut ticked = false;
        while self.ticks.try_recv().is_ok() {
            ticked = true;
        }
        if ticked {
            self.controller.tick(&self.library);
        }

        reports
    }

    pub fn play(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.controller.play(&self.library, index)
    }

    /// Play by stable id, resolving it to the song's current position.
    pub fn play_id(&mut self, id: SongId) -> Result<(), PlaybackError> {
        let index = self
            .library
            .position_of(id)
            .ok_or(PlaybackError::UnknownSong(id))?;
        self.controller.play(&self.library, index)
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
    }

    pub fn toggle(&mut self) {
        self.controller.toggle();
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn seek(&mut self, time: Duration) {
        self.controller.seek(time);
    }

    pub fn skip_forward(&mut self) {
        self.controller.skip_forward(&self.library);
    }

    pub fn skip_backward(&mut self) {
        self.controller.skip_backward(&self.library);
    }

    /// Remove the track at `position`. If it is the current track the
    /// transport stops; a track before the current one shifts the
    /// transport's index down so it keeps naming the same record.
    pub fn remove_track(&mut self, position: usize) -> Result<SongRecord, OutOfRange> {
        let record = self.library.remove_at(position)?;
        self.controller.handle_removed(position);
        debug!(position, title = record.title(), "track removed");
        Ok(record)
    }

    /// Stop the importer worker and the progress clock. Also runs on
    /// drop; calling it explicitly just makes the join points visible.
    pub fn shutdown(&mut self) {
        self.importer.shutdown();
        self.clock.stop();
        info!("session closed");
    }
}
