use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ImportSettings;
use crate::library::{SongLibrary, SongRecord};
use crate::metadata::{self, ExtractError};

use super::source::MediaSource;

/// Import failure. The library is left untouched in every case.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported container format")]
    UnsupportedFormat,
    #[error("malformed container: {0}")]
    Parse(String),
    #[error("source is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

impl From<ExtractError> for ImportError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat => Self::UnsupportedFormat,
            ExtractError::Parse(e) => Self::Parse(e.to_string()),
            ExtractError::Io(e) => Self::Io(e),
        }
    }
}

/// How a successful import ended up. A duplicate is informational, not
/// a failure: the import was a no-op.
#[derive(Debug)]
pub enum ImportStatus {
    Added { position: usize },
    Duplicate { title: String },
}

/// A finished background import, before the library insert.
pub struct ImportCompletion {
    pub source_name: String,
    pub result: Result<SongRecord, ImportError>,
}

/// A completed import as surfaced to the caller, after the insert.
#[derive(Debug)]
pub struct ImportReport {
    pub source_name: String,
    pub outcome: Result<ImportStatus, ImportError>,
}

enum WorkerCmd {
    Import(Box<dyn MediaSource>),
    Quit,
}

/// Background import worker. Sources are read and parsed off the
/// owning context; finished records come back over the completion
/// channel, and the owner performs the (serialized) library inserts.
pub struct Importer {
    tx: Sender<WorkerCmd>,
    completions: Receiver<ImportCompletion>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Importer {
    pub fn new(settings: ImportSettings) -> Self {
        let (tx, rx) = mpsc::channel::<WorkerCmd>();
        let (done_tx, done_rx) = mpsc::channel::<ImportCompletion>();

        let join = thread::spawn(move || worker(rx, done_tx, settings));

        Self {
            tx,
            completions: done_rx,
            join: Mutex::new(Some(join)),
        }
    }

    /// Queue a source for import and return immediately. The outcome
    /// surfaces later as an `ImportCompletion`.
    pub fn submit(&self, source: Box<dyn MediaSource>) {
        let _ = self.tx.send(WorkerCmd::Import(source));
    }

    pub fn completions(&self) -> &Receiver<ImportCompletion> {
        &self.completions
    }

    /// Drain finished imports into `library`. Inserts happen here, on
    /// the calling context, in completion order; dedup is checked at
    /// insert time.
    pub fn drain_into(&self, library: &mut SongLibrary) -> Vec<ImportReport> {
        let mut reports = Vec::new();
        while let Ok(done) = self.completions.try_recv() {
            reports.push(apply_completion(done, library));
        }
        reports
    }

    /// Stop the worker and wait for it to finish.
    pub fn shutdown(&self) {
        let _ = self.tx.send(WorkerCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Drop for Importer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker(rx: Receiver<WorkerCmd>, done: Sender<ImportCompletion>, settings: ImportSettings) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            WorkerCmd::Import(source) => {
                let source_name = source.name();
                debug!(source = %source_name, "import started");
                let result = read_record(source.as_ref(), &settings);
                if done.send(ImportCompletion { source_name, result }).is_err() {
                    break;
                }
            }
            WorkerCmd::Quit => break,
        }
    }
}

/// Insert one finished import, turning a title collision into the
/// informational duplicate outcome.
pub fn apply_completion(done: ImportCompletion, library: &mut SongLibrary) -> ImportReport {
    let outcome = match done.result {
        Ok(record) => match library.insert(record) {
            Ok(position) => {
                info!(source = %done.source_name, position, "import finished");
                Ok(ImportStatus::Added { position })
            }
            Err(dup) => {
                info!(source = %done.source_name, title = %dup.title, "duplicate import ignored");
                Ok(ImportStatus::Duplicate { title: dup.title })
            }
        },
        Err(e) => {
            warn!(source = %done.source_name, error = %e, "import failed");
            Err(e)
        }
    };
    ImportReport {
        source_name: done.source_name,
        outcome,
    }
}

/// Read and extract one source. The read grant opened here is released
/// on every exit path, including failures.
pub fn read_record(
    source: &dyn MediaSource,
    settings: &ImportSettings,
) -> Result<SongRecord, ImportError> {
    let name = source.name();
    if !settings.allows_extension_of(&name) {
        return Err(ImportError::UnsupportedFormat);
    }

    let mut access = source.acquire()?;
    let bytes = access.read_all()?;
    drop(access);

    if let Some(limit) = settings.max_file_bytes {
        if bytes.len() as u64 > limit {
            return Err(ImportError::TooLarge {
                size: bytes.len() as u64,
                limit,
            });
        }
    }

    Ok(metadata::extract(bytes, &name)?)
}

/// Synchronous import: read, extract and insert in one call. The
/// background path (`submit` + `drain_into`) goes through the same
/// steps.
pub fn import_blocking(
    source: &dyn MediaSource,
    settings: &ImportSettings,
    library: &mut SongLibrary,
) -> Result<ImportStatus, ImportError> {
    let record = read_record(source, settings)?;
    match library.insert(record) {
        Ok(position) => Ok(ImportStatus::Added { position }),
        Err(dup) => Ok(ImportStatus::Duplicate { title: dup.title }),
    }
}
