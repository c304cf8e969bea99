use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// An externally selected audio source (the file-chooser boundary).
///
/// Reading is scoped: `acquire` opens a read grant, and dropping the
/// returned access releases it on every exit path, success or failure.
pub trait MediaSource: Send {
    /// Name of the source, typically the file name; used for the
    /// default title.
    fn name(&self) -> String;

    /// Open the scoped read grant.
    fn acquire(&self) -> io::Result<Box<dyn SourceAccess>>;
}

/// A live read grant on a `MediaSource`.
pub trait SourceAccess {
    /// Read the full contents of the source.
    fn read_all(&mut self) -> io::Result<Vec<u8>>;
}

/// `MediaSource` over a local filesystem path.
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MediaSource for PathSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    }

    fn acquire(&self) -> io::Result<Box<dyn SourceAccess>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(FileAccess { file }))
    }
}

struct FileAccess {
    file: File,
}

impl SourceAccess for FileAccess {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
