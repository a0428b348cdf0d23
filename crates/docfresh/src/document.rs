use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// An input document supplied by the platform layer.
///
/// The flow never interprets the display location; it only hands it back in
/// [`Outcome::Original`](crate::Outcome::Original).
pub trait DocumentHandle: Send + Sync + 'static {
    /// Open a fresh stream over the full document content.
    ///
    /// Called once per flow attempt, from a blocking worker thread.
    fn open_read_stream(&self) -> io::Result<Box<dyn Read + Send>>;

    fn display_location(&self) -> String;
}

/// A document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }
}

impl DocumentHandle for FileDocument {
    fn open_read_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }

    fn display_location(&self) -> String { self.path.display().to_string() }
}
