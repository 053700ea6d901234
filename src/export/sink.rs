//! Download sinks: where an encoded export is handed off to the host

use std::future::Future;
use std::io;
use std::sync::Mutex;

use crate::export::ExportedImage;
use crate::rendering::surface::lock;

/// Host-side receiver of an exported file (the "download trigger").
pub trait DownloadSink {
    /// Hand `file` to the host. An error here surfaces as
    /// `Error::DownloadTriggerFailed`.
    fn deliver(&self, file: &ExportedImage) -> impl Future<Output = io::Result<()>>;
}

/// Collects exported files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<ExportedImage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files delivered so far.
    pub fn len(&self) -> usize {
        lock(&self.files).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn files(&self) -> Vec<ExportedImage> {
        lock(&self.files).clone()
    }

    /// Remove and return everything delivered so far.
    pub fn take(&self) -> Vec<ExportedImage> {
        std::mem::take(&mut *lock(&self.files))
    }
}

impl DownloadSink for MemorySink {
    async fn deliver(&self, file: &ExportedImage) -> io::Result<()> {
        lock(&self.files).push(file.clone());
        Ok(())
    }
}

#[cfg(feature = "fs-sink")]
pub use fs::DirectorySink;

#[cfg(feature = "fs-sink")]
mod fs {
    use std::io;
    use std::path::{Path, PathBuf};

    use super::DownloadSink;
    use crate::export::ExportedImage;

    /// Writes each export into a directory under its suggested file name,
    /// replacing any existing file of the same name.
    #[derive(Debug, Clone)]
    pub struct DirectorySink {
        dir: PathBuf,
    }

    impl DirectorySink {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// Path an export with `filename` is written to.
        pub fn path_for(&self, filename: &str) -> PathBuf {
            self.dir.join(filename)
        }
    }

    impl DownloadSink for DirectorySink {
        async fn deliver(&self, file: &ExportedImage) -> io::Result<()> {
            if !tokio::fs::metadata(&self.dir).await?.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} is not a directory", self.dir.display()),
                ));
            }
            tokio::fs::write(self.path_for(&file.suggested_filename), &file.bytes).await
        }
    }
}
