/// Download delivery: where finished artifacts go

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Receives one encoded artifact per export item.
///
/// Delivery is fire-and-forget from the exporter's point of view except
/// that a returned error aborts the remaining batch like any other item
/// failure.
pub trait DownloadSink: Send + Sync {
    fn deliver(&self, data: &[u8], filename: &str) -> Result<()>;
}

/// Writes each artifact as `{dir}/{filename}`; the CLI's download action
pub struct DirDownloadSink {
    dir: PathBuf,
}

impl DirDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirDownloadSink { dir: dir.into() }
    }
}

impl DownloadSink for DirDownloadSink {
    fn deliver(&self, data: &[u8], filename: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::DeliveryFailed(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, data)
            .map_err(|e| Error::DeliveryFailed(format!("{}: {}", path.display(), e)))
    }
}

/// Records deliveries in order; test double
pub struct MemorySink {
    deliveries: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink { deliveries: Mutex::new(Vec::new()) }
    }

    /// Delivered filenames, oldest first
    pub fn filenames(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Delivered (filename, bytes) pairs, oldest first
    pub fn deliveries(&self) -> Vec<(String, Vec<u8>)> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&self, data: &[u8], filename: &str) -> Result<()> {
        self.deliveries
            .lock()
            .unwrap()
            .push((filename.to_string(), data.to_vec()));
        Ok(())
    }
}
