//! Platform collaborators: preview surface, download delivery, error reporting
//!
//! This module contains the traits the converter core uses to talk to its
//! host environment, plus in-memory implementations so the pipeline can run
//! and be tested without any real rendering surface.

pub mod download;
pub mod preview;
pub mod report;

pub use download::{DirDownloadSink, DownloadSink, MemorySink};
pub use preview::{MemoryPreview, PreviewSurface, PreviewUpdate};
pub use report::{ErrorReporter, LogReporter, MemoryReporter};
