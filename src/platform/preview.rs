/// Preview surface: supplies the SVG document currently considered renderable

use std::sync::Mutex;

use crate::SourceDocument;

/// Source of the document a batch renders from.
///
/// The exporter snapshots the document once per batch; implementations may
/// replace their contents at any time between batches.
pub trait PreviewSurface: Send + Sync {
    /// The root SVG document currently considered renderable, or `None`
    fn current_document(&self) -> Option<SourceDocument>;
}

/// Outcome of feeding new input text to a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewUpdate {
    /// Input was empty; the preview now shows its placeholder, no document
    Cleared,
    /// Input failed the shallow marker check; the previous document, if
    /// any, is kept on display
    Rejected,
    /// Input replaced the current document
    Updated,
}

/// In-memory preview holding the last valid document behind a Mutex so a
/// shared reference can be updated while a converter reads from it
pub struct MemoryPreview {
    document: Mutex<Option<SourceDocument>>,
}

impl MemoryPreview {
    pub fn new() -> Self {
        MemoryPreview { document: Mutex::new(None) }
    }

    /// Feed new input text, mirroring a live preview's update rules:
    /// empty input clears the preview, input without both `<svg>` markers
    /// is rejected without touching the current document, valid input
    /// replaces it.
    pub fn set_source(&self, text: &str) -> PreviewUpdate {
        if text.trim().is_empty() {
            *self.document.lock().unwrap() = None;
            return PreviewUpdate::Cleared;
        }
        match SourceDocument::parse(text) {
            Some(doc) => {
                *self.document.lock().unwrap() = Some(doc);
                PreviewUpdate::Updated
            }
            None => PreviewUpdate::Rejected,
        }
    }
}

impl Default for MemoryPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSurface for MemoryPreview {
    fn current_document(&self) -> Option<SourceDocument> {
        self.document.lock().unwrap().clone()
    }
}
