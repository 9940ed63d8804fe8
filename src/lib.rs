//! svgexport
//!
//! An SVG-to-raster export engine: hold the currently renderable SVG
//! document the way a live preview surface would, then export PNG/JPG
//! renditions of it at one or many sizes, delivering each finished file
//! through a pluggable download sink.
//!
//! # Features
//!
//! - **Rasterizer**: decodes SVG markup into a pixel surface of exactly the
//!   requested size (resvg/tiny-skia backed) and encodes PNG or JPG
//! - **Batch Exporter**: runs single exports, the fixed icon-size set, or
//!   the combined all-formats bundle strictly in order with per-item
//!   failure isolation
//! - **Injected collaborators**: the preview surface, download sink and
//!   error reporter are traits, so the core runs headless and testable
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use svgexport::platform::{DirDownloadSink, LogReporter, MemoryPreview};
//! use svgexport::{Converter, ConverterConfig, ExportFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let preview = Arc::new(MemoryPreview::new());
//! preview.set_source("<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>");
//!
//! let converter = Converter::new(
//!     ConverterConfig::default(),
//!     preview,
//!     Arc::new(DirDownloadSink::new("out")),
//!     Arc::new(LogReporter),
//! );
//! converter.export_one(256, 256, ExportFormat::Png)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use base64::Engine as Base64Engine;
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod rendering;

// Batch export orchestration
pub mod convert;

// Collaborator surfaces (preview, download sink, error reporting)
pub mod platform;

// Async-friendly converter API (worker-backed abstraction)
pub mod async_api;

// Re-export the main entry points at the crate root for ergonomic use
pub use async_api::AsyncConverter;
pub use convert::Converter;
pub use rendering::raster::rasterize;

/// Configuration for the converter
///
/// This struct contains the knobs shared by the rasterizer and the batch
/// exporter. The defaults mirror the interactive tool this engine powers:
/// a 200px export box, the {16, 48, 128} icon set, and a 100ms pause
/// between the download triggers of a multi-file batch.
///
/// # Examples
///
/// ```
/// let cfg = svgexport::ConverterConfig::default();
/// assert_eq!(cfg.default_size, 200);
/// assert_eq!(cfg.icon_sizes, vec![16, 48, 128]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Export box used when the caller supplies no dimensions
    pub default_size: u32,
    /// Square sizes produced by the icon-set export, in output order
    pub icon_sizes: Vec<u32>,
    /// Pause between items of a multi-file batch, in milliseconds.
    /// Spaces out download triggers so the host can register each one;
    /// 0 disables the pause entirely.
    pub pacing_delay_ms: u64,
    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
    /// Per-command timeout for the async API in milliseconds (0 => none)
    pub command_timeout_ms: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_size: 200,
            icon_sizes: vec![16, 48, 128],
            pacing_delay_ms: 100,
            jpeg_quality: 90,
            command_timeout_ms: 0,
        }
    }
}

/// Raster output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpg,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    /// MIME type of the encoded data
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            other => Err(format!("unknown format '{}', expected png or jpg", other)),
        }
    }
}

/// One export to perform: a target box and an output format
///
/// Requests carry no validation of their own; the rasterizer rejects a zero
/// dimension when the request is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn new(width: u32, height: u32, format: ExportFormat) -> Self {
        Self { width, height, format }
    }

    /// Suggested filename for the produced artifact: `{w}x{h}.{ext}`
    pub fn filename(&self) -> String {
        format!("{}x{}.{}", self.width, self.height, self.format.extension())
    }
}

/// Raw SVG markup held by the preview surface
///
/// Validity is checked only shallowly: the text must contain an opening `<svg`
/// and a closing `</svg>` marker. No grammar-level validation happens here;
/// markup that passes the marker check can still fail to decode at
/// rasterization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    markup: String,
}

impl SourceDocument {
    /// Wrap `markup` if it passes the shallow marker check
    pub fn parse(markup: &str) -> Option<Self> {
        let open = markup.find("<svg")?;
        let close = markup.rfind("</svg>")?;
        if close < open {
            return None;
        }
        Some(Self { markup: markup.to_string() })
    }

    /// The full text as supplied
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The root-element slice: from the first `<svg` through the last
    /// `</svg>`, so prose or whitespace pasted around the element is not
    /// fed to the decoder
    pub fn root_markup(&self) -> &str {
        let start = self.markup.find("<svg").unwrap_or(0);
        let end = self
            .markup
            .rfind("</svg>")
            .map(|i| i + "</svg>".len())
            .unwrap_or(self.markup.len());
        &self.markup[start..end]
    }
}

/// One produced output image, ready for delivery
///
/// Artifacts are built fresh per request and never cached; two exports of
/// the same unchanged document yield byte-identical data.
#[derive(Debug, Clone)]
pub struct RasterArtifact {
    /// Pixel width of the encoded image
    pub width: u32,
    /// Pixel height of the encoded image
    pub height: u32,
    /// Encoding of `data`
    pub format: ExportFormat,
    /// Encoded image bytes
    pub data: Vec<u8>,
    /// Suggested filename: `{w}x{h}.{ext}`
    pub filename: String,
}

impl RasterArtifact {
    /// Encode as a `data:` URI suitable for a download anchor
    pub fn to_data_uri(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.format.mime(), b64)
    }
}
