//! Error types for the export engine

use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rasterizing or exporting
#[derive(Error, Debug)]
pub enum Error {
    /// No renderable SVG document is available to export
    #[error("No renderable SVG document")]
    NoRenderable,

    /// Requested surface dimensions are unusable
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The raster engine could not produce pixels from the given markup
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// Encoding the raster surface to the requested format failed
    #[error("Encode failed: {0}")]
    EncodeFailed(String),

    /// The download sink rejected an artifact
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// The converter worker has shut down
    #[error("Converter is closed")]
    Closed,
}
