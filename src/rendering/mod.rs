//! Rendering module: SVG decode and raster surface encode

pub mod raster;

pub use raster::{rasterize, rasterize_with_quality};
