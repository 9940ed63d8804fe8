//! Batch export orchestration over the rasterizer.
//!
//! A batch is an ordered list of export requests rendered from one document
//! snapshot. Items run strictly sequentially: the pacing delay between
//! items exists to space out download triggers so the host environment can
//! register each one, and the first failing item aborts everything after it.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::platform::{DownloadSink, ErrorReporter, PreviewSurface};
use crate::rendering::raster;
use crate::{ConverterConfig, ExportFormat, ExportRequest};

/// The converter: owns the export configuration and the injected
/// collaborator surfaces.
///
/// Construct one instance at the composition root and share it by
/// reference; it keeps no state between calls, so every export operation
/// starts from a fresh idle state.
pub struct Converter {
    config: ConverterConfig,
    preview: Arc<dyn PreviewSurface>,
    sink: Arc<dyn DownloadSink>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Converter {
    pub fn new(
        config: ConverterConfig,
        preview: Arc<dyn PreviewSurface>,
        sink: Arc<dyn DownloadSink>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self { config, preview, sink, reporter }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Export a single rendition at the given box.
    pub fn export_one(&self, width: u32, height: u32, format: ExportFormat) -> Result<usize> {
        self.run_batch(&[ExportRequest::new(width, height, format)])
    }

    /// Export the configured icon-size set as PNG, smallest first.
    pub fn export_icon_set(&self) -> Result<usize> {
        let requests: Vec<ExportRequest> = self
            .config
            .icon_sizes
            .iter()
            .map(|&size| ExportRequest::new(size, size, ExportFormat::Png))
            .collect();
        self.run_batch(&requests)
    }

    /// Export the combined bundle: the default box in PNG and JPG, then the
    /// icon-size set as PNG.
    pub fn export_all_formats(&self) -> Result<usize> {
        let box_size = self.config.default_size;
        let mut requests = vec![
            ExportRequest::new(box_size, box_size, ExportFormat::Png),
            ExportRequest::new(box_size, box_size, ExportFormat::Jpg),
        ];
        requests.extend(
            self.config
                .icon_sizes
                .iter()
                .map(|&size| ExportRequest::new(size, size, ExportFormat::Png)),
        );
        self.run_batch(&requests)
    }

    /// Run `requests` in order against one document snapshot.
    ///
    /// Returns the number of delivered artifacts on success. Any failure
    /// aborts the remaining items; artifacts already handed to the sink
    /// stay delivered.
    fn run_batch(&self, requests: &[ExportRequest]) -> Result<usize> {
        debug!("validating batch of {} request(s)", requests.len());
        let document = match self.preview.current_document() {
            Some(doc) => doc,
            None => {
                warn!("batch aborted: no renderable document");
                self.reporter.report("No valid SVG input to export");
                return Err(Error::NoRenderable);
            }
        };

        for (index, request) in requests.iter().enumerate() {
            debug!(
                "exporting item {}/{}: {}",
                index + 1,
                requests.len(),
                request.filename()
            );

            let artifact = raster::rasterize_with_quality(
                &document,
                request.width,
                request.height,
                request.format,
                self.config.jpeg_quality,
            )
            .map_err(|err| {
                warn!("batch aborted at item {}: {}", index + 1, err);
                self.reporter
                    .report("Export failed: check that the SVG markup is valid");
                err
            })?;

            self.sink
                .deliver(&artifact.data, &artifact.filename)
                .map_err(|err| {
                    warn!("batch aborted at item {}: {}", index + 1, err);
                    self.reporter
                        .report("Export failed: could not deliver the file");
                    err
                })?;

            // Space out the remaining download triggers; no pause after the
            // final item.
            if self.config.pacing_delay_ms > 0 && index + 1 < requests.len() {
                std::thread::sleep(Duration::from_millis(self.config.pacing_delay_ms));
            }
        }

        self.reporter.clear();
        debug!("batch completed: {} artifact(s)", requests.len());
        Ok(requests.len())
    }
}
