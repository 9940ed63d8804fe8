use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::convert::Converter;
use crate::platform::{DownloadSink, ErrorReporter, MemoryPreview, PreviewUpdate};
use crate::{ConverterConfig, Error, ExportFormat, Result};

enum Command {
    SetSource(String, oneshot::Sender<PreviewUpdate>),
    ExportOne(u32, u32, ExportFormat, oneshot::Sender<Result<usize>>),
    ExportIconSet(oneshot::Sender<Result<usize>>),
    ExportAllFormats(oneshot::Sender<Result<usize>>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly converter abstraction backed by a dedicated worker
/// thread.
///
/// The worker thread owns a synchronous [`Converter`] together with the
/// in-memory preview it renders from, and executes commands sent from async
/// tasks. Every `await` on a handle method is a suspension point; the
/// pacing delay inside a running batch happens on the worker thread, so a
/// single batch never interleaves with another command.
#[derive(Clone)]
pub struct AsyncConverter {
    cmd_tx: Sender<Command>,
    timeout_ms: u64,
}

impl AsyncConverter {
    /// Create a new converter handle (spawns the worker thread that owns
    /// the sync converter and its preview).
    pub fn new(
        config: ConverterConfig,
        sink: Arc<dyn DownloadSink>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let timeout_ms = config.command_timeout_ms;
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            let preview = Arc::new(MemoryPreview::new());
            let converter = Converter::new(config, preview.clone(), sink, reporter);

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::SetSource(text, resp) => {
                        let _ = resp.send(preview.set_source(&text));
                    }
                    Command::ExportOne(width, height, format, resp) => {
                        let _ = resp.send(converter.export_one(width, height, format));
                    }
                    Command::ExportIconSet(resp) => {
                        let _ = resp.send(converter.export_icon_set());
                    }
                    Command::ExportAllFormats(resp) => {
                        let _ = resp.send(converter.export_all_formats());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        Self { cmd_tx, timeout_ms }
    }

    /// Replace the preview contents from raw input text.
    pub async fn set_source(&self, text: &str) -> Result<PreviewUpdate> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetSource(text.to_string(), tx))
            .map_err(|_| Error::Closed)?;
        self.wait(rx).await
    }

    /// Export a single rendition at the given box.
    pub async fn export_one(&self, width: u32, height: u32, format: ExportFormat) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ExportOne(width, height, format, tx))
            .map_err(|_| Error::Closed)?;
        self.wait(rx).await?
    }

    /// Export the configured icon-size set as PNG.
    pub async fn export_icon_set(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ExportIconSet(tx))
            .map_err(|_| Error::Closed)?;
        self.wait(rx).await?
    }

    /// Export the combined all-formats bundle.
    pub async fn export_all_formats(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ExportAllFormats(tx))
            .map_err(|_| Error::Closed)?;
        self.wait(rx).await?
    }

    /// Shut down the worker thread.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx.send(Command::Close(tx)).map_err(|_| Error::Closed)?;
        rx.await.map_err(|_| Error::Closed)
    }

    // Await a worker reply, applying the configured per-command timeout.
    async fn wait<T>(&self, rx: oneshot::Receiver<T>) -> Result<T> {
        if self.timeout_ms == 0 {
            return rx.await.map_err(|_| Error::Closed);
        }
        match tokio::time::timeout(Duration::from_millis(self.timeout_ms), rx).await {
            Ok(res) => res.map_err(|_| Error::Closed),
            Err(_) => Err(Error::Timeout(self.timeout_ms)),
        }
    }
}
