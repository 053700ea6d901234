//! Export pipeline: capture a render surface as a PNG and hand it to a sink
//!
//! The pipeline snapshots the target's painted frame before its first
//! suspension point, so edits made while an export is running never leak into
//! the exported pixels. At most one export runs per capture target; a second
//! request is rejected rather than queued.

pub mod filename;
pub mod sink;
pub mod state;

pub use filename::suggested_filename;
#[cfg(feature = "fs-sink")]
pub use sink::DirectorySink;
pub use sink::{DownloadSink, MemorySink};
pub use state::ExportState;

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use crate::config::ExportOptions;
use crate::model::{CardSide, DocumentKind};
use crate::rendering::paint::{BlockGlyphs, GlyphSource};
use crate::rendering::raster;
use crate::rendering::surface::CaptureTarget;
use crate::{Error, Result};
use state::ExportGuard;

/// One exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// PNG-encoded pixels
    pub bytes: Vec<u8>,
    pub suggested_filename: String,
    /// Device pixel size (logical size times the export scale)
    pub width: u32,
    pub height: u32,
    pub kind: DocumentKind,
    pub side: Option<CardSide>,
}

impl ExportedImage {
    pub const CONTENT_TYPE: &'static str = "image/png";

    pub fn content_type(&self) -> &'static str {
        Self::CONTENT_TYPE
    }

    /// Hex-encoded SHA-256 of the PNG bytes.
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Rasterizes capture targets and delivers the result.
#[derive(Clone)]
pub struct ExportPipeline {
    options: ExportOptions,
    glyphs: Arc<dyn GlyphSource>,
}

impl ExportPipeline {
    pub fn new(options: ExportOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            glyphs: Arc::new(BlockGlyphs),
        })
    }

    /// Replace the glyph source used for text.
    pub fn with_glyphs(mut self, glyphs: Arc<dyn GlyphSource>) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export the current frame of `target` and deliver it to `sink`.
    ///
    /// Fails with `ExportAlreadyInProgress` (without touching the running
    /// export) if another export holds the target, `TargetNotReady` if
    /// nothing non-empty is painted, `RasterizationFailed` if pixels cannot
    /// be produced, and `DownloadTriggerFailed` if the sink rejects the file.
    pub async fn export_as_image<S: DownloadSink>(
        &self,
        target: &CaptureTarget,
        sink: &S,
    ) -> Result<ExportedImage> {
        let guard = ExportGuard::acquire(target).inspect_err(|_| {
            warn!("export rejected: another export is in flight on this target");
        })?;
        let result = self.run(&guard, target, sink).await;
        if let Err(err) = &result {
            warn!("export failed: {err}");
            guard.fail(err);
        }
        result
    }

    async fn run<S: DownloadSink>(
        &self,
        guard: &ExportGuard,
        target: &CaptureTarget,
        sink: &S,
    ) -> Result<ExportedImage> {
        guard.enter(ExportState::Capturing);
        let frame = target
            .frame()
            .ok_or_else(|| Error::TargetNotReady("render surface has not painted".into()))?;
        if frame.display.extent.is_empty() {
            return Err(Error::TargetNotReady(format!(
                "painted region is {}x{}",
                frame.display.extent.width, frame.display.extent.height
            )));
        }
        debug!(
            "capturing {} frame #{} ({}x{} at {}x)",
            frame.kind,
            frame.sequence,
            frame.display.extent.width,
            frame.display.extent.height,
            self.options.scale
        );
        let canvas = raster::rasterize(&frame.display, &self.options, self.glyphs.as_ref())?;
        tokio::task::yield_now().await;

        guard.enter(ExportState::Encoding);
        let bytes = raster::encode_png(&canvas)?;
        let file = ExportedImage {
            bytes,
            suggested_filename: suggested_filename(
                frame.kind,
                &frame.label,
                frame.side,
                &self.options.placeholder,
            ),
            width: canvas.width(),
            height: canvas.height(),
            kind: frame.kind,
            side: frame.side,
        };
        tokio::task::yield_now().await;

        guard.enter(ExportState::Downloading);
        sink.deliver(&file)
            .await
            .map_err(|e| Error::DownloadTriggerFailed(e.to_string()))?;
        info!(
            "exported {} ({} bytes, {}x{})",
            file.suggested_filename,
            file.bytes.len(),
            file.width,
            file.height
        );
        Ok(file)
    }
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self {
            options: ExportOptions::default(),
            glyphs: Arc::new(BlockGlyphs),
        }
    }
}

impl fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportFailure;
    use crate::model::{Transcript, TranscriptUpdate};
    use crate::rendering::RenderSurface;
    use crate::store::DataStore;
    use std::io;

    struct RefusingSink;

    impl DownloadSink for RefusingSink {
        async fn deliver(&self, _file: &ExportedImage) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "download blocked"))
        }
    }

    #[test]
    fn zero_scale_is_rejected() {
        let opts = ExportOptions {
            scale: 0,
            ..Default::default()
        };
        assert!(matches!(ExportPipeline::new(opts), Err(Error::ConfigError(_))));
    }

    #[tokio::test]
    async fn exports_at_twice_logical_size() {
        let mut store = DataStore::new(Transcript::default());
        let surface = RenderSurface::attach(&mut store);
        store.set(TranscriptUpdate::StudentName("Emily Johnson".into()));

        let sink = MemorySink::new();
        let file = ExportPipeline::default()
            .export_as_image(&surface.capture_target(), &sink)
            .await
            .unwrap();

        let extent = surface.frame().unwrap().display.extent;
        assert_eq!((file.width, file.height), (extent.width * 2, extent.height * 2));
        assert_eq!(file.suggested_filename, "Transcript_Emily_Johnson.png");
        assert_eq!(file.content_type(), "image/png");
        assert_eq!(sink.files(), vec![file]);
        assert_eq!(
            surface.capture_target().last_export_transitions(),
            vec![
                ExportState::Capturing,
                ExportState::Encoding,
                ExportState::Downloading,
                ExportState::Idle,
            ]
        );
    }

    #[tokio::test]
    async fn unpainted_target_is_not_ready() {
        let surface: RenderSurface<Transcript> = RenderSurface::new();
        let target = surface.capture_target();
        let sink = MemorySink::new();
        let err = ExportPipeline::default()
            .export_as_image(&target, &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TargetNotReady(_)));
        assert!(sink.is_empty());
        assert_eq!(
            target.last_export_transitions(),
            vec![
                ExportState::Capturing,
                ExportState::Failed(ExportFailure::TargetNotReady),
                ExportState::Idle,
            ]
        );
    }

    #[tokio::test]
    async fn sink_failure_is_a_download_failure() {
        let mut store = DataStore::new(Transcript::default());
        let surface = RenderSurface::attach(&mut store);
        let err = ExportPipeline::default()
            .export_as_image(&surface.capture_target(), &RefusingSink)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DownloadTriggerFailed(_)));
        assert_eq!(
            surface.capture_target().last_export_transitions().last(),
            Some(&ExportState::Idle)
        );
    }
}
