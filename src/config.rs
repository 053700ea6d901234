//! Configuration for export and image ingestion

use crate::rendering::paint::Color;
use crate::{Error, Result};

/// Top-level configuration shared by the three document workflows.
///
/// # Examples
///
/// ```
/// let cfg = scholardocs::StudioConfig::default();
/// assert_eq!(cfg.export.scale, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StudioConfig {
    /// Options applied by the export pipeline
    pub export: ExportOptions,
    /// Limits applied when a photo or logo is uploaded
    pub upload: UploadLimits,
}

/// Options for rasterizing and naming an exported image.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Supersampling factor applied to the capture target's logical size
    pub scale: u32,
    /// Opaque colour painted under the document before anything else
    pub background: Color,
    /// Token used in file names when an identifying field is empty
    pub placeholder: String,
    /// Largest canvas (in device pixels) the rasterizer will allocate
    pub max_canvas_pixels: u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            background: Color::WHITE,
            placeholder: "Student".to_string(),
            max_canvas_pixels: 64 * 1024 * 1024,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 {
            return Err(Error::ConfigError("scale must be at least 1".into()));
        }
        if self.placeholder.trim().is_empty() {
            return Err(Error::ConfigError("placeholder token must not be empty".into()));
        }
        Ok(())
    }
}

/// Limits for photo and logo uploads.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// Maximum encoded file size in bytes
    pub max_bytes: usize,
    /// Maximum width or height in pixels
    pub max_dimension: u32,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_dimension: 4096,
        }
    }
}
