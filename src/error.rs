//! Error types for document editing and export

use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting images or exporting a document.
///
/// Every failure is scoped to the single operation that produced it; none of
/// them leave the data store or the render surface in a modified state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The uploaded file could not be read or decoded as an image
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Export was requested before the render surface painted a non-empty region
    #[error("Capture target not ready: {0}")]
    TargetNotReady(String),

    /// The capture step could not produce pixel data
    #[error("Rasterization failed: {0}")]
    RasterizationFailed(String),

    /// Pixels were produced but handing the file to the host failed
    #[error("Download trigger failed: {0}")]
    DownloadTriggerFailed(String),

    /// Another export on the same capture target is still in flight
    #[error("An export is already in progress for this capture target")]
    ExportAlreadyInProgress,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Copyable tag naming which kind of failure ended an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFailure {
    TargetNotReady,
    RasterizationFailed,
    DownloadTriggerFailed,
    AlreadyInProgress,
    Config,
    Other,
}

impl Error {
    /// The failure tag recorded by the export state machine.
    pub fn reason(&self) -> ExportFailure {
        match self {
            Error::TargetNotReady(_) => ExportFailure::TargetNotReady,
            Error::RasterizationFailed(_) => ExportFailure::RasterizationFailed,
            Error::DownloadTriggerFailed(_) => ExportFailure::DownloadTriggerFailed,
            Error::ExportAlreadyInProgress => ExportFailure::AlreadyInProgress,
            Error::ConfigError(_) => ExportFailure::Config,
            Error::InvalidUpload(_) => ExportFailure::Other,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::RasterizationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_stay_distinct() {
        let raster = Error::RasterizationFailed("tainted".into());
        let download = Error::DownloadTriggerFailed("denied".into());
        assert_ne!(raster.reason(), download.reason());
        assert_eq!(Error::ExportAlreadyInProgress.reason(), ExportFailure::AlreadyInProgress);
    }

    #[test]
    fn display_includes_detail() {
        let e = Error::TargetNotReady("zero area".into());
        assert_eq!(e.to_string(), "Capture target not ready: zero area");
    }
}
