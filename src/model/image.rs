//! Embedded images (student photo, school logo) backed by data URIs

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as Base64Engine;
use image::{DynamicImage, ImageFormat, ImageReader, Limits};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::UploadLimits;
use crate::{Error, Result};

/// An image stored on a record in its original encoding.
///
/// The bytes are shared, so cloning a record that carries a photo is cheap.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EmbeddedImage {
    pub(crate) mime: String,
    pub(crate) bytes: Arc<[u8]>,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl EmbeddedImage {
    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Parse a base64 data URI. Only the header is inspected; full decoding
    /// happens when the image is painted.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::InvalidUpload("not a data URI".into()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| Error::InvalidUpload("data URI is not base64 encoded".into()))?;
        if !mime.starts_with("image/") {
            return Err(Error::InvalidUpload(format!("unsupported media type {mime}")));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::InvalidUpload(format!("bad base64 payload: {e}")))?;
        let (width, height) = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| Error::InvalidUpload(e.to_string()))?
            .into_dimensions()
            .map_err(|e| Error::InvalidUpload(e.to_string()))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes: bytes.into(),
            width,
            height,
        })
    }

    /// Fully decode the pixels.
    pub fn decode(&self) -> Result<DynamicImage> {
        image::load_from_memory(&self.bytes).map_err(|e| {
            Error::RasterizationFailed(format!("embedded {} could not be decoded: {e}", self.mime))
        })
    }
}

impl fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedImage")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl From<EmbeddedImage> for String {
    fn from(img: EmbeddedImage) -> String {
        img.data_uri()
    }
}

impl TryFrom<String> for EmbeddedImage {
    type Error = Error;

    fn try_from(uri: String) -> Result<Self> {
        EmbeddedImage::from_data_uri(&uri)
    }
}

/// Decode an uploaded file into an embeddable image.
///
/// The file must be a recognized raster format, no larger than
/// `limits.max_bytes`, and at most `limits.max_dimension` pixels on each side.
pub fn ingest_image(file: &[u8], limits: &UploadLimits) -> Result<EmbeddedImage> {
    let rejected = |reason: String| {
        warn!("Rejected image upload: {}", reason);
        Error::InvalidUpload(reason)
    };

    if file.is_empty() {
        return Err(rejected("file is empty".into()));
    }
    if file.len() > limits.max_bytes {
        return Err(rejected(format!(
            "file is {} bytes, limit is {}",
            file.len(),
            limits.max_bytes
        )));
    }
    let format = image::guess_format(file).map_err(|e| rejected(e.to_string()))?;

    // Header first: oversized images are refused before any pixel buffer exists.
    let (width, height) = ImageReader::with_format(Cursor::new(file), format)
        .into_dimensions()
        .map_err(|e| rejected(format!("unreadable {format:?} header: {e}")))?;
    if width == 0 || height == 0 {
        return Err(rejected("image has no pixels".into()));
    }
    if width > limits.max_dimension || height > limits.max_dimension {
        return Err(rejected(format!(
            "image is {width}x{height}, limit is {0}x{0}",
            limits.max_dimension
        )));
    }

    let mut decode_limits = Limits::default();
    decode_limits.max_image_width = Some(limits.max_dimension);
    decode_limits.max_image_height = Some(limits.max_dimension);
    let mut reader = ImageReader::with_format(Cursor::new(file), format);
    reader.limits(decode_limits);
    reader
        .decode()
        .map_err(|e| rejected(format!("not decodable as {format:?}: {e}")))?;

    Ok(EmbeddedImage {
        mime: mime_for(format).to_string(),
        bytes: file.into(),
        width,
        height,
    })
}

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}
