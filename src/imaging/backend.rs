//! Imaging capability traits and shared types.
//!
//! Each pipeline step is its own single-method trait so that the processor
//! can be assembled from any mix of real and fake components:
//!
//! | Trait | Default implementation |
//! |---|---|
//! | [`ImageResizer`] | [`DefaultResizer`](super::resize::DefaultResizer): Catmull-Rom 99% downscale |
//! | [`ImageEncoder`] | [`DefaultEncoder`](super::encode::DefaultEncoder): JPEG / PNG / lossy WebP |
//!
//! Decoding has no trait: it is a pure function of the uploaded bytes, see
//! [`decode_image`](super::decode::decode_image).

use super::params::{OutputFormat, Quality, SourceFormat};
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image too small to resize: {width}x{height} (minimum {min}x{min})")]
    TooSmall { width: u32, height: u32, min: u32 },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// A decoded upload together with the format its bytes were in.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: SourceFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Encoded bytes ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl EncodedPayload {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Scales an image down for upload.
pub trait ImageResizer: Send + Sync {
    fn resize(&self, image: &DynamicImage) -> Result<DynamicImage, ImagingError>;
}

/// Serializes an image into one of the supported output formats.
pub trait ImageEncoder: Send + Sync {
    /// Encode `image` as `format` (`"jpeg"`, `"jpg"`, `"png"` or `"webp"`).
    ///
    /// `quality` applies to JPEG and WebP only; PNG is lossless and ignores it.
    fn encode(
        &self,
        image: &DynamicImage,
        format: &str,
        quality: Quality,
    ) -> Result<EncodedPayload, ImagingError>;
}
