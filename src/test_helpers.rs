//! Shared test utilities: synthetic images and recording test doubles.
//!
//! The doubles use `Mutex` (not `RefCell`) so they satisfy the `Send + Sync`
//! bounds on the capability traits.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let bytes = encode_fixture(&gradient_image(100, 100), ImageFormat::Jpeg);
//! let pipeline = ImageProcessor::with_components(
//!     Config::default(), DefaultResizer, DefaultEncoder, RecordingUploader::new(),
//! );
//! pipeline.process(&bytes, "photo.jpg", Quality::new(80)).unwrap();
//! assert_eq!(pipeline.uploader.uploads().len(), 1);
//! ```

use std::io::Cursor;
use std::sync::Mutex;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use reqwest::StatusCode;

use crate::imaging::{DefaultEncoder, EncodedPayload, ImageEncoder, ImagingError, Quality};
use crate::upload::{UploadError, Uploader};

// =========================================================================
// Fixtures
// =========================================================================

/// An RGB gradient, so lossy codecs have some detail to work with.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// Encode a fixture with the `image` crate's own encoders.
pub fn encode_fixture(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

// =========================================================================
// Uploaders
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub filename: String,
    pub payload: EncodedPayload,
}

/// Uploader that accepts everything and remembers what it was given.
#[derive(Default)]
pub struct RecordingUploader {
    uploads: Mutex<Vec<RecordedUpload>>,
}

impl RecordingUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Uploader for RecordingUploader {
    fn upload(&self, payload: &EncodedPayload, filename: &str) -> Result<(), UploadError> {
        self.uploads.lock().unwrap().push(RecordedUpload {
            filename: filename.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

/// Uploader whose origin always answers with the given status.
pub struct FailingUploader {
    status: StatusCode,
}

impl FailingUploader {
    pub fn with_status(status: StatusCode) -> Self {
        Self { status }
    }
}

impl Uploader for FailingUploader {
    fn upload(&self, _payload: &EncodedPayload, filename: &str) -> Result<(), UploadError> {
        Err(UploadError::Status {
            url: format!("http://mock-origin/{filename}"),
            status: self.status,
            body: String::new(),
        })
    }
}

// =========================================================================
// Encoders
// =========================================================================

/// (format tag, quality, image dimensions) for one encode call.
pub type EncodeCall = (String, Quality, (u32, u32));

/// Delegates to [`DefaultEncoder`] and records every call.
#[derive(Default)]
pub struct RecordingEncoder {
    calls: Mutex<Vec<EncodeCall>>,
}

impl RecordingEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageEncoder for RecordingEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        format: &str,
        quality: Quality,
    ) -> Result<EncodedPayload, ImagingError> {
        self.calls
            .lock()
            .unwrap()
            .push((format.to_string(), quality, image.dimensions()));
        DefaultEncoder.encode(image, format, quality)
    }
}
