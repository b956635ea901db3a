//! Single-upload pipeline: decode → resize → encode → upload.
//!
//! ## Flow
//!
//! ```text
//! bytes ──decode──▶ DecodedImage ──resize 99%──▶ DynamicImage
//!        (sniffed format)                            │
//!                                       encode (same format as source)
//!                                                    ▼
//!  URL ◀──join(cdn_url)── filename ◀──naming── EncodedPayload ──PUT──▶ origin
//! ```
//!
//! Every step runs synchronously on the caller's thread and the first error
//! aborts the call. Nothing is retried and no URL is returned unless the
//! upload succeeded.
//!
//! The output format always matches the detected input format. A file that
//! decodes but is not JPEG, PNG or WebP (e.g. TIFF) fails at the encode step
//! with [`ImagingError::UnsupportedFormat`] before anything is sent.

use crate::config::{Config, ConfigError};
use crate::imaging::{
    DefaultEncoder, DefaultResizer, ImageEncoder, ImageResizer, ImagingError, Quality,
    decode_image,
};
use crate::naming::unique_filename;
use crate::upload::{HttpUploader, UploadError, Uploader, join_url};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImagingError),
    #[error("Failed to resize image: {0}")]
    Resize(#[source] ImagingError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] ImagingError),
    #[error("Failed to save image: {0}")]
    Upload(#[from] UploadError),
}

/// Pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Decode,
    Resize,
    Encode,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Setup => "setup",
            Stage::Decode => "decode",
            Stage::Resize => "resize",
            Stage::Encode => "encode",
            Stage::Upload => "upload",
        };
        f.write_str(name)
    }
}

impl ProcessError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config(_) | Self::Upload(UploadError::Client(_)) => Stage::Setup,
            Self::Decode(_) => Stage::Decode,
            Self::Resize(_) => Stage::Resize,
            Self::Encode(_) => Stage::Encode,
            Self::Upload(_) => Stage::Upload,
        }
    }
}

/// Runs the upload pipeline with pluggable resize, encode and upload steps.
///
/// The processor holds no per-request state and is `Sync`, so one instance
/// can serve every request of a host.
pub struct ImageProcessor<R = DefaultResizer, E = DefaultEncoder, U = HttpUploader> {
    resizer: R,
    encoder: E,
    uploader: U,
    config: Config,
}

impl ImageProcessor {
    /// Validate `config` and wire the default resizer, encoder and HTTP uploader.
    pub fn new(config: Config) -> Result<Self, ProcessError> {
        config.validate()?;
        let uploader = HttpUploader::new(config.uploader_url.clone(), config.upload_timeout())?;
        Ok(Self::with_components(
            config,
            DefaultResizer::new(),
            DefaultEncoder::new(),
            uploader,
        ))
    }
}

impl<R, E, U> ImageProcessor<R, E, U>
where
    R: ImageResizer,
    E: ImageEncoder,
    U: Uploader,
{
    pub fn with_components(config: Config, resizer: R, encoder: E, uploader: U) -> Self {
        Self {
            resizer,
            encoder,
            uploader,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shrink `file_bytes`, upload it under a fresh name derived from
    /// `original_filename`, and return its public URL.
    #[instrument(skip(self, file_bytes), fields(bytes = file_bytes.len()))]
    pub fn process(
        &self,
        file_bytes: &[u8],
        original_filename: &str,
        quality: Quality,
    ) -> Result<String, ProcessError> {
        let decoded = decode_image(file_bytes).map_err(ProcessError::Decode)?;
        debug!(
            format = %decoded.format,
            width = decoded.width(),
            height = decoded.height(),
            "decoded"
        );

        let resized = self
            .resizer
            .resize(&decoded.image)
            .map_err(ProcessError::Resize)?;
        debug!(width = resized.width(), height = resized.height(), "resized");

        let payload = self
            .encoder
            .encode(&resized, decoded.format.as_str(), quality)
            .map_err(ProcessError::Encode)?;
        debug!(format = %payload.format, bytes = payload.len(), "encoded");

        let filename = unique_filename(original_filename);
        self.uploader.upload(&payload, &filename)?;

        let url = join_url(&self.config.cdn_url, &filename);
        info!(%url, "image published");
        Ok(url)
    }

    /// [`process`](Self::process) using the configured `image_quality`.
    pub fn process_with_default_quality(
        &self,
        file_bytes: &[u8],
        original_filename: &str,
    ) -> Result<String, ProcessError> {
        self.process(file_bytes, original_filename, self.config.quality())
    }
}
