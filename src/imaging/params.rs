//! Value types shared by the decode, resize and encode stages.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (0–100, default 90). Not clamped:
//!   out-of-range values are rejected by the encoder.
//! - [`OutputFormat`]: One of the three formats the encoder can produce.
//! - [`SourceFormat`]: The format detected from uploaded bytes, which may be
//!   something the encoder cannot write.

use super::ImagingError;
use image::ImageFormat;
use std::fmt;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The quality as a `u8`, or an error if it exceeds [`Quality::MAX`].
    pub fn checked(self) -> Result<u8, ImagingError> {
        if self.0 > Self::MAX {
            return Err(ImagingError::EncodingFailed(format!(
                "quality must be 0-{}, got {}",
                Self::MAX,
                self.0
            )));
        }
        Ok(self.0 as u8)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

impl From<u32> for Quality {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Formats the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Parse a format tag. `jpg` is an alias for `jpeg`; case is ignored.
    pub fn parse(s: &str) -> Result<Self, ImagingError> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(ImagingError::UnsupportedFormat(s.to_string())),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format detected from the content of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
    /// Decodable, but not one of the formats we re-encode to.
    Other(String),
}

impl SourceFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Other(name) => name,
        }
    }
}

impl From<ImageFormat> for SourceFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => Self::Jpeg,
            ImageFormat::Png => Self::Png,
            ImageFormat::WebP => Self::WebP,
            other => Self::Other(format!("{other:?}").to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn quality_checked_accepts_full_range() {
        assert_eq!(Quality::new(0).checked().unwrap(), 0);
        assert_eq!(Quality::new(100).checked().unwrap(), 100);
    }

    #[test]
    fn quality_checked_rejects_above_100() {
        let err = Quality::new(101).checked().unwrap_err();
        assert!(matches!(err, ImagingError::EncodingFailed(msg) if msg.contains("101")));
    }

    #[test]
    fn jpg_is_alias_for_jpeg() {
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("JPEG").unwrap(), OutputFormat::Jpeg);
    }

    #[test]
    fn unknown_format_carries_offending_string() {
        let err = OutputFormat::parse("bmp").unwrap_err();
        assert!(matches!(err, ImagingError::UnsupportedFormat(s) if s == "bmp"));
    }

    #[test]
    fn content_types_follow_format() {
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::WebP.content_type(), "image/webp");
    }

    #[test]
    fn source_format_from_image_format() {
        assert_eq!(SourceFormat::from(ImageFormat::Jpeg), SourceFormat::Jpeg);
        assert_eq!(SourceFormat::from(ImageFormat::WebP).as_str(), "webp");
        assert_eq!(
            SourceFormat::from(ImageFormat::Tiff),
            SourceFormat::Other("tiff".to_string())
        );
    }
}
