//! Encoders for the three upload formats.
//!
//! | Format | Crate / function | Quality |
//! |---|---|---|
//! | JPEG | `image::codecs::jpeg::JpegEncoder` | 0–100 |
//! | PNG | `image::ImageFormat::Png` | ignored (lossless) |
//! | WebP | `webp::Encoder` (libwebp, lossy) | 0–100 |
//!
//! The `image` crate's own WebP encoder is lossless only, which is why WebP
//! goes through libwebp.

use super::backend::{EncodedPayload, ImageEncoder, ImagingError};
use super::params::{OutputFormat, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Encodes with the `image` crate (JPEG, PNG) and libwebp (WebP).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncoder;

impl DefaultEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageEncoder for DefaultEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        format: &str,
        quality: Quality,
    ) -> Result<EncodedPayload, ImagingError> {
        let format = OutputFormat::parse(format)?;
        let bytes = match format {
            OutputFormat::Jpeg => encode_jpeg(image, quality.checked()?)?,
            OutputFormat::Png => encode_png(image)?,
            OutputFormat::WebP => encode_webp(image, quality.checked()?)?,
        };
        Ok(EncodedPayload { bytes, format })
    }
}

/// JPEG has no alpha channel, so everything is flattened to RGB8 first.
fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImagingError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut bytes = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
        .map_err(|e| ImagingError::EncodingFailed(format!("JPEG encode failed: {e}")))?;
    Ok(bytes)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImagingError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ImagingError::EncodingFailed(format!("PNG encode failed: {e}")))?;
    Ok(bytes)
}

/// libwebp only accepts RGB8 and RGBA8 buffers.
fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImagingError> {
    let converted = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => None,
        other if other.color().has_alpha() => Some(DynamicImage::ImageRgba8(other.to_rgba8())),
        other => Some(DynamicImage::ImageRgb8(other.to_rgb8())),
    };
    let source = converted.as_ref().unwrap_or(image);

    let encoder = webp::Encoder::from_image(source)
        .map_err(|e| ImagingError::EncodingFailed(format!("WebP encode failed: {e}")))?;
    let memory = encoder
        .encode_simple(false, f32::from(quality))
        .map_err(|e| ImagingError::EncodingFailed(format!("WebP encode failed: {e:?}")))?;
    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::decode::decode_image;
    use crate::imaging::params::SourceFormat;
    use crate::test_helpers::gradient_image;
    use image::{GenericImageView, LumaA, Rgba, RgbaImage};

    fn encode(format: &str, quality: u32) -> Result<EncodedPayload, ImagingError> {
        DefaultEncoder::new().encode(&gradient_image(100, 100), format, Quality::new(quality))
    }

    #[test]
    fn jpeg_roundtrip_keeps_dimensions() {
        let payload = encode("jpeg", 80).unwrap();
        assert_eq!(payload.format, OutputFormat::Jpeg);
        assert_eq!(payload.content_type(), "image/jpeg");

        let decoded = decode_image(&payload.bytes).unwrap();
        assert_eq!(decoded.format, SourceFormat::Jpeg);
        assert_eq!(decoded.image.dimensions(), (100, 100));
    }

    #[test]
    fn jpg_and_jpeg_produce_identical_bytes() {
        let jpeg = encode("jpeg", 75).unwrap();
        let jpg = encode("jpg", 75).unwrap();
        assert_eq!(jpeg, jpg);
    }

    #[test]
    fn jpeg_quality_affects_size() {
        let low = encode("jpeg", 10).unwrap();
        let high = encode("jpeg", 95).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn jpeg_flattens_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 20, Rgba([200, 10, 10, 90])));
        let payload = DefaultEncoder::new()
            .encode(&img, "jpeg", Quality::new(80))
            .unwrap();
        assert!(!decode_image(&payload.bytes).unwrap().image.color().has_alpha());
    }

    #[test]
    fn png_ignores_quality() {
        let a = encode("png", 1).unwrap();
        let b = encode("png", 100).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.content_type(), "image/png");
    }

    #[test]
    fn png_accepts_out_of_range_quality() {
        assert!(encode("png", 500).is_ok());
    }

    #[test]
    fn webp_roundtrip_keeps_dimensions() {
        let payload = encode("webp", 80).unwrap();
        assert_eq!(payload.content_type(), "image/webp");

        let decoded = decode_image(&payload.bytes).unwrap();
        assert_eq!(decoded.format, SourceFormat::WebP);
        assert_eq!(decoded.image.dimensions(), (100, 100));
    }

    #[test]
    fn webp_converts_unsupported_color_types() {
        let img = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(16, 16, LumaA([90, 255])));
        let payload = DefaultEncoder::new()
            .encode(&img, "webp", Quality::new(70))
            .unwrap();
        assert!(!payload.is_empty());
    }

    #[test]
    fn lossy_formats_reject_quality_above_100() {
        for format in ["jpeg", "webp"] {
            let err = encode(format, 101).unwrap_err();
            assert!(
                matches!(err, ImagingError::EncodingFailed(_)),
                "{format} accepted quality 101"
            );
        }
    }

    #[test]
    fn webp_codec_failure_is_an_error() {
        // libwebp caps each side at 16383 px.
        let wide = DynamicImage::ImageRgb8(image::RgbImage::new(17000, 2));
        let err = DefaultEncoder::new()
            .encode(&wide, "webp", Quality::new(80))
            .unwrap_err();
        assert!(matches!(err, ImagingError::EncodingFailed(_)));
    }

    #[test]
    fn unknown_format_is_unsupported() {
        let err = encode("bmp", 80).unwrap_err();
        assert!(matches!(err, ImagingError::UnsupportedFormat(s) if s == "bmp"));
    }

    #[test]
    fn format_tag_is_case_insensitive() {
        assert_eq!(encode("PNG", 80).unwrap().format, OutputFormat::Png);
    }
}
