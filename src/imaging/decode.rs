//! Content-sniffing decoder for uploaded bytes.

use super::backend::{DecodedImage, ImagingError};
use super::params::SourceFormat;
use image::{ImageError, ImageReader};
use std::io::Cursor;

/// Decode raw upload bytes, detecting the format from the content.
///
/// The filename is never consulted: a PNG uploaded as `photo.jpg` decodes as
/// PNG and is re-encoded as PNG.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, ImagingError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;

    // `decode` fails with an Unsupported error when no format was detected.
    let format = reader.format();
    let image = reader.decode()?;
    let format = format.map_or_else(
        || SourceFormat::Other("unknown".to_string()),
        SourceFormat::from,
    );

    Ok(DecodedImage { image, format })
}
