//! Image processing: decode, shrink, re-encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader::with_guessed_format` (content sniffing) |
//! | **Resize** | `resize_exact` with the `CatmullRom` filter, 99% per axis |
//! | **Encode** | `JpegEncoder`, PNG via `write_to`, lossy WebP via `webp` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Quality and format value types
//! - **Backend**: [`ImageResizer`] / [`ImageEncoder`] traits and shared types
//! - **Decode / Resize / Encode**: the default implementations

pub mod backend;
pub mod calculations;
pub mod decode;
pub mod encode;
mod params;
pub mod resize;

pub use backend::{DecodedImage, EncodedPayload, ImageEncoder, ImageResizer, ImagingError};
pub use calculations::{MIN_DIMENSION, SCALE_PERCENT, scaled_dimensions};
pub use decode::decode_image;
pub use encode::DefaultEncoder;
pub use params::{OutputFormat, Quality, SourceFormat};
pub use resize::DefaultResizer;
