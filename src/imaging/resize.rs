use super::backend::{ImageResizer, ImagingError};
use super::calculations::{MIN_DIMENSION, scaled_dimensions};
use image::DynamicImage;
use image::imageops::FilterType;

/// Shrinks images to 99% of each dimension with a Catmull-Rom filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResizer;

impl DefaultResizer {
    pub fn new() -> Self {
        Self
    }
}

impl ImageResizer for DefaultResizer {
    fn resize(&self, image: &DynamicImage) -> Result<DynamicImage, ImagingError> {
        let (width, height) = (image.width(), image.height());
        let (target_w, target_h) =
            scaled_dimensions(width, height).ok_or(ImagingError::TooSmall {
                width,
                height,
                min: MIN_DIMENSION,
            })?;
        Ok(image.resize_exact(target_w, target_h, FilterType::CatmullRom))
    }
}
