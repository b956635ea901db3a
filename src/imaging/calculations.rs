//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Percentage of each original dimension kept by a resize.
pub const SCALE_PERCENT: u32 = 99;

/// Smallest accepted source dimension. Anything below scales to zero.
pub const MIN_DIMENSION: u32 = 2;

/// Calculate the target size for a 99% downscale.
///
/// Each axis is scaled independently with integer truncation, matching
/// `width * 99 / 100`. Returns `None` when either side is below
/// [`MIN_DIMENSION`], since the result would have a zero-length side.
///
/// # Examples
/// ```
/// # use cdnmate::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions(100, 100), Some((99, 99)));
/// assert_eq!(scaled_dimensions(1920, 1080), Some((1900, 1069)));
/// assert_eq!(scaled_dimensions(1, 50), None);
/// ```
pub fn scaled_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return None;
    }
    Some((scale_axis(width), scale_axis(height)))
}

fn scale_axis(len: u32) -> u32 {
    // u64 so that u32::MAX * 99 does not overflow
    (u64::from(len) * u64::from(SCALE_PERCENT) / 100) as u32
}
