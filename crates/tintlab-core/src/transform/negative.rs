//! Negative (channel inversion) filter.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;

/// Invert every channel in place: `v -> 255 - v`.
///
/// The filter is involutive - applying it twice restores the original
/// buffer exactly.
pub fn apply_negative(image: &mut PixelBuffer) {
    image.pixels_mut().par_iter_mut().for_each(|v| {
        *v = u8::MAX - *v;
    });
}
