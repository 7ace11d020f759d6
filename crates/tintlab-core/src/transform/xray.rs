//! X-ray effect: grayscale with a brightness power curve.

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::transform::apply_grayscale;

/// Exponent applied to each luminance value after grayscale conversion.
const XRAY_EXPONENT: f32 = 1.5;

/// Apply the x-ray effect in place.
///
/// The image is first converted to grayscale, then every nonzero luminance
/// value is raised to the power 1.5, truncated, and clamped to 255 before
/// being broadcast to all three channels. Zero luminance stays zero.
///
/// Unlike [`apply_grayscale`], this filter is not idempotent: repeated
/// application keeps compressing bright values against the ceiling.
pub fn apply_xray(image: &mut PixelBuffer) {
    apply_grayscale(image);
    if image.is_empty() {
        return;
    }
    let stride = image.row_stride();
    image
        .pixels_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| {
            for px in row.chunks_exact_mut(CHANNELS) {
                let luma = px[0];
                if luma == 0 {
                    continue;
                }
                let boosted = (luma as f32).powf(XRAY_EXPONENT).min(255.0) as u8;
                px[0] = boosted;
                px[1] = boosted;
                px[2] = boosted;
            }
        });
}
