//! Aged-photo (sepia) tint.

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};

/// Strength of the per-channel tint bias.
const AGE_FACTOR: f32 = 0.1;

/// Flat correction added to the warm channels and removed from blue.
const AGE_OFFSET: f32 = 10.0;

const MAX: f32 = 255.0;

/// Apply the aged-photo tint in place.
///
/// Red and green are scaled up in proportion to their headroom and get an
/// additive lift that fades as the channel brightens; blue is scaled down
/// and loses a proportional amount on top. Each channel is clamped to
/// [0, 255] after the additive correction, then truncated:
///
/// ```text
/// r' = r * (1 + 0.1 * (255 - r) / 255) + 10 * (1 - r / 255)
/// g' = g * (1 + 0.1 * (255 - g) / 255) + 10 * (1 - g / 255)
/// b' = b * (1 - 0.1 * b / 255)         - 10 * (b / 255)
/// ```
pub fn apply_aged(image: &mut PixelBuffer) {
    if image.is_empty() {
        return;
    }
    let stride = image.row_stride();
    image
        .pixels_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| {
            for px in row.chunks_exact_mut(CHANNELS) {
                let r = px[0] as f32;
                let g = px[1] as f32;
                let b = px[2] as f32;

                let mut red = r * (1.0 + AGE_FACTOR * (MAX - r) / MAX);
                let mut green = g * (1.0 + AGE_FACTOR * (MAX - g) / MAX);
                let mut blue = b * (1.0 - AGE_FACTOR * b / MAX);

                red += AGE_OFFSET * (1.0 - r / MAX);
                green += AGE_OFFSET * (1.0 - g / MAX);
                blue -= AGE_OFFSET * (b / MAX);

                px[0] = red.clamp(0.0, MAX) as u8;
                px[1] = green.clamp(0.0, MAX) as u8;
                px[2] = blue.clamp(0.0, MAX) as u8;
            }
        });
}
