//! Grayscale conversion.

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::luminance::luma_u8;

/// Convert an image to grayscale in place.
///
/// Every pixel is reduced to its BT.601 luminance, truncated, and the
/// result broadcast to all three channels. Applying the filter twice gives
/// the same result as applying it once.
///
/// Rows are processed in parallel; no pixel reads any other pixel.
pub fn apply_grayscale(image: &mut PixelBuffer) {
    if image.is_empty() {
        return;
    }
    let stride = image.row_stride();
    image
        .pixels_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| {
            for px in row.chunks_exact_mut(CHANNELS) {
                let luma = luma_u8(px[0], px[1], px[2]);
                px[0] = luma;
                px[1] = luma;
                px[2] = luma;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_from(pixels: &[u8], width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_raw(width, height, pixels.to_vec())
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let mut buf = buffer_from(&[200, 16, 99, 3, 180, 255], 2, 1);
        apply_grayscale(&mut buf);
        for px in buf.pixels().chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_grayscale_truncates_luma() {
        // 0.299 * 255 = 76.245 -> 76
        let mut buf = buffer_from(&[255, 0, 0], 1, 1);
        apply_grayscale(&mut buf);
        assert_eq!(buf.pixel(0, 0), [76, 76, 76]);
    }

    #[test]
    fn test_grayscale_is_idempotent() {
        let mut buf = buffer_from(&[12, 230, 77, 91, 0, 143, 255, 255, 0], 3, 1);
        apply_grayscale(&mut buf);
        let once = buf.clone();
        apply_grayscale(&mut buf);
        assert_eq!(buf, once);
    }

    #[test]
    fn test_grayscale_preserves_black_and_white() {
        let mut buf = buffer_from(&[0, 0, 0, 255, 255, 255], 2, 1);
        apply_grayscale(&mut buf);
        assert_eq!(buf.pixel(0, 0), [0, 0, 0]);
        assert_eq!(buf.pixel(1, 0), [255, 255, 255]);
    }
}
