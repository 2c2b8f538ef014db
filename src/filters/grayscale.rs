//! Luminance conversion for the edge-detection pipeline.
//!
//! Uses ITU-R BT.709 luminosity coefficients. The pipeline only ever needs
//! the luminance plane, so the output is a single-channel grid rather than
//! an RGBA image with replicated gray values.

use ndarray::{Array2, ArrayView3};

/// ITU-R BT.709 luminosity coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Convert an RGBA u8 image to a single-channel luminance plane.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values (0-255)
///
/// # Returns
/// `(height, width)` array of luminance values
pub fn luminance_rgba_u8(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f32;
            let g = input[[y, x, 1]] as f32;
            let b = input[[y, x, 2]] as f32;

            output[[y, x]] = (LUMA_R * r + LUMA_G * g + LUMA_B * b) as u8;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_white_maps_to_white() {
        let mut img = Array3::<u8>::zeros((2, 2, 4));
        for y in 0..2 {
            for x in 0..2 {
                img[[y, x, 0]] = 255;
                img[[y, x, 1]] = 255;
                img[[y, x, 2]] = 255;
                img[[y, x, 3]] = 255;
            }
        }

        let gray = luminance_rgba_u8(img.view());
        // 0.2126 + 0.7152 + 0.0722 = 1.0, truncation loses at most one step
        assert!(gray[[0, 0]] >= 254);
    }

    #[test]
    fn test_green_dominates_blue() {
        let mut green = Array3::<u8>::zeros((1, 1, 4));
        green[[0, 0, 1]] = 255;
        green[[0, 0, 3]] = 255;

        let mut blue = Array3::<u8>::zeros((1, 1, 4));
        blue[[0, 0, 2]] = 255;
        blue[[0, 0, 3]] = 255;

        let g = luminance_rgba_u8(green.view());
        let b = luminance_rgba_u8(blue.view());
        assert!(g[[0, 0]] > b[[0, 0]]);
    }

    #[test]
    fn test_alpha_does_not_affect_luminance() {
        let mut transparent = Array3::<u8>::zeros((1, 1, 4));
        transparent[[0, 0, 0]] = 100;
        transparent[[0, 0, 1]] = 100;
        transparent[[0, 0, 2]] = 100;

        let mut opaque = transparent.clone();
        opaque[[0, 0, 3]] = 255;

        let a = luminance_rgba_u8(transparent.view());
        let b = luminance_rgba_u8(opaque.view());
        assert_eq!(a[[0, 0]], b[[0, 0]]);
    }
}
