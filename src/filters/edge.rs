//! Edge detection for the wall-detection pipeline.
//!
//! Canny-style detector built from 3x3 Sobel gradients:
//!
//! 1. gradient magnitude (L2) over the luminance plane
//! 2. non-maximum suppression along the quantized gradient direction
//! 3. hysteresis: magnitude >= `high` is a definite edge; pixels between
//!    `low` and `high` survive only when 8-connected to a definite edge
//!
//! Thresholds apply to the raw (unnormalized) Sobel magnitude, so the
//! conventional 50/150 pair works on 8-bit input. Callers must pass
//! `low < high`.
//!
//! [`build_edge_map`] chains luminance -> canny -> one 3x3 dilation pass
//! into the binary edge map the contour extractor consumes.

use ndarray::Array2;

use crate::error::Result;
use crate::filters::grayscale::luminance_rgba_u8;
use crate::filters::morphology::dilate_binary;
use crate::pixel::PixelBuffer;

// ============================================================================
// Canny
// ============================================================================

/// Detect edges in a luminance plane.
///
/// # Arguments
/// * `gray` - `(height, width)` luminance values (0-255)
/// * `low` - hysteresis lower threshold on Sobel magnitude
/// * `high` - hysteresis upper threshold, must be greater than `low`
///
/// # Returns
/// Binary `(height, width)` map with values in {0, 255}
pub fn canny(gray: &Array2<u8>, low: f32, high: f32) -> Array2<u8> {
    let (height, width) = (gray.shape()[0], gray.shape()[1]);

    let (gx, gy) = sobel_gradients(gray);

    let mut magnitude = Array2::<f32>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let (dx, dy) = (gx[[y, x]], gy[[y, x]]);
            magnitude[[y, x]] = (dx * dx + dy * dy).sqrt();
        }
    }

    let thin = suppress_non_maxima(&magnitude, &gx, &gy);
    hysteresis(&thin, low, high)
}

/// 3x3 Sobel gradients. Border pixels get zero gradient.
fn sobel_gradients(gray: &Array2<u8>) -> (Array2<f32>, Array2<f32>) {
    let (height, width) = (gray.shape()[0], gray.shape()[1]);
    let mut gx = Array2::<f32>::zeros((height, width));
    let mut gy = Array2::<f32>::zeros((height, width));

    // Sobel kernels
    let kernel_h: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
    let kernel_v: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sum_x = 0i32;
            let mut sum_y = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let lum = gray[[y + ky - 1, x + kx - 1]] as i32;
                    sum_x += lum * kernel_h[ky][kx];
                    sum_y += lum * kernel_v[ky][kx];
                }
            }

            gx[[y, x]] = sum_x as f32;
            gy[[y, x]] = sum_y as f32;
        }
    }

    (gx, gy)
}

/// Keep only pixels that are local maxima along their gradient direction.
///
/// The direction is quantized to one of four sectors (0, 45, 90, 135
/// degrees); a pixel survives when its magnitude is at least that of both
/// neighbors along the sector. Plateaus survive, which can leave edges two
/// pixels wide.
fn suppress_non_maxima(
    magnitude: &Array2<f32>,
    gx: &Array2<f32>,
    gy: &Array2<f32>,
) -> Array2<f32> {
    let (height, width) = (magnitude.shape()[0], magnitude.shape()[1]);
    let mut output = Array2::<f32>::zeros((height, width));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mag = magnitude[[y, x]];
            if mag <= 0.0 {
                continue;
            }

            let mut angle = gy[[y, x]].atan2(gx[[y, x]]).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            // Neighbor pair along the gradient, y axis pointing down
            let ((ax, ay), (bx, by)) = if !(22.5..157.5).contains(&angle) {
                ((x + 1, y), (x - 1, y))
            } else if angle < 67.5 {
                ((x + 1, y + 1), (x - 1, y - 1))
            } else if angle < 112.5 {
                ((x, y + 1), (x, y - 1))
            } else {
                ((x - 1, y + 1), (x + 1, y - 1))
            };

            if mag >= magnitude[[ay, ax]] && mag >= magnitude[[by, bx]] {
                output[[y, x]] = mag;
            }
        }
    }

    output
}

/// Double-threshold the thinned magnitude map and grow definite edges
/// through 8-connected weak pixels.
fn hysteresis(magnitude: &Array2<f32>, low: f32, high: f32) -> Array2<u8> {
    let (height, width) = (magnitude.shape()[0], magnitude.shape()[1]);
    let mut edges = Array2::<u8>::zeros((height, width));

    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if magnitude[[y, x]] >= high {
                stack.push((x, y));
                edges[[y, x]] = 255;
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if edges[[ny, nx]] == 0 && magnitude[[ny, nx]] >= low {
                    edges[[ny, nx]] = 255;
                    stack.push((nx, ny));
                }
            }
        }
    }

    edges
}

// ============================================================================
// Pipeline entry point
// ============================================================================

/// Build the binary edge map for an RGBA image.
///
/// Luminance conversion, Canny with the given hysteresis thresholds, then
/// a single 3x3 dilation pass to bridge small gaps in the traced edges.
///
/// # Arguments
/// * `image` - 4-channel source buffer
/// * `low` - hysteresis lower threshold
/// * `high` - hysteresis upper threshold, must be greater than `low`
///
/// # Returns
/// Single-channel buffer of the source dimensions with values in {0, 255}
pub fn build_edge_map(image: &PixelBuffer, low: f32, high: f32) -> Result<PixelBuffer> {
    let rgba = image.to_rgba_array()?;
    let gray = luminance_rgba_u8(rgba.view());
    let edges = canny(&gray, low, high);
    Ok(PixelBuffer::from_gray_array(dilate_binary(&edges)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Luminance plane with a vertical step at `split`: `left` to the left,
    /// `right` from `split` onward.
    fn step_image(width: usize, height: usize, split: usize, left: u8, right: u8) -> Array2<u8> {
        let mut gray = Array2::<u8>::zeros((height, width));
        for y in 0..height {
            for x in 0..width {
                gray[[y, x]] = if x < split { left } else { right };
            }
        }
        gray
    }

    #[test]
    fn test_canny_flat_image_has_no_edges() {
        let gray = Array2::<u8>::from_elem((8, 8), 128);
        let edges = canny(&gray, 50.0, 150.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_marks_step_edge() {
        let gray = step_image(8, 8, 4, 0, 255);
        let edges = canny(&gray, 50.0, 150.0);

        assert!(edges.iter().all(|&v| v == 0 || v == 255));
        // Edge localized at the step, not in the flat halves
        assert!((1..7).all(|y| edges[[y, 3]] == 255 || edges[[y, 4]] == 255));
        assert_eq!(edges[[4, 1]], 0);
        assert_eq!(edges[[4, 6]], 0);
    }

    #[test]
    fn test_weak_edge_alone_is_rejected() {
        // Contrast of 20 gives a Sobel magnitude of 80: above low, below high
        let gray = step_image(8, 8, 4, 0, 20);
        let edges = canny(&gray, 50.0, 150.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_weak_edge_connected_to_strong_survives() {
        // Strong step in the top rows fading to a weak step below
        let mut gray = Array2::<u8>::zeros((10, 8));
        for y in 0..10 {
            for x in 4..8 {
                gray[[y, x]] = if y < 5 { 255 } else { 20 };
            }
        }

        let edges = canny(&gray, 50.0, 150.0);
        let weak_rows_marked = (7..9).any(|y| (3..5).any(|x| edges[[y, x]] == 255));
        assert!(weak_rows_marked);
    }

    #[test]
    fn test_build_edge_map_shape_and_range() {
        let mut image = PixelBuffer::new(8, 8, 4);
        for y in 0..8 {
            for x in 0..8 {
                let v = if x < 4 { 0 } else { 255 };
                image.put_rgba(x, y, crate::color::Rgba::new(v, v, v, 255));
            }
        }

        let edge_map = build_edge_map(&image, 50.0, 150.0).unwrap();
        assert_eq!(edge_map.width(), 8);
        assert_eq!(edge_map.height(), 8);
        assert_eq!(edge_map.channels(), 1);
        assert!(edge_map.data().iter().all(|&v| v == 0 || v == 255));
        // Dilation thickens the step response
        assert_eq!(edge_map.value_at(2, 4), 255);
    }

    #[test]
    fn test_build_edge_map_rejects_gray_input() {
        let gray = PixelBuffer::new(4, 4, 1);
        assert!(build_edge_map(&gray, 50.0, 150.0).is_err());
    }
}
