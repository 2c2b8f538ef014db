//! Binary morphology for edge-map cleanup.
//!
//! The detection pipeline runs exactly one dilation pass with a full 3x3
//! structuring element after edge detection. That closes 1-pixel gaps in
//! traced edges; wider gaps stay open and the affected contour leaks into
//! the background. The pass count and kernel are part of the pipeline
//! contract, not tunables.

use ndarray::Array2;

/// Dilate a binary map by one pass of a full 3x3 structuring element.
///
/// # Arguments
/// * `input` - binary grid, 0 = background, any non-zero value = foreground
///
/// # Returns
/// Binary grid with values in {0, 255}: 255 wherever the 3x3 neighborhood
/// contains a foreground pixel
pub fn dilate_binary(input: &Array2<u8>) -> Array2<u8> {
    let (height, width) = (input.shape()[0], input.shape()[1]);
    let mut output = Array2::<u8>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let mut hit = false;

            'window: for dy in -1isize..=1 {
                let sy = y as isize + dy;
                if sy < 0 || sy >= height as isize {
                    continue;
                }
                for dx in -1isize..=1 {
                    let sx = x as isize + dx;
                    if sx < 0 || sx >= width as isize {
                        continue;
                    }
                    if input[[sy as usize, sx as usize]] > 0 {
                        hit = true;
                        break 'window;
                    }
                }
            }

            if hit {
                output[[y, x]] = 255;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_grows_to_block() {
        let mut map = Array2::<u8>::zeros((5, 5));
        map[[2, 2]] = 255;

        let result = dilate_binary(&map);

        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(result[[y, x]], 255);
            }
        }
        assert_eq!(result[[0, 0]], 0);
        assert_eq!(result[[4, 4]], 0);
    }

    #[test]
    fn test_one_pixel_gap_closes() {
        // Horizontal line with a single missing pixel at x=2
        let mut map = Array2::<u8>::zeros((3, 5));
        for x in 0..5 {
            if x != 2 {
                map[[1, x]] = 255;
            }
        }

        let result = dilate_binary(&map);
        assert_eq!(result[[1, 2]], 255);
    }

    #[test]
    fn test_empty_map_stays_empty() {
        let map = Array2::<u8>::zeros((4, 4));
        let result = dilate_binary(&map);
        assert!(result.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_output_is_binary() {
        let mut map = Array2::<u8>::zeros((4, 4));
        map[[1, 1]] = 17; // any non-zero input counts as foreground

        let result = dilate_binary(&map);
        assert!(result.iter().all(|&v| v == 0 || v == 255));
        assert_eq!(result[[2, 2]], 255);
    }
}
