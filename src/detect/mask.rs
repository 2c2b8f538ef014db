//! Wall-mask construction from extracted contours.
//!
//! Selects the contour with the strictly greatest enclosed area and
//! rasterizes its interior into a binary mask (255 inside, 0 outside).
//! "No wall detected" is a defined state, not an error: an empty contour
//! list - or one containing only degenerate zero-area contours - produces
//! an all-zero mask and no selected index, and consumers suppress the
//! recolor affordance instead of failing.

use crate::detect::contour::Contour;
use crate::pixel::PixelBuffer;

/// Build the binary wall mask for a set of contours.
///
/// # Arguments
/// * `contours` - candidate contours, any order
/// * `width` - mask width (source image width)
/// * `height` - mask height (source image height)
///
/// # Returns
/// The single-channel `{0, 255}` mask and the index of the selected
/// contour, or `None` when nothing with a positive area was found
pub fn build_mask(
    contours: &[Contour],
    width: u32,
    height: u32,
) -> (PixelBuffer, Option<usize>) {
    let mut mask = PixelBuffer::new(width, height, 1);

    let mut selected = None;
    let mut max_area = 0.0f64;
    for (i, contour) in contours.iter().enumerate() {
        if contour.area > max_area {
            max_area = contour.area;
            selected = Some(i);
        }
    }

    if let Some(i) = selected {
        fill_polygon(
            mask.data_mut(),
            width as usize,
            height as usize,
            &contours[i].points,
        );
    }

    (mask, selected)
}

/// Even-odd scanline fill of a closed polygon onto a flat mask.
///
/// Crossings are counted with the half-open rule (an edge covers its
/// lower-y endpoint, not its upper), so shared vertices count once and
/// horizontal edges contribute nothing.
fn fill_polygon(mask: &mut [u8], width: usize, height: usize, points: &[(i32, i32)]) {
    if points.len() < 3 {
        return;
    }

    let mut crossings: Vec<f64> = Vec::new();

    for y in 0..height {
        let sy = y as f64;
        crossings.clear();

        for i in 0..points.len() {
            let (px, py) = points[i];
            let (qx, qy) = points[(i + 1) % points.len()];
            let (px, py, qx, qy) = (px as f64, py as f64, qx as f64, qy as f64);

            if (py <= sy && qy > sy) || (qy <= sy && py > sy) {
                let t = (sy - py) / (qy - py);
                crossings.push(px + t * (qx - px));
            }
        }

        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil().max(0.0) as usize;
            let end = pair[1].floor().min(width as f64 - 1.0);
            if end < 0.0 {
                continue;
            }
            for x in start..=end as usize {
                mask[y * width + x] = 255;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::contour::{extract_contours, BoundingBox};

    fn rect_contour(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        let points = vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
        let area = ((x1 - x0) * (y1 - y0)) as f64;
        Contour {
            points,
            area,
            bounding_box: BoundingBox {
                x: x0 as u32,
                y: y0 as u32,
                width: (x1 - x0 + 1) as u32,
                height: (y1 - y0 + 1) as u32,
            },
        }
    }

    #[test]
    fn test_empty_input_yields_zero_mask() {
        let (mask, selected) = build_mask(&[], 6, 4);

        assert_eq!(selected, None);
        assert_eq!(mask.width(), 6);
        assert_eq!(mask.height(), 4);
        assert_eq!(mask.channels(), 1);
        assert!(mask.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_degenerate_contours_select_nothing() {
        let degenerate = Contour {
            points: vec![(1, 1)],
            area: 0.0,
            bounding_box: BoundingBox { x: 1, y: 1, width: 1, height: 1 },
        };

        let (mask, selected) = build_mask(&[degenerate], 4, 4);
        assert_eq!(selected, None);
        assert!(mask.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_largest_contour_wins() {
        let small = rect_contour(0, 0, 2, 2);
        let large = rect_contour(3, 3, 9, 9);
        let contours = vec![small, large.clone()];

        let (_, selected) = build_mask(&contours, 12, 12);
        assert_eq!(selected, Some(1));
        assert!(contours
            .iter()
            .all(|c| c.area <= contours[selected.unwrap()].area));
    }

    #[test]
    fn test_mask_is_binary_and_interior_filled() {
        let contour = rect_contour(2, 2, 7, 6);
        let (mask, selected) = build_mask(&[contour], 10, 10);

        assert_eq!(selected, Some(0));
        assert!(mask.data().iter().all(|&v| v == 0 || v == 255));
        // Interior is inside, far corners are outside
        assert_eq!(mask.value_at(4, 4), 255);
        assert_eq!(mask.value_at(3, 3), 255);
        assert_eq!(mask.value_at(0, 0), 0);
        assert_eq!(mask.value_at(9, 9), 0);
        assert_eq!(mask.value_at(8, 4), 0);
    }

    #[test]
    fn test_mask_from_traced_contour() {
        // End to end with the extractor: a solid block's traced boundary
        // rasterizes back over the block interior.
        let mut edges = vec![0u8; 12 * 12];
        for y in 3..9 {
            for x in 2..10 {
                edges[y * 12 + x] = 255;
            }
        }

        let contours = extract_contours(&edges, 12, 12);
        let (mask, selected) = build_mask(&contours, 12, 12);

        assert!(selected.is_some());
        assert_eq!(mask.value_at(5, 5), 255);
        assert_eq!(mask.value_at(0, 0), 0);
        assert_eq!(mask.value_at(11, 11), 0);
    }

    #[test]
    fn test_polygon_clipped_to_mask_bounds() {
        // Contour partially outside the raster: fill clamps, no panic
        let contour = Contour {
            points: vec![(-3, -3), (4, -3), (4, 4), (-3, 4)],
            area: 49.0,
            bounding_box: BoundingBox { x: 0, y: 0, width: 5, height: 5 },
        };
        let (mask, selected) = build_mask(&[contour], 6, 6);

        assert_eq!(selected, Some(0));
        assert_eq!(mask.value_at(1, 1), 255);
        assert_eq!(mask.value_at(5, 5), 0);
    }
}
