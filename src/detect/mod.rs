//! Wall detection: contour extraction and mask construction.
//!
//! The detection pass runs once per loaded image: the edge map from
//! [`crate::filters::build_edge_map`] goes through [`extract_contours`],
//! and [`build_mask`] turns the largest contour into the session's cached
//! binary wall mask.

pub mod contour;
pub mod mask;

pub use contour::{extract_contours, BoundingBox, Contour};
pub use mask::build_mask;
