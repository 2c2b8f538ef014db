use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallpaintError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dimension mismatch: image is {image_width}x{image_height}, mask is {mask_width}x{mask_height}")]
    DimensionMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    #[error("image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid color string {0:?}: expected 6 hex digits")]
    ColorParse(String),

    #[error("seed ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, WallpaintError>;
