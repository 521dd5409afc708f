use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasBakeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid dimensions: width and height must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Source '{key}' has {found} bytes per pixel, expected {expected}")]
    BppMismatch {
        key: String,
        expected: u32,
        found: u32,
    },

    #[error("Unsupported bytes-per-pixel value: {0}")]
    UnsupportedBpp(u32),

    #[error("Nothing to pack: input list is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, AtlasBakeError>;
