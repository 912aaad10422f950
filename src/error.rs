use std::io;

/// All error types for the frostpack pipeline.
#[derive(thiserror::Error, Debug)]
pub enum FrostpackError {
    #[error("Input error: {0}")]
    Input(String),
    #[error("Malformed mesh: {0}")]
    MalformedMesh(String),
    #[error(
        "Atlas overflow: {mask_width}x{mask_height} mask cannot be placed in {atlas_size}x{atlas_size} atlas"
    )]
    AtlasOverflow {
        mask_width: u32,
        mask_height: u32,
        atlas_size: u32,
    },
    #[error("Output error: {0}")]
    Output(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FrostpackError>;
