use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

/// Failures surfaced by the ranking pipeline.
///
/// The first three are input-validation failures raised before any pixel is
/// scanned. `Decode` only comes from the image collaborator.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("no pixels to rank")]
    EmptyInput,

    #[error("invalid seed palette: {0}")]
    InvalidSeed(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
