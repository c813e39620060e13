use thiserror::Error;

/// Errors surfaced by the generator and its I/O helpers.
///
/// The computational core cannot fail on valid inputs; everything here is
/// produced either at the boundaries (decode/encode), by option validation,
/// or by a failed buffer allocation.
#[derive(Debug, Error)]
pub enum SdfError {
    #[error("invalid argument: {0}")]
    InvalidArguments(String),

    #[error("failed to decode input image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to read input: {0}")]
    InputIo(#[source] std::io::Error),

    #[error("failed to write output: {0}")]
    OutputIo(#[source] std::io::Error),

    #[error("allocation of {bytes} bytes failed")]
    OutOfMemory { bytes: usize },
}
