use thiserror::Error;

/// Errors raised by the keying pipeline itself.
///
/// Hardware faults (camera, loopback device) are reported through `anyhow`
/// by the host; these cover the preconditions the core checks before
/// touching a pixel buffer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChromaError {
    #[error("frame has no pixels")]
    EmptyFrame,

    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("mask data has {actual} entries, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid tolerance config: {0}")]
    InvalidConfig(String),

    #[error("pixel ({x}, {y}) is outside the {width}x{height} frame")]
    CoordinateOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, ChromaError>;
