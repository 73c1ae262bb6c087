use thiserror::Error;

/// Errors reported by the fallible [`BitList`](crate::BitList) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An index or range endpoint lies beyond the logical length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A binary boolean operation was given operands of different lengths.
    #[error("length mismatch: {left} bits vs {right} bits")]
    LengthMismatch { left: usize, right: usize },

    /// An export destination cannot hold the packed contents.
    #[error("destination too small: need {needed} elements, have {available}")]
    DestinationTooSmall { needed: usize, available: usize },
}
