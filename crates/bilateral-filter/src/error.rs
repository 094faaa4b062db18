//! Error types for bilateral-filter
//!
//! Every configuration problem is reported by a filter constructor, before
//! any frame is processed. Frame evaluation itself only fails when it is
//! handed frames that do not match the constructed format.

use thiserror::Error;

/// Errors that can occur while building or running a filter
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bilateral_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Sample format the filters cannot process
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Plane index outside the format's planes
    #[error("plane index {index} out of range for {num_planes} planes")]
    PlaneOutOfRange {
        /// Requested plane index
        index: i64,
        /// Number of planes in the format
        num_planes: usize,
    },

    /// Plane listed more than once
    #[error("plane {0} specified twice")]
    DuplicatePlane(usize),

    /// Algorithm code outside 0..=2
    #[error("invalid algorithm {0}: must be 0 (auto), 1 (direct) or 2 (approximate)")]
    InvalidAlgorithm(i64),

    /// Level count outside {0} and 2..=256
    #[error("invalid level count {0}: must be 0 (auto) or in 2..=256")]
    InvalidLevelCount(i64),

    /// Reference clip incompatible with the input clip
    #[error("reference clip mismatch: {0}")]
    ReferenceMismatch(String),

    /// Frame handed to `process` does not match the filter instance
    #[error("frame mismatch: {0}")]
    FrameMismatch(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
