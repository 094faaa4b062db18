//! Error types for bilateral-core
//!
//! Provides a unified error type for the frame, plane and format types.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Bilateral core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid plane or frame dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid video format description
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Sample type or width that frames cannot store
    #[error("unsupported sample type: {0}")]
    UnsupportedSampleType(String),

    /// Plane storage requested with the wrong sample width
    #[error("sample width mismatch: frame stores {stored} byte samples, requested {requested}")]
    SampleWidthMismatch { stored: u32, requested: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Buffer length does not match the plane geometry
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Plane dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Result type alias for bilateral core operations
pub type Result<T> = std::result::Result<T, Error>;
