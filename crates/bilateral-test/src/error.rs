//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test data
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bilateral_core::Error),

    /// Generator called with unusable arguments
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
