//! Error types for heightmap processing.

use thiserror::Error;

use crate::types::Shape;

/// Errors that can occur while reading, masking, merging or comparing grids.
#[derive(Error, Debug)]
pub enum HeightmapError {
    /// Malformed or truncated grid text.
    #[error("invalid grid format: {0}")]
    Format(String),

    /// Grids or masks with incompatible shapes.
    #[error("shape mismatch in {operation}: expected {expected}, got {actual}")]
    ShapeMismatch {
        operation: &'static str,
        expected: Shape,
        actual: Shape,
    },

    /// The mask image could not be opened or decoded.
    #[error("failed to decode mask image: {0}")]
    ImageDecode(String),

    /// File open/create/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl HeightmapError {
    /// Create a Format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a Format error pointing at a 1-based line of the input.
    pub fn format_at(line: usize, msg: impl std::fmt::Display) -> Self {
        Self::Format(format!("line {}: {}", line, msg))
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(operation: &'static str, expected: Shape, actual: Shape) -> Self {
        Self::ShapeMismatch {
            operation,
            expected,
            actual,
        }
    }

    /// Create an ImageDecode error.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<image::ImageError> for HeightmapError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecode(err.to_string())
    }
}

impl From<serde_yaml::Error> for HeightmapError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for heightmap operations.
pub type Result<T> = std::result::Result<T, HeightmapError>;
