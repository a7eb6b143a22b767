use std::path::{Path, PathBuf};

/// Convenience result type used across heatkde.
pub type HeatResult<T> = Result<T, HeatError>;

/// Top-level error taxonomy used by the density, render and compose APIs.
#[derive(thiserror::Error, Debug)]
pub enum HeatError {
    /// Malformed or empty point sets, non-positive grid parameters, shape mismatches.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A coordinate record lacks a required field.
    #[error("missing field '{field}' in coordinate record {index}")]
    MissingField {
        /// Zero-based position of the offending record.
        index: usize,
        /// Name of the absent field (`x` or `y`).
        field: &'static str,
    },

    /// A referenced input or background file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Unwritable output path, corrupt image, or other IO failure.
    #[error("io failure: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeatError {
    /// Build a [`HeatError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`HeatError::MissingField`] value.
    pub fn missing_field(index: usize, field: &'static str) -> Self {
        Self::MissingField { index, field }
    }

    /// Build a [`HeatError::NotFound`] value.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Build a [`HeatError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Classify an [`std::io::Error`] raised while touching `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::io(format!("'{}': {err}", path.display()))
        }
    }

    /// Classify an [`image::ImageError`] raised while touching `path`.
    pub fn from_image(path: &Path, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::from_io(path, e),
            other => Self::io(format!("image '{}': {other}", path.display())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
