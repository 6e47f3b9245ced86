//! Centralized error handling for greenland_viz
//!
//! Every stage of the pipeline reports failures through [`GreenlandVizError`].
//! Nothing is recovered locally: errors propagate unchanged to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for greenland_viz operations
#[derive(Debug, Error)]
pub enum GreenlandVizError {
    /// The dataset path does not resolve to a file
    #[error("Dataset not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// The file exists but could not be read as NetCDF
    #[error("Could not read '{}' as a NetCDF dataset: {message}", path.display())]
    DatasetFormatError { path: PathBuf, message: String },

    /// A requested variable is absent from the dataset
    #[error("Variable '{var}' not found in dataset")]
    VariableMissing { var: String },

    /// Leading (time/band) index past the end of the field's first dimension
    #[error("Index {index} out of range for variable '{var}' (first dimension has length {len})")]
    IndexOutOfRange { var: String, index: usize, len: usize },

    /// Array shapes do not line up, or an axis is empty or not monotonic
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Projection parameters are inconsistent or unsupported
    #[error("Projection error: {message}")]
    ProjectionError { message: String },

    /// NetCDF library errors raised after the file was opened
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// ndarray reshaping errors
    #[error("Array error: {0}")]
    Array(#[from] ndarray::ShapeError),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GreenlandVizError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        GreenlandVizError::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn projection(message: impl Into<String>) -> Self {
        GreenlandVizError::ProjectionError {
            message: message.into(),
        }
    }
}

/// Result type alias for greenland_viz operations
pub type Result<T> = std::result::Result<T, GreenlandVizError>;
