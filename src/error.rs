//! Error types for bpcmp.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bpcmp operations.
pub type Result<T> = std::result::Result<T, BpError>;

/// Errors that can occur while comparing or dumping output.
#[derive(Debug, Error)]
pub enum BpError {
    /// An input path does not exist.
    #[error("output does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A tolerance is negative or not a number.
    #[error("{kind} tolerance cannot be negative: {value}")]
    InvalidTolerance { kind: &'static str, value: f64 },

    /// Verbose level outside of 0..=2.
    #[error("invalid verbose level {0}: (0,1,2) to report (nothing, errors only, everything)")]
    InvalidVerbosity(i64),

    /// Failed to open or read a NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// A field listed by a reader could not be read back from it.
    #[error("{role} not found: {name}")]
    FieldNotFound { role: &'static str, name: String },

    /// A variable whose element type cannot be compared numerically.
    #[error("unsupported type for {name}: {dtype}")]
    UnsupportedType { name: String, dtype: String },

    /// Data length does not match the declared shape.
    #[error("Invalid shape/data size: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Log subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl BpError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a FieldNotFound error.
    pub fn field_not_found(role: &'static str, name: impl Into<String>) -> Self {
        Self::FieldNotFound {
            role,
            name: name.into(),
        }
    }
}

impl From<netcdf::Error> for BpError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
