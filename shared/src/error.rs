//! Error types for the calculation core

use thiserror::Error;

/// Errors raised by the scorer and predictor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    #[error("Crop not found: {0}")]
    CropNotFound(String),
}

/// Errors raised while loading or validating reference tables
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {kind} entry: {name}")]
    Duplicate { kind: &'static str, name: String },

    #[error("Invalid crop {crop}: {message}")]
    InvalidCrop { crop: String, message: String },

    #[error("Invalid state {state}: {message}")]
    InvalidState { state: String, message: String },
}
