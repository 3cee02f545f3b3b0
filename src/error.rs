//! Error types for the austral crate.
//!
//! This module defines a single error enum covering every failure the plotting
//! pipeline, its loaders and its configuration layer can report.

use thiserror::Error;

/// The main error type for austral operations.
#[derive(Error, Debug)]
pub enum AustralError {
    /// Latitude/longitude columns could not be identified
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Geometry kind is neither point nor tile
    #[error("Unsupported geometry: {kind} (expected 'point' or 'tile')")]
    UnsupportedGeometry { kind: String },

    /// Requested palette does not exist in the palette table
    #[error("Palette selection error: {message}")]
    PaletteSelection { message: String },

    /// A mapped column is missing from the dataset
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AustralError
pub type Result<T> = std::result::Result<T, AustralError>;
