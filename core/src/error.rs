use std::path::PathBuf;
use thiserror::Error;

/// Result type for usprobe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Error types for usprobe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Companion JSON file does not exist
    #[error("No matching JSON file found: {}", .0.display())]
    MetadataNotFound(PathBuf),

    /// Companion JSON file exists but is not a JSON object
    #[error("Could not parse JSON file {}: {reason}", path.display())]
    MetadataParse { path: PathBuf, reason: String },

    /// Record has no radius1 and is not a rectangle mask
    #[error("radius1 not found in JSON")]
    MissingMeasurement,

    /// radius1 is present but unusable
    #[error("Invalid radius1 value: {0}")]
    InvalidMeasurement(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Top-level input is not a directory
    #[error("{} is not a valid directory.", .0.display())]
    InvalidDirectory(PathBuf),

    /// Pre-supplied answers could not be loaded
    #[error("Could not load answer file {}: {reason}", path.display())]
    AnswerFile { path: PathBuf, reason: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for ProbeError {
    fn from(e: dicom_object::ReadError) -> Self {
        ProbeError::DicomError(format!("{}", e))
    }
}
