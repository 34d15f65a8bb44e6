//! Error types for KMZ generation.

use thiserror::Error;

/// Errors that can occur while building a KMZ from a layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Wrong symbology: must be single or categorized ({0})")]
    UnsupportedSymbology(String),

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Field not found in layer: {0}")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
