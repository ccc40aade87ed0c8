//! Error types for the conversion pipeline.

use thiserror::Error;

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Represents errors that can occur while converting references.
///
/// Missing fields are never errors; they are defaulted. Only a broken input
/// document or a failing I/O layer aborts a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("Malformed BibTeX: {0}")]
    Bibtex(String),

    #[error("Failed to write output: {0}")]
    Write(String),
}

impl From<quick_xml::Error> for ConvertError {
    fn from(err: quick_xml::Error) -> Self {
        ConvertError::Xml(err.to_string())
    }
}
