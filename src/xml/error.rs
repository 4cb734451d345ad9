//! Error types for XML document loading and serialization.

use thiserror::Error;

/// Errors that can occur while reading or writing a backing XML document.
///
/// These are boundary errors: once a document has been loaded into an
/// [`XmlDocument`](super::XmlDocument), model-level problems are collected as
/// [`ModelError`](crate::model::diagnostics::ModelError)s instead of being
/// returned through `Result`.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed XML input.
    #[error("XML error: {0}")]
    Malformed(String),

    /// Input was not valid UTF-8.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The document has no root element.
    #[error("document has no root element")]
    NoRoot,

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmlError {
    /// Create a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
