/// Enumeration of all errors that can be returned.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The wire document does not match the required shape at a required
    /// point.
    ///
    /// Covers a missing `methodResponse` root, a `params` without a `param`,
    /// a `value` without a type tag, and similar structural violations.
    /// Always fatal for the decoding attempt.
    #[error("malformed XML-RPC document, {0}")]
    Structure(String),
    /// A type element's text cannot be converted to its target type.
    #[error("failed to parse `{value}` as {datatype}")]
    Parse {
        /// Wire name of the target type.
        datatype: &'static str,
        /// The text that failed to convert.
        value: String,
    },
    /// A typed accessor was called on a response that carries no value.
    #[error("the response value is absent")]
    NullValue,
    /// A typed accessor was called against a value of a different kind.
    ///
    /// The underlying response is untouched and may be re-inspected with a
    /// different accessor.
    #[error("the response value is of type {found}, not {expected}")]
    TypeMismatch {
        /// Wire name of the requested type.
        expected: &'static str,
        /// Wire name of the actual type.
        found: &'static str,
    },
    /// Failure reported by the transport carrying the documents.
    #[error("transport failure")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// XML syntax error while reading a document.
    #[error("failed to read XML data")]
    XmlRead(#[from] xml::reader::Error),
    /// XML emission error while writing a document.
    #[error("failed to write XML data")]
    XmlWrite(#[from] xml::writer::Error),
    /// A produced document was not valid UTF-8.
    #[error("document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Convenience type for shorter return value syntax of this crate's errors.
pub type Result<T> = std::result::Result<T, Error>;
