//! Error types for record ingestion and model derivation.

use crate::core::model::Field;

/// Result type alias for the conversion core.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal input errors. Any of these aborts the whole conversion run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field required by the branch being executed is absent
    #[error("record {record}: missing required field {field}")]
    MissingField {
        /// Position of the record in the ingested sequence
        record: usize,
        /// Field that was looked up
        field: Field,
    },

    /// A geometry field did not parse as a number
    #[error("record {record}: field {field} is not a valid number: '{value}'")]
    InvalidNumber {
        /// Position of the record in the ingested sequence
        record: usize,
        /// Field that failed to parse
        field: Field,
        /// Raw field value
        value: String,
    },

    /// The line component of a global line id has no numeric suffix
    #[error("line id '{0}' does not end in a numeric line number")]
    InvalidLineId(String),

    /// Malformed line-strip XML
    #[error("XML error at byte {position}: {source}")]
    Xml {
        /// Reader position when the error was raised
        position: usize,
        /// Underlying parser error
        #[source]
        source: quick_xml::Error,
    },

    /// Non-numeric value in a line-strip XML element
    #[error("element <{element}> is not a valid number: '{value}'")]
    InvalidElement {
        /// Element name
        element: String,
        /// Raw text content
        value: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
