//! Error taxonomy for construction, parameter resolution, validation, and I/O.
//!
//! The four kinds are kept distinct so callers can choose a corrective action:
//! a validity failure means the bytes decoded but the check value rejected them,
//! an I/O or format failure means the stream was short or malformed, a
//! configuration error means the field was built with conflicting options, and a
//! lookup error means an unregistered symbolic type name. None of these are
//! reinterpreted as one another.

use crate::value::Value;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Stream exhausted or failed while decoding/encoding.
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    /// Bytes were read but do not form a valid value for the type.
    #[error("format: {0}")]
    Format(String),
    /// Check value rejected the value just read.
    #[error("validity check failed on {field}: expected {expected:?}, actual {actual:?}")]
    Validity {
        field: String,
        expected: Option<Value>,
        actual: Option<Value>,
    },
    /// Invalid or conflicting construction options, or a value of the wrong
    /// type handed to a field type.
    #[error("configuration: {0}")]
    Configuration(String),
    /// Registry miss for an unregistered symbolic name.
    #[error("unknown field type: {0}")]
    UnknownType(String),
    /// A deferred parameter referenced a name its context does not expose.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),
}
