//! Schedule document error types.
//!
//! None of these escape the extractor as failures: a document that hits one
//! simply contributes no arrival times. They exist so the reason is logged
//! and can be asserted on in tests.

use crate::domain::{DurationError, TimeError};

/// Why a schedule document could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Bytes are not UTF-8 text
    #[error("document is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Text is not well-formed namespaced XML
    #[error("XML parse error: {0}")]
    Xml(#[from] minidom::Error),

    /// A required child element is absent
    #[error("missing <{child}> in <{parent}>")]
    MissingElement { parent: String, child: &'static str },

    /// An id reference points at no record
    #[error("unresolved {kind} reference {id:?}")]
    UnresolvedReference { kind: &'static str, id: String },

    /// A departure time is not HH:MM:SS
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// A run time is not an ISO-8601 duration
    #[error(transparent)]
    InvalidDuration(#[from] DurationError),

    /// No Service/Lines/Line/LineName in the document
    #[error("document has no line name")]
    MissingLineName,
}
