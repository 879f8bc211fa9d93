//! Binder error taxonomy.
//!
//! Malformed XML, shape mismatches at extraction time and binding contract
//! violations are fatal for the call that hit them. Recoverable gaps
//! (unregistered types, missing optional children, unmatched properties) never
//! surface here; they are absorbed during hydration and logged.

use std::io;

use spodata_model::BindingError;

/// Errors raised while parsing, extracting or serializing an Atom document.
#[derive(Debug, thiserror::Error)]
pub enum AtomError {
    /// The input is not well-formed, or places a structural element where it cannot appear.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The parsed document does not have the shape the caller asked for.
    #[error("structural mismatch: expected {expected}, found {found}")]
    StructuralMismatch {
        /// What the caller requested.
        expected: String,
        /// What the document holds.
        found: String,
    },

    /// A field or link contract violation found during hydration.
    #[error("binding error: {0}")]
    Binding(#[from] BindingError),

    /// The entity's native type is not registered, so it has no wire type name.
    #[error("no wire type registered for {0}")]
    UnmappedType(String),

    /// An I/O error while writing a payload.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<quick_xml::Error> for AtomError {
    fn from(e: quick_xml::Error) -> Self {
        Self::MalformedInput(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for AtomError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedInput(e.to_string())
    }
}

impl AtomError {
    /// Whether this error means the input XML itself was unusable.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Result alias for binder operations.
pub type AtomResult<T> = Result<T, AtomError>;
