//! Binding and registry error types.
//!
//! [`BindingError`] is raised while assigning parsed wire values onto native
//! fields; [`RegistryError`] while building a [`TypeRegistry`](crate::TypeRegistry).

use crate::value::ScalarKind;

/// A field or link contract violation found during hydration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The parsed value's variant cannot be coerced onto the field's declared type.
    #[error("incompatible value for field {field}: expected {expected}, found {found}")]
    IncompatibleField {
        /// Wire name of the target field.
        field: String,
        /// What the field accepts.
        expected: String,
        /// What the wire carried.
        found: String,
    },

    /// A navigation-shaped link names a field that is not a navigation property.
    #[error("field {field} is not a navigation property")]
    NotNavigation {
        /// Wire name of the target field.
        field: String,
    },

    /// Wire text that does not parse as the declared primitive kind.
    #[error("invalid {kind} text for {field}: {text:?}")]
    InvalidScalar {
        /// Wire name of the element.
        field: String,
        /// Declared primitive kind.
        kind: ScalarKind,
        /// The offending text.
        text: String,
    },

    /// An inline entity whose type differs from the navigation field's entity type.
    #[error("inline entity for {field}: expected {expected}, found {found}")]
    InlineEntityMismatch {
        /// Wire name of the navigation field.
        field: String,
        /// Entity type the field holds.
        expected: String,
        /// Entity type that was inlined.
        found: String,
    },
}

/// Errors raised while building a type registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two native types claim the same wire type name.
    #[error("wire type {0} is registered more than once")]
    DuplicateWireType(String),

    /// A native type claims one of the built-in primitive names.
    #[error("wire type {0} is reserved for a primitive kind")]
    ReservedWireType(String),
}
