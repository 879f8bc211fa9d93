//! Native entity and complex types.
//!
//! Hydration never inspects native types at runtime. Each native type
//! exposes a name-indexed table of field slots (generated by
//! [`odata_entity!`](crate::odata_entity) or [`odata_complex!`](crate::odata_complex)),
//! and every slot shape implements [`FieldSlot`], which owns the coercion
//! rule for that shape.

use std::any::Any;
use std::fmt;

use crate::error::BindingError;
use crate::navigation::{NavigationLink, NavigationProperty};
use crate::value::{PropertyValue, ScalarProperty, ScalarValue};

/// Identity metadata of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Canonical self-link (the Atom `id`).
    pub id: Option<String>,
    /// Edit link, resolved against `xml:base` when one is in scope.
    pub uri: Option<String>,
    /// Entity tag from the entry's `m:etag` attribute.
    pub etag: Option<String>,
    /// Wire type name from the entry's category term.
    pub type_name: Option<String>,
}

/// Declared type of a native field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text.
    Text,
    /// Plain 32-bit integer.
    Int32,
    /// Plain boolean.
    Boolean,
    /// A scalar property of any primitive kind, kept with its name.
    Scalar,
    /// A complex value of the given wire type.
    Complex(&'static str),
    /// A navigation property to entities of the given wire type.
    Navigation(&'static str),
}

impl FieldKind {
    /// Whether values of this kind have a text representation for payloads.
    #[must_use]
    pub fn is_text_representable(&self) -> bool {
        matches!(self, Self::Text | Self::Int32 | Self::Boolean | Self::Scalar)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Edm.String"),
            Self::Int32 => f.write_str("Edm.Int32"),
            Self::Boolean => f.write_str("Edm.Boolean"),
            Self::Scalar => f.write_str("scalar property"),
            Self::Complex(t) => f.write_str(t),
            Self::Navigation(t) => write!(f, "navigation to {t}"),
        }
    }
}

/// Outcome of assigning a value by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The value was stored.
    Assigned,
    /// The native type has no field of that name.
    NoSuchField,
}

/// A value with named fields: the object-safe face of every native type.
pub trait Structured: Any + fmt::Debug + Send + Sync {
    /// Wire type name of this value.
    fn type_name(&self) -> &str;

    /// Declared type of the named field, or `None` if there is no such field.
    fn field_kind(&self, field: &str) -> Option<FieldKind>;

    /// Assign a parsed value onto the named field.
    ///
    /// # Errors
    ///
    /// Returns a [`BindingError`] if the value cannot be coerced onto the field.
    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<Assignment, BindingError>;

    /// Wire text of the named field, or `None` if it is absent or has no
    /// text representation.
    fn field_text(&self, field: &str) -> Option<String>;

    /// Borrow as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Convert into [`Any`] for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// A complex value: named fields, no identity.
pub trait ComplexObject: Structured {}

/// An entity: a complex value plus identity metadata and navigation properties.
pub trait EntityObject: Structured {
    /// Identity metadata.
    fn metadata(&self) -> &Metadata;

    /// Mutable identity metadata.
    fn metadata_mut(&mut self) -> &mut Metadata;

    /// Bind a navigation link onto the named field.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::NotNavigation`] if the field exists but is not
    /// a navigation property, or [`BindingError::InlineEntityMismatch`] if an
    /// inlined entity has the wrong type.
    fn bind_navigation(
        &mut self,
        field: &str,
        link: NavigationLink,
    ) -> Result<Assignment, BindingError>;
}

/// A registrable complex type.
pub trait ComplexType: ComplexObject + Default + Clone {
    /// Wire type name, e.g. `SP.ResourcePath`.
    const WIRE_TYPE: &'static str;
}

/// A registrable entity type.
pub trait EntityType: EntityObject + Default + Clone {
    /// Wire type name, e.g. `SP.Group`.
    const WIRE_TYPE: &'static str;
}

impl dyn EntityObject {
    /// Borrow as a concrete entity type.
    #[must_use]
    pub fn downcast_ref<T: EntityType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the concrete type is `T`.
    #[must_use]
    pub fn is<T: EntityType>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Convert into a concrete entity type.
    ///
    /// # Errors
    ///
    /// Returns the wire type name of the actual entity if it is not a `T`.
    pub fn into_typed<T: EntityType>(self: Box<Self>) -> Result<T, String> {
        let found = self.type_name().to_owned();
        self.into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| found)
    }
}

impl dyn ComplexObject {
    /// Borrow as a concrete complex type.
    #[must_use]
    pub fn downcast_ref<T: ComplexType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Convert into a concrete complex type.
    ///
    /// # Errors
    ///
    /// Returns the wire type name of the actual value if it is not a `T`.
    pub fn into_typed<T: ComplexType>(self: Box<Self>) -> Result<T, String> {
        let found = self.type_name().to_owned();
        self.into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| found)
    }
}

// ---------------------------------------------------------------------------
// Field slots
// ---------------------------------------------------------------------------

/// A storage shape for a native field, with its coercion rule.
///
/// A slot accepts a parsed value directly when its shape matches, unwraps a
/// scalar of the matching kind onto plain `String`/`i32`/`bool` shapes, and
/// rejects everything else with a [`BindingError`]. An `m:null` value resets
/// the slot to its absent/default state.
pub trait FieldSlot {
    /// Declared type of the slot.
    const KIND: FieldKind;

    /// Store a parsed property value.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::IncompatibleField`] on a shape mismatch.
    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError>;

    /// Store a navigation link.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::NotNavigation`] unless the slot is a navigation property.
    fn bind_navigation(&mut self, field: &str, link: NavigationLink) -> Result<(), BindingError> {
        let _ = link;
        Err(BindingError::NotNavigation {
            field: field.to_owned(),
        })
    }

    /// Wire text of the stored value, if it has one.
    fn wire_text(&self) -> Option<String> {
        None
    }
}

/// Declared kind of a slot, inferred from a field reference.
#[must_use]
pub fn field_kind_of<S: FieldSlot>(_slot: &S) -> FieldKind {
    S::KIND
}

fn incompatible(field: &str, expected: impl fmt::Display, found: &PropertyValue) -> BindingError {
    BindingError::IncompatibleField {
        field: field.to_owned(),
        expected: expected.to_string(),
        found: found.describe(),
    }
}

impl FieldSlot for Option<String> {
    const KIND: FieldKind = FieldKind::Text;

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Scalar(ScalarProperty {
                value: ScalarValue::String(s),
                ..
            }) => *self = Some(s),
            PropertyValue::Null => *self = None,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }

    fn wire_text(&self) -> Option<String> {
        self.clone()
    }
}

impl FieldSlot for i32 {
    const KIND: FieldKind = FieldKind::Int32;

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Scalar(ScalarProperty {
                value: ScalarValue::Int32(n),
                ..
            }) => *self = n,
            PropertyValue::Null => *self = 0,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }

    fn wire_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldSlot for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Scalar(ScalarProperty {
                value: ScalarValue::Boolean(b),
                ..
            }) => *self = b,
            PropertyValue::Null => *self = false,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }

    fn wire_text(&self) -> Option<String> {
        Some(ScalarValue::Boolean(*self).to_wire())
    }
}

impl FieldSlot for Option<i32> {
    const KIND: FieldKind = FieldKind::Int32;

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Scalar(ScalarProperty {
                value: ScalarValue::Int32(n),
                ..
            }) => *self = Some(n),
            PropertyValue::Null => *self = None,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }

    fn wire_text(&self) -> Option<String> {
        self.map(|n| n.to_string())
    }
}

impl FieldSlot for Option<bool> {
    const KIND: FieldKind = FieldKind::Boolean;

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Scalar(ScalarProperty {
                value: ScalarValue::Boolean(b),
                ..
            }) => *self = Some(b),
            PropertyValue::Null => *self = None,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }

    fn wire_text(&self) -> Option<String> {
        self.map(|b| ScalarValue::Boolean(b).to_wire())
    }
}

impl FieldSlot for Option<ScalarProperty> {
    const KIND: FieldKind = FieldKind::Scalar;

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Scalar(p) => *self = Some(p),
            PropertyValue::Null => *self = None,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }

    fn wire_text(&self) -> Option<String> {
        self.as_ref().map(ScalarProperty::to_wire)
    }
}

impl<T: ComplexType> FieldSlot for Option<T> {
    const KIND: FieldKind = FieldKind::Complex(T::WIRE_TYPE);

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Complex(complex) => {
                let typed = complex
                    .into_typed::<T>()
                    .map_err(|found| BindingError::IncompatibleField {
                        field: field.to_owned(),
                        expected: T::WIRE_TYPE.to_owned(),
                        found,
                    })?;
                *self = Some(typed);
            }
            PropertyValue::Null => *self = None,
            other => return Err(incompatible(field, Self::KIND, &other)),
        }
        Ok(())
    }
}

impl<E: EntityType> FieldSlot for Option<NavigationProperty<E>> {
    const KIND: FieldKind = FieldKind::Navigation(E::WIRE_TYPE);

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<(), BindingError> {
        match value {
            PropertyValue::Null => {
                *self = None;
                Ok(())
            }
            other => Err(incompatible(field, Self::KIND, &other)),
        }
    }

    fn bind_navigation(&mut self, field: &str, link: NavigationLink) -> Result<(), BindingError> {
        let mut nav = NavigationProperty::deferred(link.href);
        if let Some(inline) = link.inline {
            nav.set_deferred(false);
            for entity in inline {
                let typed =
                    entity
                        .into_typed::<E>()
                        .map_err(|found| BindingError::InlineEntityMismatch {
                            field: field.to_owned(),
                            expected: E::WIRE_TYPE.to_owned(),
                            found,
                        })?;
                nav.push(typed);
            }
        }
        *self = Some(nav);
        Ok(())
    }
}
