//! Wire value model.
//!
//! Every value the binder produces belongs to one of the tagged unions in
//! this module. Scalar properties carry one of the three supported `Edm`
//! primitive kinds and convert to and from their wire text; complex and
//! entity values are native types behind the [`ComplexObject`] and
//! [`EntityObject`] traits.

use std::fmt;

use crate::error::BindingError;
use crate::navigation::EntityCollection;
use crate::object::{ComplexObject, EntityObject};

/// The primitive kinds a scalar property can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `Edm.Boolean`
    Boolean,
    /// `Edm.Int32`
    Int32,
    /// `Edm.String`
    String,
}

impl ScalarKind {
    /// Every supported primitive kind.
    pub const ALL: [Self; 3] = [Self::Boolean, Self::Int32, Self::String];

    /// Returns the wire type name of this kind.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Boolean => "Edm.Boolean",
            Self::Int32 => "Edm.Int32",
            Self::String => "Edm.String",
        }
    }

    /// Look up a kind by its wire type name.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.wire_name() == name)
    }

    /// Convert wire text into a value of this kind.
    ///
    /// Booleans compare case-insensitively against `true`; anything else,
    /// including padded text, is `false`. Integers are decimal with no
    /// surrounding whitespace. Text is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidScalar`] if integer text does not parse.
    pub fn parse(&self, field: &str, text: &str) -> Result<ScalarValue, BindingError> {
        match self {
            Self::Boolean => Ok(ScalarValue::Boolean(text.eq_ignore_ascii_case("true"))),
            Self::Int32 => text
                .parse::<i32>()
                .map(ScalarValue::Int32)
                .map_err(|_| BindingError::InvalidScalar {
                    field: field.to_owned(),
                    kind: *self,
                    text: text.to_owned(),
                }),
            Self::String => Ok(ScalarValue::String(text.to_owned())),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A primitive value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarValue {
    /// Boolean value.
    Boolean(bool),
    /// 32-bit integer value.
    Int32(i32),
    /// Text value.
    String(String),
}

impl ScalarValue {
    /// Returns the primitive kind of this value.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::Int32(_) => ScalarKind::Int32,
            Self::String(_) => ScalarKind::String,
        }
    }

    /// Returns the boolean if this is a `Boolean` variant.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int32` variant.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text if this is a `String` variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render this value as wire text.
    #[must_use]
    pub fn to_wire(&self) -> String {
        match self {
            Self::Boolean(b) => (if *b { "true" } else { "false" }).to_owned(),
            Self::Int32(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// A named primitive value, as carried by a data element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarProperty {
    /// The element's local name.
    pub name: String,
    /// The parsed value.
    pub value: ScalarValue,
}

impl ScalarProperty {
    /// Create a property from an already typed value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: ScalarValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Parse a property from its wire text.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidScalar`] if the text does not parse as `kind`.
    pub fn from_wire(kind: ScalarKind, name: &str, text: &str) -> Result<Self, BindingError> {
        Ok(Self::new(name, kind.parse(name, text)?))
    }

    /// Returns the primitive kind of the value.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        self.value.kind()
    }

    /// Render the value as wire text.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.value.to_wire()
    }
}

/// The resolved value of a data element: what hydration assigns onto a field.
#[derive(Debug)]
pub enum PropertyValue {
    /// A primitive value.
    Scalar(ScalarProperty),
    /// A hydrated complex value.
    Complex(Box<dyn ComplexObject>),
    /// An explicit `m:null` marker.
    Null,
}

impl PropertyValue {
    /// Describe the variant for diagnostics: the primitive or complex wire
    /// type name, or `null`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(p) => p.kind().wire_name().to_owned(),
            Self::Complex(c) => c.type_name().to_owned(),
            Self::Null => "null".to_owned(),
        }
    }

    /// Returns the scalar property if this is a `Scalar` variant.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarProperty> {
        match self {
            Self::Scalar(p) => Some(p),
            _ => None,
        }
    }
}

/// The root value of a parsed document.
#[derive(Debug)]
pub enum Value {
    /// A single primitive property.
    Scalar(ScalarProperty),
    /// A single complex value.
    Complex(Box<dyn ComplexObject>),
    /// A single entity.
    Entity(Box<dyn EntityObject>),
    /// A feed of entities.
    Collection(EntityCollection<Box<dyn EntityObject>>),
}

impl Value {
    /// Short name of the variant, used in shape mismatch errors.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar property",
            Self::Complex(_) => "complex value",
            Self::Entity(_) => "entity",
            Self::Collection(_) => "entity collection",
        }
    }
}
