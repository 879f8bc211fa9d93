//! Fallback entity for wire types with no native counterpart.

use std::any::Any;

use crate::error::BindingError;
use crate::navigation::NavigationLink;
use crate::object::{Assignment, EntityObject, EntityType, FieldKind, Metadata, Structured};
use crate::value::{PropertyValue, ScalarProperty};

/// An entity of an unregistered type.
///
/// Keeps the category term, the identity metadata and every scalar
/// property in document order. Complex values and navigation links are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownEntity {
    /// Wire type name from the category term.
    pub type_name: String,
    /// Identity metadata.
    pub metadata: Metadata,
    /// Scalar properties, in document order.
    pub properties: Vec<ScalarProperty>,
}

impl UnknownEntity {
    /// An empty entity of the given wire type.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// The first scalar property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ScalarProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl Structured for UnknownEntity {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field_kind(&self, field: &str) -> Option<FieldKind> {
        self.property(field).map(|_| FieldKind::Scalar)
    }

    fn assign(&mut self, field: &str, value: PropertyValue) -> Result<Assignment, BindingError> {
        match value {
            PropertyValue::Scalar(mut p) => {
                if p.name != field {
                    p.name = field.to_owned();
                }
                self.properties.push(p);
                Ok(Assignment::Assigned)
            }
            PropertyValue::Complex(_) | PropertyValue::Null => Ok(Assignment::NoSuchField),
        }
    }

    fn field_text(&self, field: &str) -> Option<String> {
        self.property(field).map(ScalarProperty::to_wire)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl EntityObject for UnknownEntity {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn bind_navigation(
        &mut self,
        _field: &str,
        _link: NavigationLink,
    ) -> Result<Assignment, BindingError> {
        Ok(Assignment::NoSuchField)
    }
}

impl EntityType for UnknownEntity {
    const WIRE_TYPE: &'static str = "";
}
