//! The parsed document and its extractors.

use spodata_model::{
    ComplexObject, ComplexType, EntityCollection, EntityObject, EntityType, ScalarProperty, Value,
};

use crate::error::{AtomError, AtomResult};

/// The root of a parsed document.
///
/// Holds the value of the document's first element, if it produced one.
/// Extractors return `Ok(None)` when there is no value and
/// [`AtomError::StructuralMismatch`] when the value has a different shape.
#[derive(Debug, Default)]
pub struct Document {
    value: Option<Value>,
}

impl Document {
    /// Wrap a root value.
    #[must_use]
    pub fn new(value: Option<Value>) -> Self {
        Self { value }
    }

    /// The root value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Whether the root value is an entity collection.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self.value, Some(Value::Collection(_)))
    }

    /// Take the root value.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Extract a single entity of any type.
    pub fn into_any_entity(self) -> AtomResult<Option<Box<dyn EntityObject>>> {
        match self.value {
            None => Ok(None),
            Some(Value::Entity(entity)) => Ok(Some(entity)),
            Some(other) => Err(AtomError::mismatch("entity", other.shape())),
        }
    }

    /// Extract a single entity of type `T`.
    pub fn into_entity<T: EntityType>(self) -> AtomResult<Option<T>> {
        self.into_any_entity()?
            .map(|entity| {
                entity
                    .into_typed::<T>()
                    .map_err(|found| AtomError::mismatch(T::WIRE_TYPE, found))
            })
            .transpose()
    }

    /// Extract an entity collection of any entity types.
    pub fn into_any_collection(
        self,
    ) -> AtomResult<Option<EntityCollection<Box<dyn EntityObject>>>> {
        match self.value {
            None => Ok(None),
            Some(Value::Collection(collection)) => Ok(Some(collection)),
            Some(other) => Err(AtomError::mismatch("entity collection", other.shape())),
        }
    }

    /// Extract an entity collection whose entities are all of type `T`.
    pub fn into_collection<T: EntityType>(self) -> AtomResult<Option<EntityCollection<T>>> {
        let Some(collection) = self.into_any_collection()? else {
            return Ok(None);
        };
        collection
            .into_iter()
            .map(|entity| {
                entity
                    .into_typed::<T>()
                    .map_err(|found| AtomError::mismatch(T::WIRE_TYPE, found))
            })
            .collect::<AtomResult<EntityCollection<T>>>()
            .map(Some)
    }

    /// Extract a single scalar property.
    pub fn into_scalar(self) -> AtomResult<Option<ScalarProperty>> {
        match self.value {
            None => Ok(None),
            Some(Value::Scalar(p)) => Ok(Some(p)),
            Some(other) => Err(AtomError::mismatch("scalar property", other.shape())),
        }
    }

    /// Extract a single complex value of any type.
    pub fn into_any_complex(self) -> AtomResult<Option<Box<dyn ComplexObject>>> {
        match self.value {
            None => Ok(None),
            Some(Value::Complex(c)) => Ok(Some(c)),
            Some(other) => Err(AtomError::mismatch("complex value", other.shape())),
        }
    }

    /// Extract a single complex value of type `T`.
    pub fn into_complex<T: ComplexType>(self) -> AtomResult<Option<T>> {
        self.into_any_complex()?
            .map(|complex| {
                complex
                    .into_typed::<T>()
                    .map_err(|found| AtomError::mismatch(T::WIRE_TYPE, found))
            })
            .transpose()
    }
}
