//! Type registry: wire type names to native types.
//!
//! A [`TypeRegistry`] is built once with [`TypeRegistryBuilder`] and then
//! shared read-only by every parse. It maps each registered wire type name to
//! a constructor for the native type, and each native type back to its wire
//! name for payload serialization. The `Edm.*` primitive names are built in
//! and cannot be re-registered.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::error::RegistryError;
use crate::object::{ComplexObject, ComplexType, EntityObject, EntityType, Structured};
use crate::value::ScalarKind;

fn new_entity<T: EntityType>() -> Box<dyn EntityObject> {
    Box::new(T::default())
}

fn new_complex<T: ComplexType>() -> Box<dyn ComplexObject> {
    Box::new(T::default())
}

/// A registered native entity type.
#[derive(Clone, Copy)]
pub struct EntityDescriptor {
    wire_type: &'static str,
    rust_type: &'static str,
    type_id: TypeId,
    construct: fn() -> Box<dyn EntityObject>,
}

impl EntityDescriptor {
    /// Describe the native type `T`.
    #[must_use]
    pub fn of<T: EntityType>() -> Self {
        Self {
            wire_type: T::WIRE_TYPE,
            rust_type: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            construct: new_entity::<T>,
        }
    }

    /// Wire type name.
    #[must_use]
    pub fn wire_type(&self) -> &'static str {
        self.wire_type
    }

    /// Create a fresh default instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn EntityObject> {
        (self.construct)()
    }
}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("wire_type", &self.wire_type)
            .field("rust_type", &self.rust_type)
            .finish_non_exhaustive()
    }
}

/// A registered native complex type.
#[derive(Clone, Copy)]
pub struct ComplexDescriptor {
    wire_type: &'static str,
    rust_type: &'static str,
    type_id: TypeId,
    construct: fn() -> Box<dyn ComplexObject>,
}

impl ComplexDescriptor {
    /// Describe the native type `T`.
    #[must_use]
    pub fn of<T: ComplexType>() -> Self {
        Self {
            wire_type: T::WIRE_TYPE,
            rust_type: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            construct: new_complex::<T>,
        }
    }

    /// Wire type name.
    #[must_use]
    pub fn wire_type(&self) -> &'static str {
        self.wire_type
    }

    /// Create a fresh default instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn ComplexObject> {
        (self.construct)()
    }
}

impl fmt::Debug for ComplexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexDescriptor")
            .field("wire_type", &self.wire_type)
            .field("rust_type", &self.rust_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
enum NativeType {
    Entity(EntityDescriptor),
    Complex(ComplexDescriptor),
}

/// How a wire type name resolves.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// One of the built-in primitive kinds.
    Primitive(ScalarKind),
    /// A registered entity type.
    Entity(&'a EntityDescriptor),
    /// A registered complex type.
    Complex(&'a ComplexDescriptor),
    /// An entity type name with no native counterpart.
    UnknownEntity,
    /// A value type name with no native complex counterpart.
    UnknownComplex,
    /// A name that is neither primitive nor registered.
    Unrecognized,
}

impl Resolution<'_> {
    /// Whether the name resolved to a primitive kind or a registered type.
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(
            self,
            Self::Primitive(_) | Self::Entity(_) | Self::Complex(_)
        )
    }
}

/// Immutable mapping between wire type names and native types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, NativeType>,
    wire_names: HashMap<TypeId, &'static str>,
}

impl TypeRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Whether `name` is one of the built-in primitive names.
    #[must_use]
    pub fn is_primitive(&self, name: &str) -> bool {
        ScalarKind::from_wire_name(name).is_some()
    }

    /// The primitive kind for `name`, if it is a primitive name.
    #[must_use]
    pub fn primitive_kind(&self, name: &str) -> Option<ScalarKind> {
        ScalarKind::from_wire_name(name)
    }

    /// Resolve any wire type name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Resolution<'_> {
        if let Some(kind) = ScalarKind::from_wire_name(name) {
            return Resolution::Primitive(kind);
        }
        match self.types.get(name) {
            Some(NativeType::Entity(d)) => Resolution::Entity(d),
            Some(NativeType::Complex(d)) => Resolution::Complex(d),
            None => Resolution::Unrecognized,
        }
    }

    /// Resolve a category term: a registered entity type or the entity fallback.
    #[must_use]
    pub fn resolve_entity(&self, term: &str) -> Resolution<'_> {
        match self.entity_variant(term) {
            Some(d) => Resolution::Entity(d),
            None => Resolution::UnknownEntity,
        }
    }

    /// Resolve the declared type of a data element: a primitive kind, a
    /// registered complex type, or the complex fallback.
    #[must_use]
    pub fn resolve_value_type(&self, name: &str) -> Resolution<'_> {
        match self.resolve(name) {
            Resolution::Primitive(kind) => Resolution::Primitive(kind),
            Resolution::Complex(d) => Resolution::Complex(d),
            _ => Resolution::UnknownComplex,
        }
    }

    /// The entity descriptor for `name`, if `name` is a registered entity type.
    #[must_use]
    pub fn entity_variant(&self, name: &str) -> Option<&EntityDescriptor> {
        match self.types.get(name) {
            Some(NativeType::Entity(d)) => Some(d),
            _ => None,
        }
    }

    /// The complex descriptor for `name`, if `name` is a registered complex type.
    #[must_use]
    pub fn complex_variant(&self, name: &str) -> Option<&ComplexDescriptor> {
        match self.types.get(name) {
            Some(NativeType::Complex(d)) => Some(d),
            _ => None,
        }
    }

    /// The wire name registered for native type `T`.
    #[must_use]
    pub fn wire_name_of<T: 'static>(&self) -> Option<&'static str> {
        self.wire_names.get(&TypeId::of::<T>()).copied()
    }

    /// The wire name registered for the concrete type behind `value`.
    #[must_use]
    pub fn wire_name_of_value<T: Structured + ?Sized>(&self, value: &T) -> Option<&'static str> {
        self.wire_names.get(&value.as_any().type_id()).copied()
    }

    /// Number of registered native types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no native types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Collects native types, then validates them into a [`TypeRegistry`].
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    pending: Vec<NativeType>,
}

impl TypeRegistryBuilder {
    /// Register an entity type.
    #[must_use]
    pub fn entity<T: EntityType>(mut self) -> Self {
        self.pending.push(NativeType::Entity(EntityDescriptor::of::<T>()));
        self
    }

    /// Register a complex type.
    #[must_use]
    pub fn complex<T: ComplexType>(mut self) -> Self {
        self.pending
            .push(NativeType::Complex(ComplexDescriptor::of::<T>()));
        self
    }

    /// Validate and freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReservedWireType`] if a type claims a
    /// primitive name or an empty name, and
    /// [`RegistryError::DuplicateWireType`] if two types claim the same name.
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        let mut registry = TypeRegistry::default();
        for native in self.pending {
            let (wire_type, type_id) = match &native {
                NativeType::Entity(d) => (d.wire_type, d.type_id),
                NativeType::Complex(d) => (d.wire_type, d.type_id),
            };
            if wire_type.is_empty() || ScalarKind::from_wire_name(wire_type).is_some() {
                return Err(RegistryError::ReservedWireType(wire_type.to_owned()));
            }
            if registry.types.insert(wire_type, native).is_some() {
                return Err(RegistryError::DuplicateWireType(wire_type.to_owned()));
            }
            registry.wire_names.insert(type_id, wire_type);
        }
        tracing::debug!(types = registry.types.len(), "built type registry");
        Ok(registry)
    }
}
