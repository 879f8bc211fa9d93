//! Wire value model and native type registry for the OData Atom binder.
//!
//! This crate defines what a parsed OData document is made of:
//!
//! - [`ScalarValue`], [`ScalarProperty`], [`PropertyValue`] and [`Value`]:
//!   the tagged unions every wire value is represented by.
//! - [`EntityObject`] and [`ComplexObject`]: the object-safe interfaces of
//!   native types, generated with [`odata_entity!`] and [`odata_complex!`].
//! - [`TypeRegistry`]: the mapping between wire type names and native types,
//!   built once and shared by every parse.
//! - [`sharepoint`]: the SharePoint REST types and their shared registry.

mod macros;

pub mod error;
pub mod navigation;
pub mod object;
pub mod registry;
pub mod sharepoint;
pub mod unknown;
pub mod value;

pub use error::{BindingError, RegistryError};
pub use navigation::{EntityCollection, NavigationLink, NavigationProperty};
pub use object::{
    Assignment, ComplexObject, ComplexType, EntityObject, EntityType, FieldKind, FieldSlot,
    Metadata, Structured, field_kind_of,
};
pub use registry::{
    ComplexDescriptor, EntityDescriptor, Resolution, TypeRegistry, TypeRegistryBuilder,
};
pub use unknown::UnknownEntity;
pub use value::{PropertyValue, ScalarKind, ScalarProperty, ScalarValue, Value};
