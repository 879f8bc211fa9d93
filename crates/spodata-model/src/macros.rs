//! Declarative macros that generate native entity and complex types.
//!
//! Each field is declared with its Rust name, storage shape and wire name:
//!
//! ```
//! spodata_model::odata_complex! {
//!     /// Where a resource lives.
//!     pub struct Location => "Demo.Location" {
//!         /// Decoded path.
//!         pub decoded_url: Option<String> => "DecodedUrl",
//!     }
//! }
//!
//! spodata_model::odata_entity! {
//!     /// A demo entity.
//!     pub struct Item => "Demo.Item" {
//!         /// Numeric id.
//!         pub id: i32 => "Id",
//!         /// Where it lives.
//!         pub location: Option<Location> => "Location",
//!     }
//! }
//!
//! use spodata_model::{EntityType, Structured};
//! assert_eq!(Item::WIRE_TYPE, "Demo.Item");
//! assert!(Item::default().field_kind("Location").is_some());
//! ```
//!
//! The generated field table is what the hydrator dispatches on, so a field
//! whose wire name does not appear in a document is simply left at its default.

/// Generates the [`Structured`](crate::Structured) methods for a field table.
#[doc(hidden)]
#[macro_export]
macro_rules! __structured_body {
    ($wire:literal; $($field:ident => $wname:literal),* $(,)?) => {
        fn type_name(&self) -> &str {
            $wire
        }

        fn field_kind(&self, field: &str) -> ::std::option::Option<$crate::FieldKind> {
            match field {
                $($wname => ::std::option::Option::Some($crate::field_kind_of(&self.$field)),)*
                _ => ::std::option::Option::None,
            }
        }

        fn assign(
            &mut self,
            field: &str,
            value: $crate::PropertyValue,
        ) -> ::std::result::Result<$crate::Assignment, $crate::BindingError> {
            match field {
                $($wname => {
                    $crate::FieldSlot::assign(&mut self.$field, field, value)?;
                    ::std::result::Result::Ok($crate::Assignment::Assigned)
                })*
                _ => {
                    let _ = value;
                    ::std::result::Result::Ok($crate::Assignment::NoSuchField)
                }
            }
        }

        fn field_text(&self, field: &str) -> ::std::option::Option<::std::string::String> {
            match field {
                $($wname => $crate::FieldSlot::wire_text(&self.$field),)*
                _ => ::std::option::Option::None,
            }
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
            self
        }
    };
}

/// Declare a native entity type bound to a wire type name.
///
/// The generated struct gets a `metadata` field holding the entity's
/// identity, plus implementations of [`Structured`](crate::Structured),
/// [`EntityObject`](crate::EntityObject) and [`EntityType`](crate::EntityType).
#[macro_export]
macro_rules! odata_entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $wire:literal {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $wname:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            /// Identity metadata.
            pub metadata: $crate::Metadata,
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Structured for $name {
            $crate::__structured_body!($wire; $($field => $wname),*);
        }

        impl $crate::EntityObject for $name {
            fn metadata(&self) -> &$crate::Metadata {
                &self.metadata
            }

            fn metadata_mut(&mut self) -> &mut $crate::Metadata {
                &mut self.metadata
            }

            fn bind_navigation(
                &mut self,
                field: &str,
                link: $crate::NavigationLink,
            ) -> ::std::result::Result<$crate::Assignment, $crate::BindingError> {
                match field {
                    $($wname => {
                        $crate::FieldSlot::bind_navigation(&mut self.$field, field, link)?;
                        ::std::result::Result::Ok($crate::Assignment::Assigned)
                    })*
                    _ => {
                        let _ = link;
                        ::std::result::Result::Ok($crate::Assignment::NoSuchField)
                    }
                }
            }
        }

        impl $crate::EntityType for $name {
            const WIRE_TYPE: &'static str = $wire;
        }
    };
}

/// Declare a native complex type bound to a wire type name.
#[macro_export]
macro_rules! odata_complex {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $wire:literal {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $wname:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Structured for $name {
            $crate::__structured_body!($wire; $($field => $wname),*);
        }

        impl $crate::ComplexObject for $name {}

        impl $crate::ComplexType for $name {
            const WIRE_TYPE: &'static str = $wire;
        }
    };
}
