//! Entity hydration.
//!
//! Runs when a node closes. Data elements become scalar or complex values,
//! entries become entities, feeds become collections. Every decision here is
//! made from the closing node's own children.

use spodata_core::CoercionPolicy;
use spodata_model::{
    Assignment, BindingError, EntityCollection, EntityObject, NavigationLink, PropertyValue,
    Resolution, ScalarProperty, Structured, TypeRegistry, UnknownEntity,
};
use tracing::{debug, trace, warn};

use crate::error::AtomResult;
use crate::node::{Closed, ClosedLink, Node, NodeState, resolve_reference};
use crate::vocabulary::{SCHEME, is_navigation_link_type};

/// Turns closed nodes into values, using one registry and one coercion policy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hydrator<'r> {
    registry: &'r TypeRegistry,
    policy: CoercionPolicy,
}

impl<'r> Hydrator<'r> {
    pub(crate) fn new(registry: &'r TypeRegistry, policy: CoercionPolicy) -> Self {
        Self { registry, policy }
    }

    pub(crate) fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Finalize a node into the product its parent will see.
    pub(crate) fn close(&self, node: Node) -> AtomResult<Closed> {
        let Node {
            state,
            base,
            children,
        } = node;
        let closed = match state {
            NodeState::Feed => Closed::Feed(collect_feed(children)),
            NodeState::Entry { etag } => Closed::Entry(self.finish_entry(etag, children)?),
            NodeState::Id { text } => Closed::Id(text),
            NodeState::Category { term, scheme } => Closed::Category { term, scheme },
            NodeState::Link(attributes) => Closed::Link(ClosedLink {
                attributes,
                base,
                inline: collect_inline(children),
            }),
            NodeState::Inline => Closed::Inline(collect_inline(children).unwrap_or_default()),
            NodeState::Content => Closed::Content(children.into_iter().find_map(|c| match c {
                Closed::Properties(props) => Some(props),
                _ => None,
            })),
            NodeState::Properties => Closed::Properties(collect_properties(children)),
            NodeState::Data {
                name,
                declared_type,
                is_null,
                text,
            } => {
                let value =
                    self.finish_data(&name, declared_type.as_deref(), is_null, &text, children)?;
                Closed::Data { name, value }
            }
            NodeState::UnrecognizedData { name } => {
                debug!(element = %name, "ignoring data element without a recognized type");
                Closed::Inert
            }
            NodeState::Document | NodeState::Passthrough => Closed::Inert,
        };
        Ok(closed)
    }

    /// Resolve a data element into a scalar, complex or null value.
    ///
    /// A missing declared type means `Edm.String`. Complex values hydrate
    /// from the element's own nested data children. Unregistered complex
    /// types resolve to nothing.
    fn finish_data(
        &self,
        name: &str,
        declared_type: Option<&str>,
        is_null: bool,
        text: &str,
        children: Vec<Closed>,
    ) -> AtomResult<Option<PropertyValue>> {
        if is_null {
            return Ok(Some(PropertyValue::Null));
        }
        let declared = declared_type.unwrap_or("Edm.String");
        match self.registry.resolve_value_type(declared) {
            Resolution::Primitive(kind) => match ScalarProperty::from_wire(kind, name, text) {
                Ok(p) => Ok(Some(PropertyValue::Scalar(p))),
                Err(e) => {
                    self.absorb(name, e)?;
                    Ok(None)
                }
            },
            Resolution::Complex(descriptor) => {
                let mut complex = descriptor.instantiate();
                self.assign_properties(complex.as_mut(), collect_properties(children))?;
                Ok(Some(PropertyValue::Complex(complex)))
            }
            _ => {
                debug!(
                    element = %name,
                    wire_type = %declared,
                    "dropping value of unregistered complex type"
                );
                Ok(None)
            }
        }
    }

    /// Build the entity for an entry, or `None` if it has no category.
    fn finish_entry(
        &self,
        etag: Option<String>,
        children: Vec<Closed>,
    ) -> AtomResult<Option<Box<dyn EntityObject>>> {
        let mut term = None;
        let mut id = None;
        let mut links = Vec::new();
        let mut properties = None;
        for child in children {
            match child {
                Closed::Category { term: t, scheme } => {
                    if scheme.as_deref().is_some_and(|s| s != SCHEME) {
                        debug!(scheme = ?scheme, "category with unexpected scheme");
                    }
                    term = term.or(t);
                }
                Closed::Id(text) => id = Some(text),
                Closed::Link(link) => links.push(link),
                Closed::Content(Some(props)) | Closed::Properties(props) => {
                    properties.get_or_insert_with(Vec::new).extend(props);
                }
                _ => {}
            }
        }

        let Some(term) = term else {
            debug!("entry without category produces no entity");
            return Ok(None);
        };

        let mut entity: Box<dyn EntityObject> = match self.registry.resolve_entity(&term) {
            Resolution::Entity(descriptor) => descriptor.instantiate(),
            _ => {
                debug!(wire_type = %term, "unregistered entity type, using fallback");
                Box::new(UnknownEntity::new(term.clone()))
            }
        };

        let metadata = entity.metadata_mut();
        metadata.type_name = Some(term);
        metadata.id = id;
        metadata.etag = etag;
        for link in &links {
            if link.attributes.rel.as_deref() == Some("edit") {
                if let Some(href) = &link.attributes.href {
                    metadata.uri = Some(resolve_reference(link.base.as_deref(), href));
                }
            }
        }

        for link in links {
            self.bind_link(entity.as_mut(), link)?;
        }

        match properties {
            Some(props) => self.assign_properties(entity.as_mut(), props)?,
            None => debug!(wire_type = %entity.type_name(), "entry without properties"),
        }

        trace!(wire_type = %entity.type_name(), id = ?entity.metadata().id, "hydrated entity");
        Ok(Some(entity))
    }

    fn bind_link(&self, entity: &mut dyn EntityObject, link: ClosedLink) -> AtomResult<()> {
        let ClosedLink {
            attributes, inline, ..
        } = link;
        let (Some(href), Some(title)) = (attributes.href, attributes.title) else {
            return Ok(());
        };
        if !attributes
            .link_type
            .as_deref()
            .is_some_and(is_navigation_link_type)
        {
            return Ok(());
        }

        match entity.bind_navigation(&title, NavigationLink { href, inline }) {
            Ok(Assignment::Assigned) => {
                trace!(field = %title, "bound navigation property");
                Ok(())
            }
            Ok(Assignment::NoSuchField) => {
                debug!(
                    wire_type = %entity.type_name(),
                    field = %title,
                    "skipping link with no matching field"
                );
                Ok(())
            }
            Err(e @ BindingError::NotNavigation { .. }) => Err(e.into()),
            Err(e) => self.absorb(entity.type_name(), e),
        }
    }

    fn assign_properties<T: Structured + ?Sized>(
        &self,
        target: &mut T,
        properties: Vec<(String, PropertyValue)>,
    ) -> AtomResult<()> {
        for (name, value) in properties {
            match target.assign(&name, value) {
                Ok(Assignment::Assigned) => {}
                Ok(Assignment::NoSuchField) => {
                    debug!(
                        wire_type = %target.type_name(),
                        property = %name,
                        "skipping property with no matching field"
                    );
                }
                Err(e) => self.absorb(target.type_name(), e)?,
            }
        }
        Ok(())
    }

    /// Apply the coercion policy to a binding failure.
    fn absorb(&self, target: &str, error: BindingError) -> AtomResult<()> {
        if self.policy.is_strict() {
            return Err(error.into());
        }
        warn!(target_type = %target, error = %error, "skipping value that cannot be bound");
        Ok(())
    }
}

fn collect_feed(children: Vec<Closed>) -> EntityCollection<Box<dyn EntityObject>> {
    children
        .into_iter()
        .filter_map(|c| match c {
            Closed::Entry(entity) => entity,
            _ => None,
        })
        .collect()
}

/// Entities inlined below a link or `m:inline`, or `None` if there were none.
fn collect_inline(children: Vec<Closed>) -> Option<Vec<Box<dyn EntityObject>>> {
    let mut inline: Option<Vec<Box<dyn EntityObject>>> = None;
    for child in children {
        match child {
            Closed::Inline(entities) => inline.get_or_insert_with(Vec::new).extend(entities),
            Closed::Feed(collection) => inline.get_or_insert_with(Vec::new).extend(collection),
            Closed::Entry(entity) => inline.get_or_insert_with(Vec::new).extend(entity),
            _ => {}
        }
    }
    inline
}

fn collect_properties(children: Vec<Closed>) -> Vec<(String, PropertyValue)> {
    children
        .into_iter()
        .filter_map(|c| match c {
            Closed::Data {
                name,
                value: Some(value),
            } => Some((name, value)),
            _ => None,
        })
        .collect()
}
