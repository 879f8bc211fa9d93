//! Parse tree nodes.
//!
//! An open [`Node`] lives on the binder's stack and owns the products of its
//! already-closed children. Closing a node turns it into a [`Closed`] product
//! that is handed to its parent; nothing ever looks at siblings or ancestors.

use spodata_model::{EntityCollection, EntityObject, PropertyValue, Value};

/// An attribute as delivered by the XML reader, with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Namespace URI, or `None` for unprefixed attributes.
    pub namespace: Option<String>,
    /// Local name.
    pub local: String,
    /// Unescaped value.
    pub value: String,
}

impl XmlAttribute {
    /// Create an attribute.
    #[must_use]
    pub fn new(namespace: Option<&str>, local: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            local: local.into(),
            value: value.into(),
        }
    }
}

/// Find an attribute value by namespace and local name.
pub(crate) fn attribute<'a>(
    attributes: &'a [XmlAttribute],
    namespace: Option<&str>,
    local: &str,
) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.namespace.as_deref() == namespace && a.local == local)
        .map(|a| a.value.as_str())
}

/// Attributes of an Atom `link`.
#[derive(Debug, Clone, Default)]
pub(crate) struct LinkAttributes {
    pub(crate) rel: Option<String>,
    pub(crate) href: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) link_type: Option<String>,
}

/// What an open node is and what it has accumulated so far.
#[derive(Debug)]
pub(crate) enum NodeState {
    Document,
    Feed,
    Entry {
        etag: Option<String>,
    },
    Id {
        text: String,
    },
    Category {
        term: Option<String>,
        scheme: Option<String>,
    },
    Link(LinkAttributes),
    Inline,
    Content,
    Properties,
    Data {
        name: String,
        declared_type: Option<String>,
        is_null: bool,
        text: String,
    },
    UnrecognizedData {
        name: String,
    },
    Passthrough,
}

impl NodeState {
    /// Short label for trace output.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Feed => "feed",
            Self::Entry { .. } => "entry",
            Self::Id { .. } => "id",
            Self::Category { .. } => "category",
            Self::Link(_) => "link",
            Self::Inline => "inline",
            Self::Content => "content",
            Self::Properties => "properties",
            Self::Data { .. } => "data",
            Self::UnrecognizedData { .. } => "unrecognized data",
            Self::Passthrough => "passthrough",
        }
    }

    /// Whether data elements below this node are property values.
    pub(crate) fn is_property_context(&self) -> bool {
        matches!(self, Self::Properties | Self::Data { .. })
    }
}

/// An open element on the binder's stack.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) state: NodeState,
    /// `xml:base` in scope for this element.
    pub(crate) base: Option<String>,
    pub(crate) children: Vec<Closed>,
}

impl Node {
    pub(crate) fn new(state: NodeState, base: Option<String>) -> Self {
        Self {
            state,
            base,
            children: Vec::new(),
        }
    }

    /// Accumulate character data. Only leaf text nodes keep it.
    pub(crate) fn push_text(&mut self, chunk: &str) {
        match &mut self.state {
            NodeState::Id { text } | NodeState::Data { text, .. } => text.push_str(chunk),
            _ => {}
        }
    }
}

/// A closed link, ready to be bound onto an entity.
#[derive(Debug)]
pub(crate) struct ClosedLink {
    pub(crate) attributes: LinkAttributes,
    pub(crate) base: Option<String>,
    pub(crate) inline: Option<Vec<Box<dyn EntityObject>>>,
}

/// The product of a closed node, owned by its parent.
#[derive(Debug)]
pub(crate) enum Closed {
    Id(String),
    Category {
        term: Option<String>,
        scheme: Option<String>,
    },
    Link(ClosedLink),
    Inline(Vec<Box<dyn EntityObject>>),
    /// `None` when the entry had no category.
    Entry(Option<Box<dyn EntityObject>>),
    Feed(EntityCollection<Box<dyn EntityObject>>),
    Content(Option<Vec<(String, PropertyValue)>>),
    Properties(Vec<(String, PropertyValue)>),
    /// `value` is `None` when the element resolved to nothing.
    Data {
        name: String,
        value: Option<PropertyValue>,
    },
    Inert,
}

impl Closed {
    /// The document-level value this product represents, if any.
    pub(crate) fn into_value(self) -> Option<Value> {
        match self {
            Self::Entry(entity) => entity.map(Value::Entity),
            Self::Feed(collection) => Some(Value::Collection(collection)),
            Self::Data {
                value: Some(PropertyValue::Scalar(p)),
                ..
            } => Some(Value::Scalar(p)),
            Self::Data {
                value: Some(PropertyValue::Complex(c)),
                ..
            } => Some(Value::Complex(c)),
            _ => None,
        }
    }
}

/// Resolve `href` against an `xml:base`, leaving absolute references alone.
pub(crate) fn resolve_reference(base: Option<&str>, href: &str) -> String {
    match base {
        Some(base) if !href.contains("://") => {
            match (base.ends_with('/'), href.starts_with('/')) {
                (true, true) => format!("{base}{}", &href[1..]),
                (false, false) => format!("{base}/{href}"),
                _ => format!("{base}{href}"),
            }
        }
        _ => href.to_owned(),
    }
}
