//! Streaming node dispatcher.
//!
//! [`Binder`] consumes start-element, character-data and end-element events
//! and keeps a stack of open nodes. At each element start it decides which
//! node kind to open:
//!
//! 1. Structural elements from the fixed vocabulary (`feed`, `entry`, `id`,
//!    `category`, `link`, `content`, `m:properties`, `m:inline`).
//! 2. Data-namespace elements below a properties container or another data
//!    element are property values.
//! 3. Other data-namespace elements are property values only when their
//!    `m:type` is a primitive or registered type, or they carry `m:null`.
//!    The rest are kept as unrecognized data.
//! 4. Anything else is passed through, preserving the tree shape.
//!
//! At each element end the node is finalized by the hydrator and its
//! product handed to the parent.

use spodata_model::TypeRegistry;
use tracing::trace;

use crate::document::Document;
use crate::error::{AtomError, AtomResult};
use crate::hydrate::Hydrator;
use crate::node::{
    Closed, LinkAttributes, Node, NodeState, XmlAttribute, attribute, resolve_reference,
};
use crate::options::ParseOptions;
use crate::vocabulary::{self, DATA_NS, ElementKind, METADATA_NS, XML_NS};

/// Builds a [`Document`] from a stream of XML events.
///
/// ```
/// use spodata_atom::{Binder, ParseOptions, XmlAttribute, vocabulary::{DATA_NS, METADATA_NS}};
///
/// let registry = spodata_model::TypeRegistry::builder().build().unwrap();
/// let mut binder = Binder::new(&registry, ParseOptions::default());
/// let attrs = [XmlAttribute::new(Some(METADATA_NS), "type", "Edm.String")];
/// binder.start_element(Some(DATA_NS), "Title", &attrs).unwrap();
/// binder.characters("he");
/// binder.characters("llo");
/// binder.end_element().unwrap();
///
/// let scalar = binder.finish().unwrap().into_scalar().unwrap().unwrap();
/// assert_eq!(scalar.value.as_str(), Some("hello"));
/// ```
#[derive(Debug)]
pub struct Binder<'r> {
    hydrator: Hydrator<'r>,
    stack: Vec<Node>,
}

impl<'r> Binder<'r> {
    /// Start a new document.
    #[must_use]
    pub fn new(registry: &'r TypeRegistry, options: ParseOptions) -> Self {
        Self {
            hydrator: Hydrator::new(registry, options.policy),
            stack: vec![Node::new(NodeState::Document, None)],
        }
    }

    /// Number of open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Open an element.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::MalformedInput`] for a `category` outside an `entry`.
    pub fn start_element(
        &mut self,
        namespace: Option<&str>,
        local: &str,
        attributes: &[XmlAttribute],
    ) -> AtomResult<()> {
        let parent = self.current()?;
        let base = match attribute(attributes, Some(XML_NS), "base") {
            Some(href) => Some(resolve_reference(parent.base.as_deref(), href)),
            None => parent.base.clone(),
        };
        let state = self.classify(&parent.state, namespace, local, attributes)?;
        trace!(
            depth = self.depth(),
            namespace = namespace.unwrap_or(""),
            element = %local,
            node = state.label(),
            "start element"
        );
        self.stack.push(Node::new(state, base));
        Ok(())
    }

    /// Deliver character data to the current element.
    ///
    /// Text may arrive in any number of chunks; leaf nodes concatenate them.
    pub fn characters(&mut self, text: &str) {
        if !text.trim().is_empty() {
            trace!(depth = self.depth(), len = text.len(), "characters");
        }
        if let Some(node) = self.stack.last_mut() {
            node.push_text(text);
        }
    }

    /// Close the current element, finalizing it into its parent.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::MalformedInput`] if no element is open, or a
    /// binding error raised while hydrating the element.
    pub fn end_element(&mut self) -> AtomResult<()> {
        if self.stack.len() < 2 {
            return Err(AtomError::MalformedInput(
                "end element without a matching start".to_owned(),
            ));
        }
        let node = self.stack.pop().ok_or_else(|| {
            AtomError::MalformedInput("end element without a matching start".to_owned())
        })?;
        trace!(depth = self.depth(), node = node.state.label(), "end element");
        let closed = self.hydrator.close(node)?;
        self.current_mut()?.children.push(closed);
        Ok(())
    }

    /// Finish the document.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::MalformedInput`] if elements are still open.
    pub fn finish(mut self) -> AtomResult<Document> {
        if self.stack.len() != 1 {
            return Err(AtomError::MalformedInput(format!(
                "document ended with {} open element(s)",
                self.depth()
            )));
        }
        let root = self.current_mut()?;
        let value = std::mem::take(&mut root.children)
            .into_iter()
            .next()
            .and_then(Closed::into_value);
        Ok(Document::new(value))
    }

    fn current(&self) -> AtomResult<&Node> {
        self.stack
            .last()
            .ok_or_else(|| AtomError::MalformedInput("no open document".to_owned()))
    }

    fn current_mut(&mut self) -> AtomResult<&mut Node> {
        self.stack
            .last_mut()
            .ok_or_else(|| AtomError::MalformedInput("no open document".to_owned()))
    }

    fn classify(
        &self,
        parent: &NodeState,
        namespace: Option<&str>,
        local: &str,
        attributes: &[XmlAttribute],
    ) -> AtomResult<NodeState> {
        let text_attr = |name: &str| attribute(attributes, None, name).map(str::to_owned);

        if let Some(kind) = vocabulary::lookup(namespace, local) {
            return Ok(match kind {
                ElementKind::Feed => NodeState::Feed,
                ElementKind::Entry => NodeState::Entry {
                    etag: attribute(attributes, Some(METADATA_NS), "etag").map(str::to_owned),
                },
                ElementKind::Id => NodeState::Id {
                    text: String::new(),
                },
                ElementKind::Category => {
                    if !matches!(parent, NodeState::Entry { .. }) {
                        return Err(AtomError::MalformedInput(format!(
                            "category outside an entry (inside {})",
                            parent.label()
                        )));
                    }
                    NodeState::Category {
                        term: text_attr("term"),
                        scheme: text_attr("scheme"),
                    }
                }
                ElementKind::Link => NodeState::Link(LinkAttributes {
                    rel: text_attr("rel"),
                    href: text_attr("href"),
                    title: text_attr("title"),
                    link_type: text_attr("type"),
                }),
                ElementKind::Content => NodeState::Content,
                ElementKind::Properties => NodeState::Properties,
                ElementKind::Inline => NodeState::Inline,
            });
        }

        if namespace != Some(DATA_NS) {
            return Ok(NodeState::Passthrough);
        }

        let declared_type = attribute(attributes, Some(METADATA_NS), "type");
        let null_marker = attribute(attributes, Some(METADATA_NS), "null");
        let is_value = parent.is_property_context()
            || null_marker.is_some()
            || declared_type.is_some_and(|t| self.hydrator.registry().resolve(t).is_known());
        if !is_value {
            return Ok(NodeState::UnrecognizedData {
                name: local.to_owned(),
            });
        }
        Ok(NodeState::Data {
            name: local.to_owned(),
            declared_type: declared_type.map(str::to_owned),
            is_null: null_marker.is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            text: String::new(),
        })
    }
}
