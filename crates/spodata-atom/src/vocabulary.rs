//! The fixed wire vocabulary: namespaces, structural elements and attribute names.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Atom syndication namespace.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
/// OData metadata namespace (`m:`).
pub const METADATA_NS: &str = "http://schemas.microsoft.com/ado/2007/08/dataservices/metadata";
/// OData data namespace (`d:`).
pub const DATA_NS: &str = "http://schemas.microsoft.com/ado/2007/08/dataservices";
/// The reserved `xml:` namespace.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
/// Category scheme used for entity type terms.
pub const SCHEME: &str = "http://schemas.microsoft.com/ado/2007/08/dataservices/scheme";

/// Link `type` marking a feed-valued navigation property.
pub const LINK_TYPE_FEED: &str = "application/atom+xml;type=feed";
/// Link `type` marking an entry-valued navigation property.
pub const LINK_TYPE_ENTRY: &str = "application/atom+xml;type=entry";

/// Structural element kinds recognized by namespace and local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `atom:feed`
    Feed,
    /// `atom:entry`
    Entry,
    /// `atom:id`
    Id,
    /// `atom:category`
    Category,
    /// `atom:link`
    Link,
    /// `atom:content`
    Content,
    /// `m:properties`
    Properties,
    /// `m:inline`
    Inline,
}

impl ElementKind {
    /// Local element name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Entry => "entry",
            Self::Id => "id",
            Self::Category => "category",
            Self::Link => "link",
            Self::Content => "content",
            Self::Properties => "properties",
            Self::Inline => "inline",
        }
    }
}

type Table = HashMap<&'static str, HashMap<&'static str, ElementKind>>;

static VOCABULARY: Lazy<Table> = Lazy::new(|| {
    let atom = [
        ElementKind::Feed,
        ElementKind::Entry,
        ElementKind::Id,
        ElementKind::Category,
        ElementKind::Link,
        ElementKind::Content,
    ];
    let metadata = [ElementKind::Properties, ElementKind::Inline];

    let mut table = Table::new();
    table.insert(ATOM_NS, atom.into_iter().map(|k| (k.as_str(), k)).collect());
    table.insert(
        METADATA_NS,
        metadata.into_iter().map(|k| (k.as_str(), k)).collect(),
    );
    table
});

/// Look up a structural element by namespace and local name.
#[must_use]
pub fn lookup(namespace: Option<&str>, local: &str) -> Option<ElementKind> {
    VOCABULARY.get(namespace?)?.get(local).copied()
}

/// Whether a link `type` marks a navigation property.
#[must_use]
pub fn is_navigation_link_type(link_type: &str) -> bool {
    link_type == LINK_TYPE_FEED || link_type == LINK_TYPE_ENTRY
}
