//! Entity collections and navigation properties.

use crate::object::EntityObject;

/// An ordered sequence of entities (an Atom feed).
///
/// Order is document order; duplicates are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCollection<T> {
    entities: Vec<T>,
}

impl<T> EntityCollection<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Append an entity.
    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }

    /// The entities, in document order.
    #[must_use]
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over the entities.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    /// Consume the collection, returning its entities.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.entities
    }
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for EntityCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for EntityCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// A relationship field on an entity.
///
/// A deferred navigation property only knows where its data lives; a
/// resolved one carries the entities that were inlined in the response.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationProperty<T> {
    deferred: bool,
    uri: Option<String>,
    entities: Vec<T>,
}

impl<T> NavigationProperty<T> {
    /// A deferred property pointing at `uri`.
    #[must_use]
    pub fn deferred(uri: impl Into<String>) -> Self {
        Self {
            deferred: true,
            uri: Some(uri.into()),
            entities: Vec::new(),
        }
    }

    /// A resolved property holding inlined entities.
    #[must_use]
    pub fn resolved(uri: Option<String>, entities: Vec<T>) -> Self {
        Self {
            deferred: false,
            uri,
            entities,
        }
    }

    /// Whether loading the data was deferred.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    /// Mark the property deferred or resolved.
    pub fn set_deferred(&mut self, deferred: bool) {
        self.deferred = deferred;
    }

    /// The URI where the related data can be fetched.
    #[must_use]
    pub fn deferred_uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Add a loaded entity.
    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }

    /// Number of loaded entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entities were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The loaded entity at position `n`, from the start of the list.
    #[must_use]
    pub fn get(&self, n: usize) -> Option<&T> {
        self.entities.get(n)
    }

    /// The loaded entities, in document order.
    #[must_use]
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// Iterate over the loaded entities.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }
}

impl<T> Default for NavigationProperty<T> {
    fn default() -> Self {
        Self {
            deferred: true,
            uri: None,
            entities: Vec::new(),
        }
    }
}

/// A navigation link as read from an entry, before it is bound to a field.
#[derive(Debug)]
pub struct NavigationLink {
    /// The link's `href`.
    pub href: String,
    /// Inlined entities, if the link carried `m:inline` content.
    pub inline: Option<Vec<Box<dyn EntityObject>>>,
}

impl NavigationLink {
    /// A link with no inline content.
    #[must_use]
    pub fn deferred(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            inline: None,
        }
    }
}
