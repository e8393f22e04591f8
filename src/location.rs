//! Immutable, structurally shared locations inside a value tree.
//!
//! A [`Location`] is a persistent linked list of [`PathElement`]s growing
//! from the root. Appending allocates one node that points at the previous
//! location, so sibling locations share their common prefix and cloning is
//! a reference-count bump.

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::path::{write_elements, Path, PathElement};

struct Node {
    element: PathElement,
    parent: Location,
    depth: usize,
}

/// The position of a value inside a value tree.
///
/// Equality and hashing are by element sequence, independent of how the
/// nodes were shared when the locations were built.
///
/// # Example
///
/// ```rust
/// use autopsy::Location;
///
/// let users = Location::root().key("users");
/// let first = users.index(0).key("email");
/// let second = users.index(1);
///
/// assert_eq!(first.to_string(), "users[0].email");
/// assert_eq!(second.to_string(), "users[1]");
/// assert_eq!(first, Location::root().key("users").index(0).key("email"));
/// ```
#[derive(Clone, Default)]
pub struct Location {
    node: Option<Arc<Node>>,
}

impl Location {
    /// The empty root location.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new location with `element` appended.
    pub fn append(&self, element: impl Into<PathElement>) -> Self {
        Self {
            node: Some(Arc::new(Node {
                element: element.into(),
                parent: self.clone(),
                depth: self.depth() + 1,
            })),
        }
    }

    /// Returns a new location with a key element appended.
    pub fn key(&self, name: impl Into<String>) -> Self {
        self.append(PathElement::Key(name.into()))
    }

    /// Returns a new location with an index element appended.
    pub fn index(&self, idx: usize) -> Self {
        self.append(PathElement::Index(idx))
    }

    /// Returns a new location with every element of `path` appended.
    pub fn append_path(&self, path: &Path) -> Self {
        path.elements()
            .iter()
            .fold(self.clone(), |location, element| location.append(element.clone()))
    }

    /// Whether this is the root location.
    pub fn is_root(&self) -> bool {
        self.node.is_none()
    }

    /// Number of elements from the root.
    pub fn depth(&self) -> usize {
        self.node.as_ref().map_or(0, |node| node.depth)
    }

    /// The last element, or None at the root.
    pub fn last(&self) -> Option<&PathElement> {
        self.node.as_deref().map(|node| &node.element)
    }

    /// The location without its last element, or None at the root.
    pub fn parent(&self) -> Option<&Location> {
        self.node.as_deref().map(|node| &node.parent)
    }

    /// Iterates elements from the last one back to the root.
    pub fn iter_rev(&self) -> ElementsRev<'_> {
        ElementsRev {
            current: self.node.as_deref(),
        }
    }

    /// Elements in root-first order.
    pub fn elements(&self) -> Vec<&PathElement> {
        let mut elements: Vec<_> = self.iter_rev().collect();
        elements.reverse();
        elements
    }
}

/// Tail-first iterator over the elements of a [`Location`].
pub struct ElementsRev<'a> {
    current: Option<&'a Node>,
}

impl<'a> Iterator for ElementsRev<'a> {
    type Item = &'a PathElement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.parent.node.as_deref();
        Some(&node.element)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        if self.depth() != other.depth() {
            return false;
        }

        let mut left = self.node.as_ref();
        let mut right = other.node.as_ref();
        loop {
            match (left, right) {
                (Some(l), Some(r)) => {
                    if Arc::ptr_eq(l, r) {
                        return true;
                    }
                    if l.element != r.element {
                        return false;
                    }
                    left = l.parent.node.as_ref();
                    right = r.parent.node.as_ref();
                }
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.depth().hash(state);
        for element in self.iter_rev() {
            element.hash(state);
        }
    }
}

// Unlinks the chain iteratively so dropping a deep location cannot overflow
// the stack.
impl Drop for Location {
    fn drop(&mut self) {
        let mut next = self.node.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.parent.node.take(),
                Err(_) => break,
            }
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.elements())
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::root().append_path(path)
    }
}
