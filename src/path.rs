//! Paths used to look values up inside a value tree.
//!
//! This module provides [`PathElement`] (a single key or index step),
//! [`Path`] (an ordered sequence of steps) and [`Paths`] (one or more
//! alternative paths for a single logical property).

use std::fmt::{self, Display};

use stillwater::{NonEmptyVec, Semigroup};

/// A single step into a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// A struct member access (e.g., `user`, `email`)
    Key(String),
    /// An array element access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathElement {
    /// Creates a new key element.
    pub fn key(name: impl Into<String>) -> Self {
        PathElement::Key(name.into())
    }

    /// Creates a new index element.
    pub fn index(idx: usize) -> Self {
        PathElement::Index(idx)
    }

    /// The key name, or None for an index.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathElement::Key(key) => Some(key),
            PathElement::Index(_) => None,
        }
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(key) => write!(f, "{}", key),
            PathElement::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<String> for PathElement {
    fn from(key: String) -> Self {
        PathElement::Key(key)
    }
}

impl From<usize> for PathElement {
    fn from(idx: usize) -> Self {
        PathElement::Index(idx)
    }
}

/// Writes elements in `users[0].email` form.
pub(crate) fn write_elements<'a>(
    f: &mut fmt::Formatter<'_>,
    elements: impl IntoIterator<Item = &'a PathElement>,
) -> fmt::Result {
    for (i, element) in elements.into_iter().enumerate() {
        match element {
            PathElement::Key(name) => {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{}", name)?;
            }
            PathElement::Index(idx) => write!(f, "[{}]", idx)?,
        }
    }
    Ok(())
}

/// An ordered sequence of [`PathElement`]s.
///
/// An empty path is the identity lookup: it resolves to the value it is
/// applied to.
///
/// # Example
///
/// ```rust
/// use autopsy::Path;
///
/// let path = Path::key("users").then_index(0).then_key("email");
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates the empty (identity) path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a path with a single key element.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            elements: vec![PathElement::Key(name.into())],
        }
    }

    /// Creates a path with a single index element.
    pub fn index(idx: usize) -> Self {
        Self {
            elements: vec![PathElement::Index(idx)],
        }
    }

    /// Returns the path extended with a key element.
    pub fn then_key(mut self, name: impl Into<String>) -> Self {
        self.elements.push(PathElement::Key(name.into()));
        self
    }

    /// Returns the path extended with an index element.
    pub fn then_index(mut self, idx: usize) -> Self {
        self.elements.push(PathElement::Index(idx));
        self
    }

    /// The elements, from the root down.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The first element, or None for the empty path.
    pub fn first(&self) -> Option<&PathElement> {
        self.elements.first()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether this is the empty path, which resolves to the value itself.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, &self.elements)
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Path::key(key)
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        Path::key(key)
    }
}

impl From<PathElement> for Path {
    fn from(element: PathElement) -> Self {
        Self {
            elements: vec![element],
        }
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

/// One or more alternative [`Path`]s for a single logical property.
///
/// Alternatives are tried in declaration order; the first that resolves wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths(NonEmptyVec<Path>);

impl Paths {
    /// Creates a single-path collection.
    pub fn new(path: impl Into<Path>) -> Self {
        Self(NonEmptyVec::singleton(path.into()))
    }

    /// Returns the collection with another alternative appended.
    pub fn or(self, path: impl Into<Path>) -> Self {
        Self(self.0.combine(NonEmptyVec::singleton(path.into())))
    }

    /// The first declared alternative.
    pub fn first(&self) -> &Path {
        self.0.head()
    }

    /// Iterates the alternatives in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter()
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a `Paths` holds at least one path.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Top-level keys named by any alternative, in declaration order.
    pub fn top_level_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|path| path.first()?.as_key())
    }
}

impl Semigroup for Paths {
    fn combine(self, other: Self) -> Self {
        Paths(self.0.combine(other.0))
    }
}

impl Display for Paths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", path)?;
        }
        Ok(())
    }
}

impl From<Path> for Paths {
    fn from(path: Path) -> Self {
        Paths::new(path)
    }
}

impl From<&str> for Paths {
    fn from(key: &str) -> Self {
        Paths::new(Path::key(key))
    }
}

impl From<String> for Paths {
    fn from(key: String) -> Self {
        Paths::new(Path::key(key))
    }
}

impl From<PathElement> for Paths {
    fn from(element: PathElement) -> Self {
        Paths::new(Path::from(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        let path = Path::empty();
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_single_key() {
        assert_eq!(Path::key("user").to_string(), "user");
    }

    #[test]
    fn test_single_index() {
        assert_eq!(Path::index(0).to_string(), "[0]");
    }

    #[test]
    fn test_complex_path() {
        let path = Path::key("users").then_index(0).then_key("email");
        assert_eq!(path.to_string(), "users[0].email");
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&PathElement::key("users")));
    }

    #[test]
    fn test_path_from_elements() {
        let path: Path = vec![PathElement::key("a"), PathElement::index(1)].into();
        assert_eq!(path, Path::key("a").then_index(1));
    }

    #[test]
    fn test_paths_alternatives_keep_order() {
        let paths = Paths::new("name").or(Path::key("profile").then_key("name"));
        let rendered: Vec<_> = paths.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["name", "profile.name"]);
        assert_eq!(paths.first(), &Path::key("name"));
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.to_string(), "name | profile.name");
    }

    #[test]
    fn test_top_level_keys() {
        let paths = Paths::new("id")
            .or(Path::key("meta").then_key("id"))
            .or(Path::index(0))
            .or(Path::empty());
        let keys: Vec<_> = paths.top_level_keys().collect();
        assert_eq!(keys, vec!["id", "meta"]);
    }

    #[test]
    fn test_paths_combine() {
        let combined = Paths::new("a").combine(Paths::new("b").or("c"));
        let rendered: Vec<_> = combined.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["a", "b", "c"]);
    }
}
