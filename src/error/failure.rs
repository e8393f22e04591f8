//! Located failures.
//!
//! This module provides [`Errors`] (a non-empty list of errors), [`Cause`]
//! (errors anchored at a [`Location`]) and [`Failure`] (a non-empty, ordered
//! list of causes). Both collections form a semigroup: combining keeps the
//! left side's items first.

use std::fmt::{self, Display};
use std::ops::Add;

use stillwater::{NonEmptyVec, Semigroup};

use crate::location::Location;

/// A non-empty collection of errors reported at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Errors<E>(NonEmptyVec<E>);

impl<E> Errors<E> {
    /// Creates an `Errors` containing a single error.
    pub fn single(error: E) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates an `Errors` from a vec, or None if the vec is empty.
    pub fn from_vec(errors: Vec<E>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first error.
    pub fn first(&self) -> &E {
        self.0.head()
    }

    /// Iterates the errors in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.0.iter()
    }

    /// The errors as a vector, in order.
    pub fn into_vec(self) -> Vec<E> {
        self.0.into_vec()
    }
}

impl<E> Semigroup for Errors<E> {
    fn combine(self, other: Self) -> Self {
        Errors(self.0.combine(other.0))
    }
}

impl<E> Add for Errors<E> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.combine(other)
    }
}

impl<E> IntoIterator for Errors<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

/// Errors anchored at the location where they occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause<E> {
    pub location: Location,
    pub errors: Errors<E>,
}

impl<E> Cause<E> {
    /// A cause with several errors at `location`.
    pub fn new(location: Location, errors: Errors<E>) -> Self {
        Self { location, errors }
    }
}

impl<E: Display> Display for Cause<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_root() {
            write!(f, "(root): ")?;
        } else {
            write!(f, "{}: ", self.location)?;
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// A failed read or validation: one or more located causes.
///
/// # Example
///
/// ```rust
/// use autopsy::{Failure, Location, StandardError};
/// use stillwater::Semigroup;
///
/// let name = Failure::new(Location::root().key("name"), StandardError::PathMissing);
/// let age = Failure::new(Location::root().key("age"), StandardError::PathMissing);
///
/// let both = name.combine(age);
/// assert_eq!(both.len(), 2);
/// assert_eq!(both.first().location.to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<E> {
    causes: NonEmptyVec<Cause<E>>,
}

impl<E> Failure<E> {
    /// Creates a failure with a single error at `location`.
    pub fn new(location: Location, error: E) -> Self {
        Self::of(location, Errors::single(error))
    }

    /// Creates a failure with several errors at `location`.
    pub fn of(location: Location, errors: Errors<E>) -> Self {
        Self::from_cause(Cause::new(location, errors))
    }

    /// A failure made of a single cause.
    pub fn from_cause(cause: Cause<E>) -> Self {
        Self {
            causes: NonEmptyVec::singleton(cause),
        }
    }

    /// Creates a failure from a vec of causes, or None if the vec is empty.
    pub fn from_causes(causes: Vec<Cause<E>>) -> Option<Self> {
        NonEmptyVec::from_vec(causes).map(|causes| Self { causes })
    }

    /// Number of causes.
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    /// Always false; a failure holds at least one cause.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first cause.
    pub fn first(&self) -> &Cause<E> {
        self.causes.head()
    }

    /// Iterates the causes in the order they were reported.
    pub fn causes(&self) -> impl Iterator<Item = &Cause<E>> {
        self.causes.iter()
    }

    /// Locations of all causes, in order.
    pub fn locations(&self) -> Vec<&Location> {
        self.causes.iter().map(|cause| &cause.location).collect()
    }

    /// All causes anchored at `location`.
    pub fn at(&self, location: &Location) -> Vec<&Cause<E>> {
        self.causes
            .iter()
            .filter(|cause| &cause.location == location)
            .collect()
    }

    /// Every error across all causes, in order.
    pub fn errors(&self) -> impl Iterator<Item = &E> {
        self.causes.iter().flat_map(|cause| cause.errors.iter())
    }

    /// The causes as a vector, in order.
    pub fn into_causes(self) -> Vec<Cause<E>> {
        self.causes.into_vec()
    }

    /// Folds `failure` into an optional accumulator.
    pub(crate) fn accumulate(acc: &mut Option<Self>, failure: Self) {
        *acc = Some(match acc.take() {
            Some(previous) => previous.combine(failure),
            None => failure,
        });
    }
}

impl<E> Semigroup for Failure<E> {
    fn combine(self, other: Self) -> Self {
        Failure {
            causes: self.causes.combine(other.causes),
        }
    }
}

impl<E> Add for Failure<E> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.combine(other)
    }
}

impl<E: Display> Display for Failure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decoding failed with {} cause(s):", self.len())?;
        for (i, cause) in self.causes.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, cause)?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug + Display> std::error::Error for Failure<E> {}

impl<E> IntoIterator for Failure<E> {
    type Item = Cause<E>;
    type IntoIter = std::vec::IntoIter<Cause<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.causes.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(key: &str, message: &'static str) -> Failure<&'static str> {
        Failure::new(Location::root().key(key), message)
    }

    #[test]
    fn test_single_cause() {
        let f = failure("name", "missing");
        assert_eq!(f.len(), 1);
        assert!(!f.is_empty());
        assert_eq!(f.first().location.to_string(), "name");
        assert_eq!(f.first().errors.first(), &"missing");
    }

    #[test]
    fn test_combine_preserves_order() {
        let combined = failure("a", "1") + failure("b", "2") + failure("c", "3");
        let locations: Vec<_> = combined.locations().iter().map(|l| l.to_string()).collect();
        assert_eq!(locations, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_semigroup_associativity() {
        let left = failure("a", "1")
            .combine(failure("b", "2"))
            .combine(failure("c", "3"));
        let right = failure("a", "1").combine(failure("b", "2").combine(failure("c", "3")));
        assert_eq!(left, right);
    }

    #[test]
    fn test_errors_combine() {
        let errors = Errors::single("x") + Errors::single("y");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.into_vec(), vec!["x", "y"]);
    }

    #[test]
    fn test_at_location() {
        let combined = failure("a", "1") + failure("b", "2") + failure("a", "3");
        assert_eq!(combined.at(&Location::root().key("a")).len(), 2);
        assert_eq!(combined.at(&Location::root().key("b")).len(), 1);
        assert!(combined.at(&Location::root()).is_empty());
    }

    #[test]
    fn test_accumulate() {
        let mut acc = None;
        Failure::accumulate(&mut acc, failure("a", "1"));
        Failure::accumulate(&mut acc, failure("b", "2"));
        assert_eq!(acc.map(|f| f.len()), Some(2));
    }

    #[test]
    fn test_from_causes() {
        assert!(Failure::<&str>::from_causes(Vec::new()).is_none());
        let causes = failure("a", "1").into_causes();
        assert_eq!(Failure::from_causes(causes).map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_display() {
        let combined =
            Failure::new(Location::root(), "not an object") + failure("email", "invalid");
        let display = combined.to_string();
        assert!(display.contains("2 cause(s)"));
        assert!(display.contains("(root): not an object"));
        assert!(display.contains("email: invalid"));
    }
}
