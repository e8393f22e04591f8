//! Resolution of paths against a value tree.
//!
//! A lookup walks a [`Path`] step by step from a base [`Location`] and
//! produces a [`LookupResult`]: the value that was found, a missing path, or a
//! type mismatch anchored at the location where the walk broke.

use crate::location::Location;
use crate::path::{Path, PathElement, Paths};
use crate::value::{Value, ValueKind};

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<'a> {
    /// A value exists at `location`.
    Defined { location: Location, value: &'a Value },
    /// No value could be reached.
    Undefined(Undefined),
}

/// Why a lookup did not reach a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Undefined {
    /// The key or index does not exist. `location` is the attempted location.
    PathMissing { location: Location },
    /// A step was applied to a value of the wrong kind. `breakpoint` is the
    /// location before the failing step.
    InvalidType {
        expected: ValueKind,
        actual: ValueKind,
        breakpoint: Location,
    },
}

impl Undefined {
    /// The location a diagnostic for this outcome should be anchored at.
    pub fn location(&self) -> &Location {
        match self {
            Undefined::PathMissing { location } => location,
            Undefined::InvalidType { breakpoint, .. } => breakpoint,
        }
    }
}

impl<'a> LookupResult<'a> {
    /// Whether the lookup found a value.
    pub fn is_defined(&self) -> bool {
        matches!(self, LookupResult::Defined { .. })
    }

    /// Applies one more step.
    ///
    /// A missing path keeps extending its attempted location; a type mismatch
    /// is terminal and passes through unchanged.
    pub fn then(self, element: &PathElement) -> LookupResult<'a> {
        match self {
            LookupResult::Defined { location, value } => lookup_element(&location, value, element),
            LookupResult::Undefined(Undefined::PathMissing { location }) => {
                LookupResult::Undefined(Undefined::PathMissing {
                    location: location.append(element.clone()),
                })
            }
            invalid @ LookupResult::Undefined(Undefined::InvalidType { .. }) => invalid,
        }
    }
}

/// Resolves a single step against `value`, which lives at `location`.
pub fn lookup_element<'a>(
    location: &Location,
    value: &'a Value,
    element: &PathElement,
) -> LookupResult<'a> {
    match (element, value) {
        (PathElement::Key(key), Value::Struct(map)) => {
            let location = location.key(key.clone());
            match map.get(key) {
                Some(found) => LookupResult::Defined {
                    location,
                    value: found,
                },
                None => LookupResult::Undefined(Undefined::PathMissing { location }),
            }
        }
        (PathElement::Index(idx), Value::Array(items)) => {
            let location = location.index(*idx);
            match items.get(*idx) {
                Some(found) => LookupResult::Defined {
                    location,
                    value: found,
                },
                None => LookupResult::Undefined(Undefined::PathMissing { location }),
            }
        }
        (PathElement::Key(_), other) => LookupResult::Undefined(Undefined::InvalidType {
            expected: ValueKind::Struct,
            actual: other.kind(),
            breakpoint: location.clone(),
        }),
        (PathElement::Index(_), other) => LookupResult::Undefined(Undefined::InvalidType {
            expected: ValueKind::Array,
            actual: other.kind(),
            breakpoint: location.clone(),
        }),
    }
}

/// Resolves every step of `path`. The empty path resolves to `value` itself.
pub fn lookup_path<'a>(location: &Location, value: &'a Value, path: &Path) -> LookupResult<'a> {
    path.elements().iter().fold(
        LookupResult::Defined {
            location: location.clone(),
            value,
        },
        |result, element| result.then(element),
    )
}

/// Tries each alternative in declaration order.
///
/// Returns the first defined result, or the result of the last alternative
/// when none resolves.
pub fn lookup_paths<'a>(location: &Location, value: &'a Value, paths: &Paths) -> LookupResult<'a> {
    let mut result = lookup_path(location, value, paths.first());
    for path in paths.iter().skip(1) {
        if result.is_defined() {
            break;
        }
        result = lookup_path(location, value, path);
    }
    result
}
