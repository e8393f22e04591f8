//! The outcome of a read.

use stillwater::{Semigroup, Validation};

use crate::error::Failure;
use crate::location::Location;

/// The result of reading a value: the decoded value with the location it was
/// read from, or a [`Failure`].
///
/// A failure never carries a partial value.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult<T, E> {
    Success { location: Location, value: T },
    Failure(Failure<E>),
}

impl<T, E> ReadResult<T, E> {
    /// A success holding `value`, found at `location`.
    pub fn success(location: Location, value: T) -> Self {
        ReadResult::Success { location, value }
    }

    /// A failure with a single error at `location`.
    pub fn failure(location: Location, error: E) -> Self {
        ReadResult::Failure(Failure::new(location, error))
    }

    /// Whether the read succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ReadResult::Success { .. })
    }

    /// Whether the read failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, ReadResult::Failure(_))
    }

    /// Transforms the success value; failures pass through unchanged.
    pub fn map<U, F>(self, f: F) -> ReadResult<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ReadResult::Success { location, value } => ReadResult::Success {
                location,
                value: f(value),
            },
            ReadResult::Failure(failure) => ReadResult::Failure(failure),
        }
    }

    /// Continues a success with another read; failures pass through unchanged.
    pub fn flat_map<U, F>(self, f: F) -> ReadResult<U, E>
    where
        F: FnOnce(Location, T) -> ReadResult<U, E>,
    {
        match self {
            ReadResult::Success { location, value } => f(location, value),
            ReadResult::Failure(failure) => ReadResult::Failure(failure),
        }
    }

    /// Replaces a failure with whatever `f` returns; successes pass through.
    pub fn recovery<F>(self, f: F) -> Self
    where
        F: FnOnce(Failure<E>) -> Self,
    {
        match self {
            success @ ReadResult::Success { .. } => success,
            ReadResult::Failure(failure) => f(failure),
        }
    }

    /// Merges another failure into this result.
    ///
    /// A success becomes `other`; a failure gets `other`'s causes appended.
    pub fn with_failure(self, other: Failure<E>) -> Self {
        match self {
            ReadResult::Success { .. } => ReadResult::Failure(other),
            ReadResult::Failure(failure) => ReadResult::Failure(failure.combine(other)),
        }
    }

    /// The decoded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            ReadResult::Success { value, .. } => Some(value),
            ReadResult::Failure(_) => None,
        }
    }

    /// Where the value was found, if the read succeeded.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ReadResult::Success { location, .. } => Some(location),
            ReadResult::Failure(_) => None,
        }
    }

    /// The failure, if the read failed.
    pub fn failure_ref(&self) -> Option<&Failure<E>> {
        match self {
            ReadResult::Success { .. } => None,
            ReadResult::Failure(failure) => Some(failure),
        }
    }

    /// Consumes the result, keeping only the value.
    pub fn into_value(self) -> Option<T> {
        match self {
            ReadResult::Success { value, .. } => Some(value),
            ReadResult::Failure(_) => None,
        }
    }

    /// Converts into a `Result` so `?` can propagate the failure.
    pub fn into_result(self) -> Result<T, Failure<E>> {
        match self {
            ReadResult::Success { value, .. } => Ok(value),
            ReadResult::Failure(failure) => Err(failure),
        }
    }

    /// Converts into a stillwater `Validation` for applicative composition.
    pub fn into_validation(self) -> Validation<T, Failure<E>> {
        match self {
            ReadResult::Success { value, .. } => Validation::Success(value),
            ReadResult::Failure(failure) => Validation::Failure(failure),
        }
    }
}

impl<T, E> From<ReadResult<T, E>> for Result<T, Failure<E>> {
    fn from(result: ReadResult<T, E>) -> Self {
        result.into_result()
    }
}
