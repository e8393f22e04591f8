//! Validators for already-decoded values.
//!
//! A [`Validator`] checks a value at a location and returns
//! [`ValidationResult::Valid`] or an [`ValidationResult::Invalid`] failure.
//! Validators compose with [`Validator::or`] (success-biased) and
//! [`Validator::and`] (failure-biased); the side that does not need to run is
//! never invoked.
//!
//! The submodules provide ready-made validators for strings, numbers, arrays
//! and structs.

pub mod array;
pub mod numeric;
pub mod object;
pub mod string;

use std::sync::Arc;

use stillwater::{Semigroup, Validation};

use crate::env::ReaderEnv;
use crate::error::{ErrorBuilder, Failure};
use crate::location::Location;

/// The outcome of a validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<E> {
    Valid,
    Invalid(Failure<E>),
}

impl<E> ValidationResult<E> {
    /// An invalid result with a single error at `location`.
    pub fn invalid(location: Location, error: E) -> Self {
        ValidationResult::Invalid(Failure::new(location, error))
    }

    /// Whether the value passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Whether the value failed.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationResult::Invalid(_))
    }

    /// The failure, if the value failed.
    pub fn into_failure(self) -> Option<Failure<E>> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(failure) => Some(failure),
        }
    }

    /// Converts into a stillwater `Validation` carrying `()` on success.
    pub fn into_validation(self) -> Validation<(), Failure<E>> {
        match self {
            ValidationResult::Valid => Validation::Success(()),
            ValidationResult::Invalid(failure) => Validation::Failure(failure),
        }
    }
}

impl<E> From<Option<Failure<E>>> for ValidationResult<E> {
    fn from(failure: Option<Failure<E>>) -> Self {
        match failure {
            Some(failure) => ValidationResult::Invalid(failure),
            None => ValidationResult::Valid,
        }
    }
}

type ValidateFn<T, EB, CTX> =
    dyn Fn(&ReaderEnv<EB>, &CTX, &Location, &T) -> ValidationResult<<EB as ErrorBuilder>::Error>
        + Send
        + Sync;

/// A pure check over a decoded value of type `T`.
///
/// Validators are immutable and cheap to clone; one instance can be shared
/// by many readers and threads.
///
/// # Example
///
/// ```rust
/// use autopsy::validator::string::{max_length, min_length};
/// use autopsy::{Location, ReaderEnv, StandardErrors, Validator};
///
/// let name: Validator<String, StandardErrors> = min_length(2).and(max_length(5));
/// let env = ReaderEnv::new(StandardErrors);
///
/// assert!(name.validate(&env, &(), &Location::root(), &"Bob".to_string()).is_valid());
/// assert!(name.validate(&env, &(), &Location::root(), &"B".to_string()).is_invalid());
/// ```
pub struct Validator<T, EB: ErrorBuilder, CTX = ()> {
    validate_fn: Arc<ValidateFn<T, EB, CTX>>,
}

impl<T, EB: ErrorBuilder, CTX> Clone for Validator<T, EB, CTX> {
    fn clone(&self) -> Self {
        Self {
            validate_fn: Arc::clone(&self.validate_fn),
        }
    }
}

impl<T, EB, CTX> Validator<T, EB, CTX>
where
    T: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    /// Creates a validator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ReaderEnv<EB>, &CTX, &Location, &T) -> ValidationResult<EB::Error>
            + Send
            + Sync
            + 'static,
    {
        Self {
            validate_fn: Arc::new(f),
        }
    }

    /// Creates a validator from a predicate and the error to report when the
    /// predicate rejects.
    pub fn from_predicate<P, B>(predicate: P, error: B) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        B: Fn(&EB, &T) -> EB::Error + Send + Sync + 'static,
    {
        Self::new(move |env, _, location, value| {
            if predicate(value) {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid(location.clone(), error(env.errors(), value))
            }
        })
    }

    /// Checks `value`, which lives at `location`.
    pub fn validate(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        (self.validate_fn)(env, context, location, value)
    }

    /// Valid if either side is valid.
    ///
    /// | left    | right   | result                    |
    /// |---------|---------|---------------------------|
    /// | Valid   | (not run) | Valid                   |
    /// | Invalid | Valid   | Valid                     |
    /// | Invalid | Invalid | Invalid(left + right)     |
    pub fn or(self, other: Validator<T, EB, CTX>) -> Self {
        Self::new(move |env, context, location, value| {
            match self.validate(env, context, location, value) {
                ValidationResult::Valid => ValidationResult::Valid,
                ValidationResult::Invalid(left) => {
                    match other.validate(env, context, location, value) {
                        ValidationResult::Valid => ValidationResult::Valid,
                        ValidationResult::Invalid(right) => {
                            ValidationResult::Invalid(left.combine(right))
                        }
                    }
                }
            }
        })
    }

    /// Valid if both sides are valid.
    ///
    /// | left    | right     | result         |
    /// |---------|-----------|----------------|
    /// | Invalid | (not run) | Invalid(left)  |
    /// | Valid   | any       | right          |
    pub fn and(self, other: Validator<T, EB, CTX>) -> Self {
        Self::new(move |env, context, location, value| {
            match self.validate(env, context, location, value) {
                ValidationResult::Valid => other.validate(env, context, location, value),
                invalid @ ValidationResult::Invalid(_) => invalid,
            }
        })
    }

    /// Lifts the validator to optional values; `None` is always valid.
    pub fn nullable(self) -> Validator<Option<T>, EB, CTX> {
        Validator::new(move |env, context, location, value: &Option<T>| match value {
            Some(inner) => self.validate(env, context, location, inner),
            None => ValidationResult::Valid,
        })
    }
}
