//! Readers: decoding a value tree into typed values.
//!
//! A [`Reader`] is a pure function from an environment, a caller context, a
//! location and a [`Value`] to a [`ReadResult`]. Readers are immutable once
//! built, so a single reader can decode any number of trees concurrently.
//!
//! The submodules provide primitive readers, the array pipeline and the
//! struct pipeline (property specs plus before/after validators).
//!
//! # Example
//!
//! ```rust
//! use autopsy::reader::primitive::{number, string};
//! use autopsy::{Reader, ReaderEnv, StandardErrors, Value};
//! use serde_json::json;
//!
//! let id: Reader<String, StandardErrors> =
//!     string().or(number::<u64, _, _>().map(|n| n.to_string()));
//! let env = ReaderEnv::new(StandardErrors);
//!
//! assert_eq!(id.decode(&env, &Value::from(json!("abc"))).into_value(), Some("abc".to_string()));
//! assert_eq!(id.decode(&env, &Value::from(json!(42))).into_value(), Some("42".to_string()));
//! assert!(id.decode(&env, &Value::from(json!(true))).is_failure());
//! ```

pub mod array;
pub mod object;
pub mod primitive;
pub mod property;
pub mod values;

use std::sync::{Arc, OnceLock};

use stillwater::Semigroup;

use crate::env::ReaderEnv;
use crate::error::{ErrorBuilder, Failure, InvalidTypeErrorBuilder};
use crate::location::Location;
use crate::result::ReadResult;
use crate::validator::{ValidationResult, Validator};
use crate::value::{Value, ValueKind};

type ReadFn<T, EB, CTX> =
    dyn Fn(&ReaderEnv<EB>, &CTX, &Location, &Value) -> ReadResult<T, <EB as ErrorBuilder>::Error>
        + Send
        + Sync;

/// Decodes a [`Value`] into a `T`.
///
/// `EB` is the error builder supplying error-construction capabilities and
/// `CTX` is an opaque caller context threaded through every read.
pub struct Reader<T, EB: ErrorBuilder, CTX = ()> {
    read_fn: Arc<ReadFn<T, EB, CTX>>,
}

impl<T, EB: ErrorBuilder, CTX> Clone for Reader<T, EB, CTX> {
    fn clone(&self) -> Self {
        Self {
            read_fn: Arc::clone(&self.read_fn),
        }
    }
}

impl<T, EB, CTX> Reader<T, EB, CTX>
where
    T: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    /// Creates a reader from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ReaderEnv<EB>, &CTX, &Location, &Value) -> ReadResult<T, EB::Error>
            + Send
            + Sync
            + 'static,
    {
        Self {
            read_fn: Arc::new(f),
        }
    }

    /// Creates a reader whose delegate is built on first use.
    ///
    /// This is how recursive structures refer to themselves: the factory is
    /// only invoked once a value actually needs decoding, and the delegate it
    /// returns is reused by every later read.
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> Reader<T, EB, CTX> + Send + Sync + 'static,
    {
        let delegate: OnceLock<Reader<T, EB, CTX>> = OnceLock::new();
        Self::new(move |env, context, location, value| {
            delegate.get_or_init(&factory).read(env, context, location, value)
        })
    }

    /// Reads `value`, which lives at `location`.
    pub fn read(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        value: &Value,
    ) -> ReadResult<T, EB::Error> {
        (self.read_fn)(env, context, location, value)
    }

    /// Transforms successful values. Failures pass through unchanged.
    pub fn map<U, F>(self, f: F) -> Reader<U, EB, CTX>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Reader::new(move |env, context, location, value| {
            self.read(env, context, location, value).map(&f)
        })
    }

    /// Continues a success with a check that may fail, such as a conversion
    /// into a domain type.
    pub fn flat_map<U, F>(self, f: F) -> Reader<U, EB, CTX>
    where
        U: 'static,
        F: Fn(&ReaderEnv<EB>, &CTX, Location, T) -> ReadResult<U, EB::Error>
            + Send
            + Sync
            + 'static,
    {
        Reader::new(move |env, context, location, value| {
            self.read(env, context, location, value)
                .flat_map(|location, decoded| f(env, context, location, decoded))
        })
    }

    /// Falls back to `other` when this reader fails.
    ///
    /// `other` reads the same location and value. If it fails too, the
    /// result carries this reader's causes followed by `other`'s.
    pub fn or(self, other: Reader<T, EB, CTX>) -> Self {
        Self::new(move |env, context, location, value| {
            self.read(env, context, location, value).recovery(|failure| {
                match other.read(env, context, location, value) {
                    success @ ReadResult::Success { .. } => success,
                    ReadResult::Failure(other_failure) => {
                        ReadResult::Failure(failure.combine(other_failure))
                    }
                }
            })
        })
    }

    /// Runs `validator` on successful values.
    ///
    /// A valid value passes through; an invalid one is replaced by the
    /// validator's failure.
    pub fn validation(self, validator: Validator<T, EB, CTX>) -> Self {
        Self::new(move |env, context, location, value| {
            match self.read(env, context, location, value) {
                ReadResult::Success {
                    location: read_location,
                    value: decoded,
                } => match validator.validate(env, context, &read_location, &decoded) {
                    ValidationResult::Valid => ReadResult::success(read_location, decoded),
                    ValidationResult::Invalid(failure) => ReadResult::Failure(failure),
                },
                failure @ ReadResult::Failure(_) => failure,
            }
        })
    }

    /// Reads `null` as `None` and anything else with this reader.
    pub fn nullable(self) -> Reader<Option<T>, EB, CTX> {
        Reader::new(move |env, context, location, value| match value {
            Value::Null => ReadResult::success(location.clone(), None),
            other => self.read(env, context, location, other).map(Some),
        })
    }
}

impl<T, EB, CTX> Reader<Option<T>, EB, CTX>
where
    T: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    /// Demotes values the predicate rejects to `None`.
    ///
    /// Filtering never fails a read; the location is kept as is.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |env, context, location, value| {
            self.read(env, context, location, value)
                .map(|decoded| decoded.filter(|inner| predicate(inner)))
        })
    }
}

impl<T, EB> Reader<T, EB, ()>
where
    T: 'static,
    EB: ErrorBuilder + 'static,
{
    /// Reads `value` from the root location with the unit context.
    pub fn decode(&self, env: &ReaderEnv<EB>, value: &Value) -> ReadResult<T, EB::Error> {
        self.read(env, &(), &Location::root(), value)
    }
}

/// Collects failures for one decode according to the fail-fast option.
pub(crate) struct Accumulator<E> {
    fail_fast: bool,
    failure: Option<Failure<E>>,
}

impl<E> Accumulator<E> {
    pub(crate) fn new<EB: ErrorBuilder<Error = E>>(env: &ReaderEnv<EB>) -> Self {
        Self {
            fail_fast: env.is_fail_fast(),
            failure: None,
        }
    }

    /// Records `failure`. In fail-fast mode it is handed straight back as
    /// the error so the caller stops.
    pub(crate) fn record(&mut self, failure: Failure<E>) -> Result<(), Failure<E>> {
        if self.fail_fast {
            return Err(failure);
        }
        Failure::accumulate(&mut self.failure, failure);
        Ok(())
    }

    /// Records the failure of `result`, if any, and returns its value.
    pub(crate) fn record_result<T>(
        &mut self,
        result: ReadResult<T, E>,
    ) -> Result<Option<T>, Failure<E>> {
        match result {
            ReadResult::Success { value, .. } => Ok(Some(value)),
            ReadResult::Failure(failure) => self.record(failure).map(|()| None),
        }
    }

    /// Everything collected so far, or `Ok` if nothing failed.
    pub(crate) fn finish(self) -> Result<(), Failure<E>> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

/// A failure reporting that `actual` is not one of `expected`.
pub(crate) fn invalid_type<T, EB: InvalidTypeErrorBuilder>(
    env: &ReaderEnv<EB>,
    location: &Location,
    expected: &[ValueKind],
    actual: ValueKind,
) -> ReadResult<T, EB::Error> {
    ReadResult::Failure(Failure::new(
        location.clone(),
        env.errors().invalid_type(expected, actual),
    ))
}
