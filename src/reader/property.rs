//! Property specifications for struct readers.
//!
//! A [`PropertySpec`] declares how one field of a target type is found in a
//! struct value: which [`Paths`] to look up, which reader decodes the found
//! value, and what a missing or `null` value means. The [`Property`] factory
//! builds the six policies:
//!
//! | kind                    | missing      | `null`       | found        | output      |
//! |-------------------------|--------------|--------------|--------------|-------------|
//! | `required`              | error        | read as `T`  | `T`          | `T`         |
//! | `defaultable`           | default      | default      | `T`          | `T`         |
//! | `optional`              | `None`       | read as `T`  | `Some(T)`    | `Option<T>` |
//! | `optional_with_default` | default      | read as `T`  | `T`          | `T`         |
//! | `nullable`              | error        | `None`       | `Some(T)`    | `Option<T>` |
//! | `nullable_with_default` | default      | default      | `T`          | `T`         |
//!
//! A type mismatch along the path (for example a key step into an array) is
//! always an error, anchored where the walk broke.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stillwater::Semigroup;

use super::Reader;
use crate::env::ReaderEnv;
use crate::error::{ErrorBuilder, Failure, InvalidTypeErrorBuilder, PathMissingErrorBuilder};
use crate::location::Location;
use crate::lookup::{lookup_paths, LookupResult, Undefined};
use crate::path::Paths;
use crate::result::ReadResult;
use crate::validator::Validator;
use crate::value::{Value, ValueKind};

/// The null/default policy of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Required,
    Defaultable,
    Optional,
    OptionalWithDefault,
    Nullable,
    NullableWithDefault,
}

/// A declared property producing values of type `O`.
///
/// Specs are immutable and reusable across any number of struct readers
/// and decodes.
pub struct PropertySpec<O, EB: ErrorBuilder, CTX = ()> {
    paths: Paths,
    kind: PropertyKind,
    reader: Reader<O, EB, CTX>,
}

impl<O, EB: ErrorBuilder, CTX> Clone for PropertySpec<O, EB, CTX> {
    fn clone(&self) -> Self {
        Self {
            paths: self.paths.clone(),
            kind: self.kind,
            reader: self.reader.clone(),
        }
    }
}

impl<O, EB, CTX> PropertySpec<O, EB, CTX>
where
    O: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    /// The paths looked up, in the order they are tried.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// The null/default policy.
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// The reader that resolves the paths against a struct and decodes the
    /// result. It expects the enclosing struct value, not the property value.
    pub fn reader(&self) -> &Reader<O, EB, CTX> {
        &self.reader
    }

    /// Validates the resolved value, including defaults.
    pub fn validation(self, validator: Validator<O, EB, CTX>) -> Self {
        Self {
            reader: self.reader.validation(validator),
            ..self
        }
    }

    /// Tries `other` when this property fails.
    ///
    /// The paths of both specs are declared, so both count as known keys.
    /// When both fail, both failures are reported.
    pub fn or(self, other: PropertySpec<O, EB, CTX>) -> Self {
        Self {
            paths: self.paths.combine(other.paths),
            kind: self.kind,
            reader: self.reader.or(other.reader),
        }
    }
}

impl<T, EB, CTX> PropertySpec<Option<T>, EB, CTX>
where
    T: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    /// Demotes found values the predicate rejects to `None`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            reader: self.reader.filter(predicate),
            ..self
        }
    }
}

/// Factory for [`PropertySpec`]s.
///
/// # Example
///
/// ```rust
/// use autopsy::reader::primitive::{number, string};
/// use autopsy::{Path, Paths, Property, PropertySpec, StandardErrors};
///
/// let name: PropertySpec<String, StandardErrors> = Property::required("name", string());
/// let nick: PropertySpec<Option<String>, StandardErrors> = Property::optional(
///     Paths::new("nick").or(Path::key("profile").then_key("nick")),
///     string(),
/// );
/// let retries: PropertySpec<u32, StandardErrors> = Property::defaultable("retries", number(), || 3);
/// ```
pub struct Property;

type DefaultFn<T> = Arc<dyn Fn() -> T + Send + Sync>;

impl Property {
    /// Missing is an error; the found value is read with `reader`.
    pub fn required<T, EB, CTX>(
        paths: impl Into<Paths>,
        reader: Reader<T, EB, CTX>,
    ) -> PropertySpec<T, EB, CTX>
    where
        T: 'static,
        EB: InvalidTypeErrorBuilder + PathMissingErrorBuilder + 'static,
        CTX: 'static,
    {
        let paths = paths.into();
        let lookup = paths.clone();
        let reader = Reader::new(move |env, context, location, value| {
            match lookup_paths(location, value, &lookup) {
                LookupResult::Defined { location, value } => {
                    reader.read(env, context, &location, value)
                }
                LookupResult::Undefined(undefined) => undefined_failure(env, undefined),
            }
        });
        PropertySpec {
            paths,
            kind: PropertyKind::Required,
            reader,
        }
    }

    /// Missing or `null` yields `default()`.
    pub fn defaultable<T, EB, CTX, D>(
        paths: impl Into<Paths>,
        reader: Reader<T, EB, CTX>,
        default: D,
    ) -> PropertySpec<T, EB, CTX>
    where
        T: 'static,
        EB: InvalidTypeErrorBuilder + 'static,
        CTX: 'static,
        D: Fn() -> T + Send + Sync + 'static,
    {
        with_default(paths.into(), PropertyKind::Defaultable, reader, Arc::new(default), true)
    }

    /// Missing yields `None`; a found value is read as `Some(T)`.
    pub fn optional<T, EB, CTX>(
        paths: impl Into<Paths>,
        reader: Reader<T, EB, CTX>,
    ) -> PropertySpec<Option<T>, EB, CTX>
    where
        T: 'static,
        EB: InvalidTypeErrorBuilder + 'static,
        CTX: 'static,
    {
        let paths = paths.into();
        let lookup = paths.clone();
        let reader = Reader::new(move |env, context, location, value| {
            match lookup_paths(location, value, &lookup) {
                LookupResult::Defined { location, value } => {
                    reader.read(env, context, &location, value).map(Some)
                }
                LookupResult::Undefined(Undefined::PathMissing { location }) => {
                    ReadResult::success(location, None)
                }
                LookupResult::Undefined(Undefined::InvalidType {
                    expected,
                    actual,
                    breakpoint,
                }) => type_mismatch(env, expected, actual, breakpoint),
            }
        });
        PropertySpec {
            paths,
            kind: PropertyKind::Optional,
            reader,
        }
    }

    /// Missing yields `default()`; a found value (including `null`) is read
    /// with `reader`.
    pub fn optional_with_default<T, EB, CTX, D>(
        paths: impl Into<Paths>,
        reader: Reader<T, EB, CTX>,
        default: D,
    ) -> PropertySpec<T, EB, CTX>
    where
        T: 'static,
        EB: InvalidTypeErrorBuilder + 'static,
        CTX: 'static,
        D: Fn() -> T + Send + Sync + 'static,
    {
        with_default(
            paths.into(),
            PropertyKind::OptionalWithDefault,
            reader,
            Arc::new(default),
            false,
        )
    }

    /// Missing is an error; `null` yields `None`; anything else is read as
    /// `Some(T)`.
    pub fn nullable<T, EB, CTX>(
        paths: impl Into<Paths>,
        reader: Reader<T, EB, CTX>,
    ) -> PropertySpec<Option<T>, EB, CTX>
    where
        T: 'static,
        EB: InvalidTypeErrorBuilder + PathMissingErrorBuilder + 'static,
        CTX: 'static,
    {
        let paths = paths.into();
        let lookup = paths.clone();
        let reader = Reader::new(move |env, context, location, value| {
            match lookup_paths(location, value, &lookup) {
                LookupResult::Defined {
                    location,
                    value: Value::Null,
                } => ReadResult::success(location, None),
                LookupResult::Defined { location, value } => {
                    reader.read(env, context, &location, value).map(Some)
                }
                LookupResult::Undefined(undefined) => undefined_failure(env, undefined),
            }
        });
        PropertySpec {
            paths,
            kind: PropertyKind::Nullable,
            reader,
        }
    }

    /// Missing or `null` yields `default()`.
    pub fn nullable_with_default<T, EB, CTX, D>(
        paths: impl Into<Paths>,
        reader: Reader<T, EB, CTX>,
        default: D,
    ) -> PropertySpec<T, EB, CTX>
    where
        T: 'static,
        EB: InvalidTypeErrorBuilder + 'static,
        CTX: 'static,
        D: Fn() -> T + Send + Sync + 'static,
    {
        with_default(
            paths.into(),
            PropertyKind::NullableWithDefault,
            reader,
            Arc::new(default),
            true,
        )
    }
}

fn with_default<T, EB, CTX>(
    paths: Paths,
    kind: PropertyKind,
    reader: Reader<T, EB, CTX>,
    default: DefaultFn<T>,
    null_is_default: bool,
) -> PropertySpec<T, EB, CTX>
where
    T: 'static,
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    let lookup = paths.clone();
    let reader = Reader::new(move |env, context, location, value| {
        match lookup_paths(location, value, &lookup) {
            LookupResult::Defined {
                location,
                value: Value::Null,
            } if null_is_default => ReadResult::success(location, default()),
            LookupResult::Defined { location, value } => {
                reader.read(env, context, &location, value)
            }
            LookupResult::Undefined(Undefined::PathMissing { location }) => {
                ReadResult::success(location, default())
            }
            LookupResult::Undefined(Undefined::InvalidType {
                expected,
                actual,
                breakpoint,
            }) => type_mismatch(env, expected, actual, breakpoint),
        }
    });
    PropertySpec {
        paths,
        kind,
        reader,
    }
}

fn undefined_failure<T, EB>(env: &ReaderEnv<EB>, undefined: Undefined) -> ReadResult<T, EB::Error>
where
    EB: InvalidTypeErrorBuilder + PathMissingErrorBuilder,
{
    match undefined {
        Undefined::PathMissing { location } => {
            ReadResult::failure(location, env.errors().path_missing())
        }
        Undefined::InvalidType {
            expected,
            actual,
            breakpoint,
        } => type_mismatch(env, expected, actual, breakpoint),
    }
}

fn type_mismatch<T, EB>(
    env: &ReaderEnv<EB>,
    expected: ValueKind,
    actual: ValueKind,
    breakpoint: Location,
) -> ReadResult<T, EB::Error>
where
    EB: InvalidTypeErrorBuilder,
{
    ReadResult::Failure(Failure::new(
        breakpoint,
        env.errors().invalid_type(&[expected], actual),
    ))
}

/// Identity of a property within a decode, independent of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(usize);

static NEXT_PROPERTY_ID: AtomicUsize = AtomicUsize::new(0);

impl PropertyId {
    fn next() -> Self {
        PropertyId(NEXT_PROPERTY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A property spec bound into a struct reader.
///
/// The handle is how a struct builder retrieves the decoded value from
/// [`PropertyValues`](super::values::PropertyValues). Two properties with the
/// same name are distinct handles.
pub struct StructProperty<O, EB: ErrorBuilder, CTX = ()> {
    id: PropertyId,
    spec: PropertySpec<O, EB, CTX>,
}

impl<O, EB: ErrorBuilder, CTX> Clone for StructProperty<O, EB, CTX> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            spec: self.spec.clone(),
        }
    }
}

impl<O, EB, CTX> StructProperty<O, EB, CTX>
where
    O: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    /// Binds `spec` to a fresh identity.
    pub fn new(spec: PropertySpec<O, EB, CTX>) -> Self {
        Self {
            id: PropertyId::next(),
            spec,
        }
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn spec(&self) -> &PropertySpec<O, EB, CTX> {
        &self.spec
    }

    pub fn paths(&self) -> &Paths {
        self.spec.paths()
    }
}
