//! The struct decoding pipeline.
//!
//! A struct reader decodes a [`Value::Struct`] in four stages:
//!
//! 1. before validators run against the raw struct;
//! 2. every declared property is resolved and read, in declaration order;
//! 3. after validators run against the decoded [`PropertyValues`] and the raw
//!    struct;
//! 4. the builder turns the property values into the target type.
//!
//! With fail-fast enabled the first failure of any stage ends the decode.
//! Otherwise failures of stages 1 to 3 are collected, every stage still runs,
//! and the builder is only invoked when nothing failed.
//!
//! # Example
//!
//! ```rust
//! use autopsy::reader::primitive::{number, string};
//! use autopsy::{Property, ReadResult, Reader, ReaderEnv, StandardError, StandardErrors, StructReaderBuilder, Value};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
//! let name = builder.property(Property::required("name", string()));
//! let age = builder.property(Property::optional("age", number::<u32, _, _>()));
//! builder.deny_additional_properties();
//!
//! let reader: Reader<User, StandardErrors> = builder.build(move |_, _, location, mut values| {
//!     match (values.take(&name), values.take(&age)) {
//!         (Some(name), Some(age)) => ReadResult::success(location.clone(), User { name, age }),
//!         _ => ReadResult::failure(location.clone(), StandardError::custom("incomplete user")),
//!     }
//! });
//!
//! let env = ReaderEnv::new(StandardErrors);
//! let user = reader.decode(&env, &Value::from(json!({"name": "Alice"}))).into_value();
//! assert_eq!(user, Some(User { name: "Alice".to_string(), age: None }));
//!
//! let failure = reader
//!     .decode(&env, &Value::from(json!({"age": "x", "extra": 1})))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(failure.len(), 3);
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use super::property::{PropertySpec, StructProperty};
use super::values::PropertyValues;
use super::{invalid_type, Accumulator, Reader};
use crate::env::ReaderEnv;
use crate::error::{
    AdditionalPropertiesErrorBuilder, ErrorBuilder, Failure, InvalidTypeErrorBuilder,
};
use crate::location::Location;
use crate::path::Paths;
use crate::result::ReadResult;
use crate::validator::object::additional_properties;
use crate::validator::{ValidationResult, Validator};
use crate::value::{StructMap, Value, ValueKind};

type StructValidateFn<EB, CTX> = dyn Fn(
        &ReaderEnv<EB>,
        &CTX,
        &Location,
        &PropertyValues,
        &StructMap,
    ) -> ValidationResult<<EB as ErrorBuilder>::Error>
    + Send
    + Sync;

/// A validator spanning several properties of a struct.
///
/// After validators see the decoded property values and the raw struct. In
/// accumulate mode they also run when some properties failed, so values may
/// be absent from [`PropertyValues`].
pub struct StructValidator<EB: ErrorBuilder, CTX = ()> {
    validate_fn: Arc<StructValidateFn<EB, CTX>>,
}

impl<EB: ErrorBuilder, CTX> Clone for StructValidator<EB, CTX> {
    fn clone(&self) -> Self {
        Self {
            validate_fn: Arc::clone(&self.validate_fn),
        }
    }
}

impl<EB, CTX> StructValidator<EB, CTX>
where
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(
                &ReaderEnv<EB>,
                &CTX,
                &Location,
                &PropertyValues,
                &StructMap,
            ) -> ValidationResult<EB::Error>
            + Send
            + Sync
            + 'static,
    {
        Self {
            validate_fn: Arc::new(f),
        }
    }

    pub fn validate(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        values: &PropertyValues,
        raw: &StructMap,
    ) -> ValidationResult<EB::Error> {
        (self.validate_fn)(env, context, location, values, raw)
    }

    /// Runs `other` only when this validator passes.
    pub fn and(self, other: StructValidator<EB, CTX>) -> Self {
        Self::new(move |env, context, location, values, raw| {
            match self.validate(env, context, location, values, raw) {
                ValidationResult::Valid => other.validate(env, context, location, values, raw),
                invalid @ ValidationResult::Invalid(_) => invalid,
            }
        })
    }
}

/// A property with its output type erased, as stored by the pipeline.
trait DeclaredProperty<EB: ErrorBuilder, CTX>: Send + Sync {
    fn paths(&self) -> &Paths;

    /// Reads the property from `value` and stores the result in `values`.
    fn read_into(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        value: &Value,
        values: &mut PropertyValues,
    ) -> Result<(), Failure<EB::Error>>;
}

impl<O, EB, CTX> DeclaredProperty<EB, CTX> for StructProperty<O, EB, CTX>
where
    O: Send + 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    fn paths(&self) -> &Paths {
        StructProperty::paths(self)
    }

    fn read_into(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        value: &Value,
        values: &mut PropertyValues,
    ) -> Result<(), Failure<EB::Error>> {
        match self.spec().reader().read(env, context, location, value) {
            ReadResult::Success { value, .. } => {
                values.insert(self.id(), Box::new(value));
                Ok(())
            }
            ReadResult::Failure(failure) => Err(failure),
        }
    }
}

type KnownKeysFactory<EB, CTX> =
    Box<dyn FnOnce(Vec<String>) -> Validator<StructMap, EB, CTX> + Send + Sync>;

enum BeforeValidator<EB: ErrorBuilder, CTX> {
    Ready(Validator<StructMap, EB, CTX>),
    /// Needs the known keys of every property, which are only final at build.
    KnownKeys(KnownKeysFactory<EB, CTX>),
}

/// Declares the properties and validators of a struct reader.
pub struct StructReaderBuilder<EB: ErrorBuilder, CTX = ()> {
    properties: Vec<Box<dyn DeclaredProperty<EB, CTX>>>,
    before: Vec<BeforeValidator<EB, CTX>>,
    after: Vec<StructValidator<EB, CTX>>,
}

impl<EB, CTX> Default for StructReaderBuilder<EB, CTX>
where
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<EB, CTX> StructReaderBuilder<EB, CTX>
where
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    /// An empty builder.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Declares a property and returns the handle its value is stored under.
    pub fn property<O>(&mut self, spec: PropertySpec<O, EB, CTX>) -> StructProperty<O, EB, CTX>
    where
        O: Send + 'static,
    {
        let property = StructProperty::new(spec);
        self.add(&property);
        property
    }

    /// Declares an existing property handle.
    pub fn add<O>(&mut self, property: &StructProperty<O, EB, CTX>) -> &mut Self
    where
        O: Send + 'static,
    {
        self.properties.push(Box::new(property.clone()));
        self
    }

    /// Adds a validator run against the raw struct before any property.
    pub fn validate_before(&mut self, validator: Validator<StructMap, EB, CTX>) -> &mut Self {
        self.before.push(BeforeValidator::Ready(validator));
        self
    }

    /// Rejects keys that no declared property refers to.
    ///
    /// The known keys are the first key step of every path of every
    /// property, including properties declared after this call.
    pub fn deny_additional_properties(&mut self) -> &mut Self
    where
        EB: AdditionalPropertiesErrorBuilder,
    {
        self.before.push(BeforeValidator::KnownKeys(Box::new(
            additional_properties::<EB, CTX, Vec<String>, String>,
        )));
        self
    }

    /// Adds a validator run after all properties were read.
    pub fn validate_after(&mut self, validator: StructValidator<EB, CTX>) -> &mut Self {
        self.after.push(validator);
        self
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Finishes the reader with the function constructing the target type.
    ///
    /// `build` only runs when the before validators, all properties and the
    /// after validators succeeded.
    pub fn build<T, F>(self, build: F) -> Reader<T, EB, CTX>
    where
        T: 'static,
        F: Fn(&ReaderEnv<EB>, &CTX, &Location, PropertyValues) -> ReadResult<T, EB::Error>
            + Send
            + Sync
            + 'static,
    {
        let known_keys = self.known_keys();
        let before = self
            .before
            .into_iter()
            .map(|validator| match validator {
                BeforeValidator::Ready(validator) => validator,
                BeforeValidator::KnownKeys(factory) => factory(known_keys.clone()),
            })
            .collect();

        let pipeline = StructPipeline {
            properties: self.properties,
            before,
            after: self.after,
        };

        Reader::new(move |env, context, location, value| {
            let Value::Struct(raw) = value else {
                return invalid_type(env, location, &[ValueKind::Struct], value.kind());
            };
            match pipeline.read_values(env, context, location, value, raw) {
                Ok(values) => build(env, context, location, values),
                Err(failure) => ReadResult::Failure(failure),
            }
        })
    }

    fn known_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for property in &self.properties {
            for key in property.paths().top_level_keys() {
                if !keys.iter().any(|known| known == key) {
                    keys.push(key.to_string());
                }
            }
        }
        keys
    }
}

struct StructPipeline<EB: ErrorBuilder, CTX> {
    properties: Vec<Box<dyn DeclaredProperty<EB, CTX>>>,
    before: Vec<Validator<StructMap, EB, CTX>>,
    after: Vec<StructValidator<EB, CTX>>,
}

impl<EB, CTX> StructPipeline<EB, CTX>
where
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    fn read_values(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        value: &Value,
        raw: &StructMap,
    ) -> Result<PropertyValues, Failure<EB::Error>> {
        trace!(location = %location, properties = self.properties.len(), "decoding struct");
        let mut failures = Accumulator::new(env);

        for validator in &self.before {
            if let ValidationResult::Invalid(failure) =
                validator.validate(env, context, location, raw)
            {
                debug!(
                    location = %location,
                    causes = failure.len(),
                    "struct rejected before reading properties"
                );
                failures.record(failure)?;
            }
        }

        let mut values = PropertyValues::new();
        for property in &self.properties {
            if let Err(failure) = property.read_into(env, context, location, value, &mut values) {
                debug!(location = %location, paths = %property.paths(), "property failed");
                failures.record(failure)?;
            }
        }

        for validator in &self.after {
            if let ValidationResult::Invalid(failure) =
                validator.validate(env, context, location, &values, raw)
            {
                debug!(
                    location = %location,
                    causes = failure.len(),
                    "struct rejected after reading properties"
                );
                failures.record(failure)?;
            }
        }

        failures.finish()?;
        Ok(values)
    }
}
