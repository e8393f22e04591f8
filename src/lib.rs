//! # Autopsy
//!
//! A structural decoding library that reports every problem in an input
//! tree, each anchored at the exact location it was found.
//!
//! ## Overview
//!
//! Input is a [`Value`] tree (usually converted from `serde_json::Value`).
//! A [`Reader`] turns a value into a typed result; a [`Validator`] checks a
//! decoded value. Both are immutable, composable and safe to share across
//! threads. Failures are collected as [`Cause`]s, each pairing a
//! [`Location`] with the errors found there, unless fail-fast is enabled in
//! the [`ReaderEnv`].
//!
//! Error values are produced by an application-supplied error builder. Each
//! reader states the error kinds it needs as trait bounds, so a missing
//! capability is a compile error. [`StandardErrors`] covers every kind.
//!
//! ## Core Types
//!
//! - [`Value`], [`Location`], [`Path`], [`Paths`]: the data and addressing model
//! - [`ReadResult`], [`Failure`]: the outcome of a read
//! - [`Reader`], [`Validator`]: decoding and checking, with `map`, `or`, `and`
//! - [`Property`], [`StructReaderBuilder`]: struct decoding
//! - [`reader::array`]: array decoding
//!
//! ## Example
//!
//! ```rust
//! use autopsy::reader::array::items;
//! use autopsy::reader::primitive::string;
//! use autopsy::validator::string::min_length;
//! use autopsy::{Property, ReadResult, Reader, ReaderEnv, StandardError, StandardErrors, StructReaderBuilder, Value};
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Team {
//!     name: String,
//!     members: Vec<String>,
//! }
//!
//! let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
//! let name = builder.property(Property::required("name", string().validation(min_length(1))));
//! let members = builder.property(Property::required("members", items(string())));
//! let team: Reader<Team, StandardErrors> = builder.build(move |_, _, location, mut values| {
//!     match (values.take(&name), values.take(&members)) {
//!         (Some(name), Some(members)) => ReadResult::success(location.clone(), Team { name, members }),
//!         _ => ReadResult::failure(location.clone(), StandardError::custom("incomplete team")),
//!     }
//! });
//!
//! let env = ReaderEnv::new(StandardErrors);
//! let input = Value::from(json!({"name": "", "members": ["ann", 7]}));
//! let failure = team.decode(&env, &input).into_result().unwrap_err();
//!
//! let locations: Vec<String> = failure.locations().iter().map(|l| l.to_string()).collect();
//! assert_eq!(locations, vec!["name", "members[1]"]);
//! ```

pub mod batch;
pub mod env;
pub mod error;
pub mod location;
pub mod lookup;
pub mod path;
pub mod reader;
pub mod result;
pub mod validator;
pub mod value;

pub use env::{ReaderEnv, ReaderOptions};
pub use error::{
    AdditionalItemsErrorBuilder, AdditionalPropertiesErrorBuilder, Cause, ErrorBuilder, Errors,
    Failure, InvalidTypeErrorBuilder, ItemsErrorBuilder, LengthErrorBuilder,
    PathMissingErrorBuilder, PatternErrorBuilder, PropertiesErrorBuilder, RangeErrorBuilder,
    StandardError, StandardErrors, ValueCastErrorBuilder,
};
pub use location::Location;
pub use lookup::{LookupResult, Undefined};
pub use path::{Path, PathElement, Paths};
pub use reader::array::AdditionalItems;
pub use reader::object::{StructReaderBuilder, StructValidator};
pub use reader::property::{Property, PropertyKind, PropertySpec, StructProperty};
pub use reader::values::PropertyValues;
pub use reader::Reader;
pub use result::ReadResult;
pub use validator::{ValidationResult, Validator};
pub use value::{StructMap, Value, ValueKind};
