//! Readers for primitive values.

use std::any::type_name;
use std::str::FromStr;

use super::{invalid_type, Reader};
use crate::env::ReaderEnv;
use crate::error::{ErrorBuilder, InvalidTypeErrorBuilder, ValueCastErrorBuilder};
use crate::result::ReadResult;
use crate::value::{Value, ValueKind};

/// Reads a string value.
pub fn string<EB, CTX>() -> Reader<String, EB, CTX>
where
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    Reader::new(|env, _, location, value| match value {
        Value::String(s) => ReadResult::success(location.clone(), s.clone()),
        other => invalid_type(env, location, &[ValueKind::String], other.kind()),
    })
}

/// Reads a boolean value.
pub fn boolean<EB, CTX>() -> Reader<bool, EB, CTX>
where
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    Reader::new(|env, _, location, value| match value {
        Value::Bool(b) => ReadResult::success(location.clone(), *b),
        other => invalid_type(env, location, &[ValueKind::Bool], other.kind()),
    })
}

/// Reads a number as its original text, without any conversion.
pub fn number_text<EB, CTX>() -> Reader<String, EB, CTX>
where
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    Reader::new(|env, _, location, value| match value {
        Value::Number(text) => ReadResult::success(location.clone(), text.clone()),
        other => invalid_type(env, location, &[ValueKind::Number], other.kind()),
    })
}

/// Reads a number and converts it with `FromStr`.
///
/// A number that does not fit the target type (a fraction for an integer
/// type, an out-of-range magnitude) fails with a value-cast error.
///
/// # Example
///
/// ```rust
/// use autopsy::reader::primitive::number;
/// use autopsy::{Reader, ReaderEnv, StandardErrors, Value};
/// use serde_json::json;
///
/// let reader: Reader<u8, StandardErrors> = number();
/// let env = ReaderEnv::new(StandardErrors);
///
/// assert_eq!(reader.decode(&env, &Value::from(json!(200))).into_value(), Some(200));
/// assert!(reader.decode(&env, &Value::from(json!(300))).is_failure());
/// assert!(reader.decode(&env, &Value::from(json!(1.5))).is_failure());
/// ```
pub fn number<N, EB, CTX>() -> Reader<N, EB, CTX>
where
    N: FromStr + 'static,
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder + 'static,
    CTX: 'static,
{
    Reader::new(|env: &ReaderEnv<EB>, _, location, value| match value {
        Value::Number(text) => match text.parse::<N>() {
            Ok(n) => ReadResult::success(location.clone(), n),
            Err(_) => ReadResult::failure(
                location.clone(),
                env.errors().value_cast(text, type_name::<N>()),
            ),
        },
        other => invalid_type(env, location, &[ValueKind::Number], other.kind()),
    })
}

/// Reads any value as-is.
pub fn value<EB, CTX>() -> Reader<Value, EB, CTX>
where
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    Reader::new(|_, _, location, value| ReadResult::success(location.clone(), value.clone()))
}
