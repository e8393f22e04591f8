//! Array readers.
//!
//! Three shapes are supported:
//!
//! - [`items`]: every element is read with the same reader;
//! - [`prefix_items`]: element `i` is read with the `i`-th reader, and extra
//!   elements are dropped or rejected according to [`AdditionalItems`];
//! - [`prefix_then_items`]: positional readers first, a shared reader for
//!   the rest.
//!
//! Elements are read in index order, each at its index-qualified location.
//! In accumulate mode every failing element contributes its own cause; with
//! fail-fast enabled the first failure ends the read.
//!
//! # Example
//!
//! ```rust
//! use autopsy::reader::array::{prefix_items, AdditionalItems};
//! use autopsy::reader::primitive::{number_text, string};
//! use autopsy::{Reader, ReaderEnv, StandardErrors, Value};
//! use serde_json::json;
//!
//! let pair: Reader<Vec<String>, StandardErrors> =
//!     prefix_items(vec![string(), number_text()], AdditionalItems::Error);
//! let env = ReaderEnv::new(StandardErrors);
//!
//! let decoded = pair.decode(&env, &Value::from(json!(["x", 1]))).into_value();
//! assert_eq!(decoded, Some(vec!["x".to_string(), "1".to_string()]));
//!
//! let failure = pair
//!     .decode(&env, &Value::from(json!(["x", 1, true, null])))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(failure.len(), 2);
//! assert_eq!(failure.first().location.to_string(), "[2]");
//! ```

use tracing::{debug, trace};

use super::{invalid_type, Accumulator, Reader};
use crate::env::ReaderEnv;
use crate::error::{AdditionalItemsErrorBuilder, ErrorBuilder, Failure, InvalidTypeErrorBuilder};
use crate::location::Location;
use crate::result::ReadResult;
use crate::value::{Value, ValueKind};

/// What a prefix-only array reader does with elements past the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalItems {
    /// Extra elements are dropped from the result.
    #[default]
    Ignore,
    /// Every extra element is reported as an additional item.
    Error,
}

type RejectFn<EB> = fn(&EB, usize, usize) -> <EB as ErrorBuilder>::Error;

/// How elements past the prefix are handled.
enum Rest<T, EB: ErrorBuilder, CTX> {
    Items(Reader<T, EB, CTX>),
    Ignore,
    Reject(RejectFn<EB>),
}

struct ArrayShape<T, EB: ErrorBuilder, CTX> {
    prefix: Vec<Reader<T, EB, CTX>>,
    rest: Rest<T, EB, CTX>,
}

/// Reads every element with `reader`.
pub fn items<T, EB, CTX>(reader: Reader<T, EB, CTX>) -> Reader<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    array_reader(ArrayShape {
        prefix: Vec::new(),
        rest: Rest::Items(reader),
    })
}

/// Reads element `i` with `prefix[i]`.
///
/// With [`AdditionalItems::Error`] each element past the prefix is reported
/// at its own index; with [`AdditionalItems::Ignore`] it is dropped. A
/// shorter array is fine: the result simply has fewer elements.
pub fn prefix_items<T, EB, CTX>(
    prefix: Vec<Reader<T, EB, CTX>>,
    additional: AdditionalItems,
) -> Reader<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: InvalidTypeErrorBuilder + AdditionalItemsErrorBuilder + 'static,
    CTX: 'static,
{
    let rest = match additional {
        AdditionalItems::Ignore => Rest::Ignore,
        AdditionalItems::Error => {
            Rest::Reject(<EB as AdditionalItemsErrorBuilder>::additional_items)
        }
    };
    array_reader(ArrayShape { prefix, rest })
}

/// Reads element `i` with `prefix[i]` and the remaining elements with
/// `items`.
pub fn prefix_then_items<T, EB, CTX>(
    prefix: Vec<Reader<T, EB, CTX>>,
    items: Reader<T, EB, CTX>,
) -> Reader<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    array_reader(ArrayShape {
        prefix,
        rest: Rest::Items(items),
    })
}

fn array_reader<T, EB, CTX>(shape: ArrayShape<T, EB, CTX>) -> Reader<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: InvalidTypeErrorBuilder + 'static,
    CTX: 'static,
{
    Reader::new(move |env, context, location, value| {
        let Value::Array(elements) = value else {
            return invalid_type(env, location, &[ValueKind::Array], value.kind());
        };
        match shape.read_elements(env, context, location, elements) {
            Ok(items) => ReadResult::success(location.clone(), items),
            Err(failure) => ReadResult::Failure(failure),
        }
    })
}

impl<T, EB, CTX> ArrayShape<T, EB, CTX>
where
    T: 'static,
    EB: ErrorBuilder + 'static,
    CTX: 'static,
{
    fn read_elements(
        &self,
        env: &ReaderEnv<EB>,
        context: &CTX,
        location: &Location,
        elements: &[Value],
    ) -> Result<Vec<T>, Failure<EB::Error>> {
        trace!(
            location = %location,
            len = elements.len(),
            prefix = self.prefix.len(),
            "decoding array"
        );
        let mut failures = Accumulator::new(env);
        let mut items = Vec::with_capacity(elements.len());

        for (index, element) in elements.iter().enumerate() {
            let reader = match (self.prefix.get(index), &self.rest) {
                (Some(reader), _) | (None, Rest::Items(reader)) => reader,
                (None, Rest::Ignore) => continue,
                (None, Rest::Reject(additional_items)) => {
                    debug!(location = %location, index, "additional item rejected");
                    let error = additional_items(env.errors(), self.prefix.len(), elements.len());
                    failures.record(Failure::new(location.index(index), error))?;
                    continue;
                }
            };

            let result = reader.read(env, context, &location.index(index), element);
            if result.is_failure() {
                debug!(location = %location, index, "array element failed");
            }
            if let Some(item) = failures.record_result(result)? {
                items.push(item);
            }
        }

        failures.finish()?;
        Ok(items)
    }
}
