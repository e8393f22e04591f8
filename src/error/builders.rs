//! Error-construction capabilities.
//!
//! The engine never formats error text. Instead, readers and validators ask
//! the environment's error builder for a value of the application's error
//! type through one trait per error kind. A reader that needs a capability
//! states it as a trait bound, so a missing builder is a compile error.

use std::fmt::{Debug, Display};

use crate::value::ValueKind;

/// The base capability: fixes the error type every other builder produces.
pub trait ErrorBuilder {
    type Error: Debug + Send + Sync + 'static;
}

/// Builds errors for values of the wrong kind.
pub trait InvalidTypeErrorBuilder: ErrorBuilder {
    fn invalid_type(&self, expected: &[ValueKind], actual: ValueKind) -> Self::Error;
}

/// Builds errors for required locations that are absent.
pub trait PathMissingErrorBuilder: ErrorBuilder {
    fn path_missing(&self) -> Self::Error;
}

/// Builds errors for primitives that cannot convert to the target type.
pub trait ValueCastErrorBuilder: ErrorBuilder {
    fn value_cast(&self, value: &str, target: &'static str) -> Self::Error;
}

/// Builds errors for array elements beyond a fixed prefix.
pub trait AdditionalItemsErrorBuilder: ErrorBuilder {
    fn additional_items(&self, max_items: usize, actual: usize) -> Self::Error;
}

/// Builds errors for struct keys no property declares.
pub trait AdditionalPropertiesErrorBuilder: ErrorBuilder {
    fn additional_properties(&self, key: &str) -> Self::Error;
}

/// Builds string length errors. Lengths count Unicode scalar values.
pub trait LengthErrorBuilder: ErrorBuilder {
    fn min_length(&self, expected: usize, actual: usize) -> Self::Error;
    fn max_length(&self, expected: usize, actual: usize) -> Self::Error;
    fn is_blank(&self) -> Self::Error;
}

/// Builds regex mismatch errors.
pub trait PatternErrorBuilder: ErrorBuilder {
    fn pattern(&self, value: &str, pattern: &str) -> Self::Error;
}

/// Builds numeric bound errors.
pub trait RangeErrorBuilder: ErrorBuilder {
    fn min_value(&self, expected: &dyn Display, actual: &dyn Display) -> Self::Error;
    fn max_value(&self, expected: &dyn Display, actual: &dyn Display) -> Self::Error;
}

/// Builds array-size and uniqueness errors.
pub trait ItemsErrorBuilder: ErrorBuilder {
    fn min_items(&self, expected: usize, actual: usize) -> Self::Error;
    fn max_items(&self, expected: usize, actual: usize) -> Self::Error;
    /// `first` is the index of the earlier element the duplicate repeats.
    fn unique_items(&self, first: usize) -> Self::Error;
}

/// Builds struct-size errors.
pub trait PropertiesErrorBuilder: ErrorBuilder {
    fn min_properties(&self, expected: usize, actual: usize) -> Self::Error;
    fn max_properties(&self, expected: usize, actual: usize) -> Self::Error;
    fn empty_struct(&self) -> Self::Error;
}
