//! Numeric bound validators.
//!
//! These work for any ordered, displayable type, so they apply equally to
//! integers, floats and decimal types produced by typed readers.

use std::fmt::Display;

use super::{ValidationResult, Validator};
use crate::env::ReaderEnv;
use crate::error::RangeErrorBuilder;

/// The value must be `>= min`.
pub fn minimum<T, EB, CTX>(min: T) -> Validator<T, EB, CTX>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    EB: RangeErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, value: &T| {
        if *value < min {
            ValidationResult::invalid(location.clone(), env.errors().min_value(&min, value))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The value must be `<= max`.
pub fn maximum<T, EB, CTX>(max: T) -> Validator<T, EB, CTX>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    EB: RangeErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, value: &T| {
        if *value > max {
            ValidationResult::invalid(location.clone(), env.errors().max_value(&max, value))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The value must lie in `min..=max`.
pub fn in_range<T, EB, CTX>(min: T, max: T) -> Validator<T, EB, CTX>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    EB: RangeErrorBuilder + 'static,
    CTX: 'static,
{
    minimum(min).and(maximum(max))
}
