//! Error model for decoding.
//!
//! This module provides the located failure types ([`Failure`], [`Cause`],
//! [`Errors`]), the error-builder capability traits that readers and
//! validators require, and a standard error vocabulary.

mod builders;
mod failure;
mod standard;

pub use builders::{
    AdditionalItemsErrorBuilder, AdditionalPropertiesErrorBuilder, ErrorBuilder,
    InvalidTypeErrorBuilder, ItemsErrorBuilder, LengthErrorBuilder, PathMissingErrorBuilder,
    PatternErrorBuilder, PropertiesErrorBuilder, RangeErrorBuilder, ValueCastErrorBuilder,
};
pub use failure::{Cause, Errors, Failure};
pub use standard::{StandardError, StandardErrors};
