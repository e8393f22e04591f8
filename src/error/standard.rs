//! A ready-made error vocabulary.
//!
//! [`StandardErrors`] implements every builder capability and produces
//! [`StandardError`], so applications that do not need their own error type
//! can decode out of the box.

use std::fmt::Display;

use thiserror::Error;

use super::builders::{
    AdditionalItemsErrorBuilder, AdditionalPropertiesErrorBuilder, ErrorBuilder,
    InvalidTypeErrorBuilder, ItemsErrorBuilder, LengthErrorBuilder, PathMissingErrorBuilder,
    PatternErrorBuilder, PropertiesErrorBuilder, RangeErrorBuilder, ValueCastErrorBuilder,
};
use crate::value::ValueKind;

/// The error kinds produced by [`StandardErrors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandardError {
    #[error("expected {}, got {actual}", ValueKind::join(.expected))]
    InvalidType {
        expected: Vec<ValueKind>,
        actual: ValueKind,
    },

    #[error("value is missing")]
    PathMissing,

    #[error("cannot convert '{value}' to {target}")]
    ValueCast { value: String, target: &'static str },

    #[error("array must have at most {max_items} items, got {actual}")]
    AdditionalItems { max_items: usize, actual: usize },

    #[error("unknown property '{key}'")]
    AdditionalProperty { key: String },

    #[error("string must have at least {expected} characters, got {actual}")]
    MinLength { expected: usize, actual: usize },

    #[error("string must have at most {expected} characters, got {actual}")]
    MaxLength { expected: usize, actual: usize },

    #[error("string must not be blank")]
    Blank,

    #[error("'{value}' does not match pattern '{pattern}'")]
    Pattern { value: String, pattern: String },

    #[error("value must be >= {expected}, got {actual}")]
    MinValue { expected: String, actual: String },

    #[error("value must be <= {expected}, got {actual}")]
    MaxValue { expected: String, actual: String },

    #[error("array must have at least {expected} items, got {actual}")]
    MinItems { expected: usize, actual: usize },

    #[error("array must have at most {expected} items, got {actual}")]
    MaxItems { expected: usize, actual: usize },

    #[error("duplicate of item at index {first}")]
    UniqueItems { first: usize },

    #[error("object must have at least {expected} properties, got {actual}")]
    MinProperties { expected: usize, actual: usize },

    #[error("object must have at most {expected} properties, got {actual}")]
    MaxProperties { expected: usize, actual: usize },

    #[error("object must not be empty")]
    EmptyStruct,

    #[error("{0}")]
    Custom(String),
}

impl StandardError {
    /// Machine-readable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            StandardError::InvalidType { .. } => "invalid_type",
            StandardError::PathMissing => "path_missing",
            StandardError::ValueCast { .. } => "value_cast",
            StandardError::AdditionalItems { .. } => "additional_items",
            StandardError::AdditionalProperty { .. } => "additional_property",
            StandardError::MinLength { .. } => "min_length",
            StandardError::MaxLength { .. } => "max_length",
            StandardError::Blank => "blank",
            StandardError::Pattern { .. } => "pattern",
            StandardError::MinValue { .. } => "min_value",
            StandardError::MaxValue { .. } => "max_value",
            StandardError::MinItems { .. } => "min_items",
            StandardError::MaxItems { .. } => "max_items",
            StandardError::UniqueItems { .. } => "unique_items",
            StandardError::MinProperties { .. } => "min_properties",
            StandardError::MaxProperties { .. } => "max_properties",
            StandardError::EmptyStruct => "empty_struct",
            StandardError::Custom(_) => "custom",
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        StandardError::Custom(message.into())
    }
}

/// Error builder producing [`StandardError`] for every capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardErrors;

impl ErrorBuilder for StandardErrors {
    type Error = StandardError;
}

impl InvalidTypeErrorBuilder for StandardErrors {
    fn invalid_type(&self, expected: &[ValueKind], actual: ValueKind) -> StandardError {
        StandardError::InvalidType {
            expected: expected.to_vec(),
            actual,
        }
    }
}

impl PathMissingErrorBuilder for StandardErrors {
    fn path_missing(&self) -> StandardError {
        StandardError::PathMissing
    }
}

impl ValueCastErrorBuilder for StandardErrors {
    fn value_cast(&self, value: &str, target: &'static str) -> StandardError {
        StandardError::ValueCast {
            value: value.to_string(),
            target,
        }
    }
}

impl AdditionalItemsErrorBuilder for StandardErrors {
    fn additional_items(&self, max_items: usize, actual: usize) -> StandardError {
        StandardError::AdditionalItems { max_items, actual }
    }
}

impl AdditionalPropertiesErrorBuilder for StandardErrors {
    fn additional_properties(&self, key: &str) -> StandardError {
        StandardError::AdditionalProperty {
            key: key.to_string(),
        }
    }
}

impl LengthErrorBuilder for StandardErrors {
    fn min_length(&self, expected: usize, actual: usize) -> StandardError {
        StandardError::MinLength { expected, actual }
    }

    fn max_length(&self, expected: usize, actual: usize) -> StandardError {
        StandardError::MaxLength { expected, actual }
    }

    fn is_blank(&self) -> StandardError {
        StandardError::Blank
    }
}

impl PatternErrorBuilder for StandardErrors {
    fn pattern(&self, value: &str, pattern: &str) -> StandardError {
        StandardError::Pattern {
            value: value.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

impl RangeErrorBuilder for StandardErrors {
    fn min_value(&self, expected: &dyn Display, actual: &dyn Display) -> StandardError {
        StandardError::MinValue {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    fn max_value(&self, expected: &dyn Display, actual: &dyn Display) -> StandardError {
        StandardError::MaxValue {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl ItemsErrorBuilder for StandardErrors {
    fn min_items(&self, expected: usize, actual: usize) -> StandardError {
        StandardError::MinItems { expected, actual }
    }

    fn max_items(&self, expected: usize, actual: usize) -> StandardError {
        StandardError::MaxItems { expected, actual }
    }

    fn unique_items(&self, first: usize) -> StandardError {
        StandardError::UniqueItems { first }
    }
}

impl PropertiesErrorBuilder for StandardErrors {
    fn min_properties(&self, expected: usize, actual: usize) -> StandardError {
        StandardError::MinProperties { expected, actual }
    }

    fn max_properties(&self, expected: usize, actual: usize) -> StandardError {
        StandardError::MaxProperties { expected, actual }
    }

    fn empty_struct(&self) -> StandardError {
        StandardError::EmptyStruct
    }
}

// StandardError must stay shareable across decoding threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<StandardError>();
    assert_sync::<StandardError>();
};
