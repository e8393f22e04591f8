//! Decoding environment.
//!
//! This module provides [`ReaderEnv`], which every read receives: the error
//! builder the application supplies, and the [`ReaderOptions`] controlling
//! accumulation. The environment is immutable and can be shared by any
//! number of concurrent decodes.

use crate::error::ErrorBuilder;

/// Options consumed by readers and validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    /// Stop at the first failure anywhere in the tree instead of collecting
    /// every reachable failure.
    pub fail_fast: bool,
}

impl ReaderOptions {
    /// Options that stop at the first failure.
    pub fn fail_fast() -> Self {
        Self { fail_fast: true }
    }

    /// Options that collect every reachable failure. This is the default.
    pub fn accumulate() -> Self {
        Self { fail_fast: false }
    }

    /// Sets whether the first failure ends the decode.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// The environment a read runs in.
///
/// # Example
///
/// ```rust
/// use autopsy::{ReaderEnv, ReaderOptions, StandardErrors};
///
/// let env = ReaderEnv::new(StandardErrors).with_fail_fast(true);
/// assert!(env.is_fail_fast());
/// assert_eq!(env.options(), &ReaderOptions::fail_fast());
/// ```
#[derive(Debug, Clone)]
pub struct ReaderEnv<EB> {
    errors: EB,
    options: ReaderOptions,
}

impl<EB: ErrorBuilder> ReaderEnv<EB> {
    /// Creates an environment with default (accumulating) options.
    pub fn new(errors: EB) -> Self {
        Self {
            errors,
            options: ReaderOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets whether the first failure ends the decode.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.options.fail_fast = fail_fast;
        self
    }

    /// The error builder capabilities.
    pub fn errors(&self) -> &EB {
        &self.errors
    }

    /// The options in effect.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Whether the first failure ends the decode.
    pub fn is_fail_fast(&self) -> bool {
        self.options.fail_fast
    }
}
