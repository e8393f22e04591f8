//! Validators for decoded arrays.

use std::collections::HashMap;
use std::hash::Hash;

use super::{ValidationResult, Validator};
use crate::env::ReaderEnv;
use crate::error::{Failure, ItemsErrorBuilder};

/// The array must have at least `min` items.
pub fn min_items<T, EB, CTX>(min: usize) -> Validator<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: ItemsErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, items: &Vec<T>| {
        if items.len() < min {
            ValidationResult::invalid(location.clone(), env.errors().min_items(min, items.len()))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The array must have at most `max` items.
pub fn max_items<T, EB, CTX>(max: usize) -> Validator<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: ItemsErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, items: &Vec<T>| {
        if items.len() > max {
            ValidationResult::invalid(location.clone(), env.errors().max_items(max, items.len()))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The array must have at least one item.
pub fn is_not_empty<T, EB, CTX>() -> Validator<Vec<T>, EB, CTX>
where
    T: 'static,
    EB: ItemsErrorBuilder + 'static,
    CTX: 'static,
{
    min_items(1)
}

/// Every item must have a distinct key.
///
/// Each repeated item is reported at its own index, pointing back at the
/// first item with the same key. With fail-fast enabled only the first
/// duplicate is reported.
///
/// # Example
///
/// ```rust
/// use autopsy::validator::array::unique_items;
/// use autopsy::{Location, ReaderEnv, StandardErrors, Validator};
///
/// let validator: Validator<Vec<i64>, StandardErrors> = unique_items(|item: &i64| *item);
/// let env = ReaderEnv::new(StandardErrors);
///
/// let result = validator.validate(&env, &(), &Location::root(), &vec![1, 2, 1, 1]);
/// assert_eq!(result.into_failure().unwrap().len(), 2);
/// ```
pub fn unique_items<T, K, F, EB, CTX>(key_fn: F) -> Validator<Vec<T>, EB, CTX>
where
    T: 'static,
    K: Hash + Eq,
    F: Fn(&T) -> K + Send + Sync + 'static,
    EB: ItemsErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, items: &Vec<T>| {
        let mut seen: HashMap<K, usize> = HashMap::with_capacity(items.len());
        let mut failures = None;

        for (index, item) in items.iter().enumerate() {
            let first = *seen.entry(key_fn(item)).or_insert(index);
            if first != index {
                let failure = Failure::new(location.index(index), env.errors().unique_items(first));
                if env.is_fail_fast() {
                    return ValidationResult::Invalid(failure);
                }
                Failure::accumulate(&mut failures, failure);
            }
        }

        ValidationResult::from(failures)
    })
}
