//! Validators for raw struct values.
//!
//! These run as "before" validators of a struct reader, against the struct
//! as it appears in the input.

use std::collections::HashSet;

use super::{ValidationResult, Validator};
use crate::env::ReaderEnv;
use crate::error::{AdditionalPropertiesErrorBuilder, Failure, PropertiesErrorBuilder};
use crate::value::StructMap;

/// The struct must have at least `min` properties.
pub fn min_properties<EB, CTX>(min: usize) -> Validator<StructMap, EB, CTX>
where
    EB: PropertiesErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, map: &StructMap| {
        if map.len() < min {
            ValidationResult::invalid(location.clone(), env.errors().min_properties(min, map.len()))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The struct must have at most `max` properties.
pub fn max_properties<EB, CTX>(max: usize) -> Validator<StructMap, EB, CTX>
where
    EB: PropertiesErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, map: &StructMap| {
        if map.len() > max {
            ValidationResult::invalid(location.clone(), env.errors().max_properties(max, map.len()))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The struct must have at least one property.
pub fn is_not_empty<EB, CTX>() -> Validator<StructMap, EB, CTX>
where
    EB: PropertiesErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(|env: &ReaderEnv<EB>, _, location, map: &StructMap| {
        if map.is_empty() {
            ValidationResult::invalid(location.clone(), env.errors().empty_struct())
        } else {
            ValidationResult::Valid
        }
    })
}

/// Every key must be one of `known`.
///
/// Each unknown key is reported at its own location, in input order. With
/// fail-fast enabled only the first unknown key is reported.
///
/// # Example
///
/// ```rust
/// use autopsy::validator::object::additional_properties;
/// use autopsy::{Location, ReaderEnv, StandardErrors, Validator, Value};
/// use serde_json::json;
///
/// let validator: Validator<_, StandardErrors> = additional_properties(["name"]);
/// let value = Value::from(json!({"name": "Alice", "extra": 1}));
/// let env = ReaderEnv::new(StandardErrors);
///
/// let result = validator.validate(&env, &(), &Location::root(), value.as_struct().unwrap());
/// let failure = result.into_failure().unwrap();
/// assert_eq!(failure.first().location.to_string(), "extra");
/// ```
pub fn additional_properties<EB, CTX, I, S>(known: I) -> Validator<StructMap, EB, CTX>
where
    EB: AdditionalPropertiesErrorBuilder + 'static,
    CTX: 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let known: HashSet<String> = known.into_iter().map(Into::into).collect();
    Validator::new(move |env: &ReaderEnv<EB>, _, location, map: &StructMap| {
        let mut failures = None;
        for key in map.keys().filter(|key| !known.contains(key.as_str())) {
            let failure = Failure::new(
                location.key(key.clone()),
                env.errors().additional_properties(key),
            );
            if env.is_fail_fast() {
                return ValidationResult::Invalid(failure);
            }
            Failure::accumulate(&mut failures, failure);
        }
        ValidationResult::from(failures)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ReaderEnv;
    use crate::error::{StandardError, StandardErrors};
    use crate::location::Location;
    use crate::value::Value;
    use serde_json::json;

    fn check(
        validator: &Validator<StructMap, StandardErrors>,
        env: &ReaderEnv<StandardErrors>,
        json: serde_json::Value,
    ) -> ValidationResult<StandardError> {
        let value = Value::from(json);
        validator.validate(env, &(), &Location::root(), value.as_struct().unwrap())
    }

    #[test]
    fn test_property_counts() {
        let env = ReaderEnv::new(StandardErrors);
        let validator = min_properties(1).and(max_properties(2));
        assert!(check(&validator, &env, json!({"a": 1})).is_valid());
        assert!(check(&validator, &env, json!({})).is_invalid());
        assert!(check(&validator, &env, json!({"a": 1, "b": 2, "c": 3})).is_invalid());
    }

    #[test]
    fn test_is_not_empty() {
        let env = ReaderEnv::new(StandardErrors);
        let failure = check(&is_not_empty(), &env, json!({})).into_failure().unwrap();
        assert_eq!(failure.first().errors.first(), &StandardError::EmptyStruct);
    }

    #[test]
    fn test_additional_properties_each_key() {
        let env = ReaderEnv::new(StandardErrors);
        let validator = additional_properties(["name"]);
        let failure = check(&validator, &env, json!({"x": 1, "name": "A", "y": 2}))
            .into_failure()
            .unwrap();
        let locations: Vec<_> = failure.locations().iter().map(|l| l.to_string()).collect();
        assert_eq!(locations, vec!["x", "y"]);
    }

    #[test]
    fn test_additional_properties_fail_fast() {
        let env = ReaderEnv::new(StandardErrors).with_fail_fast(true);
        let validator = additional_properties(["name"]);
        let failure = check(&validator, &env, json!({"x": 1, "y": 2}))
            .into_failure()
            .unwrap();
        assert_eq!(failure.len(), 1);
        assert_eq!(
            failure.first().errors.first(),
            &StandardError::AdditionalProperty {
                key: "x".to_string()
            }
        );
    }
}
