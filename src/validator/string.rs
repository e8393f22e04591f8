//! String validators.
//!
//! Lengths count Unicode scalar values, not bytes.

use regex::Regex;

use super::{ValidationResult, Validator};
use crate::env::ReaderEnv;
use crate::error::{LengthErrorBuilder, PatternErrorBuilder};

/// The string must have at least `min` characters.
///
/// # Example
///
/// ```rust
/// use autopsy::validator::string::min_length;
/// use autopsy::{Location, ReaderEnv, StandardErrors, Validator};
///
/// let validator: Validator<String, StandardErrors> = min_length(5);
/// let env = ReaderEnv::new(StandardErrors);
///
/// assert!(validator.validate(&env, &(), &Location::root(), &"hello".to_string()).is_valid());
/// assert!(validator.validate(&env, &(), &Location::root(), &"hi".to_string()).is_invalid());
/// ```
pub fn min_length<EB, CTX>(min: usize) -> Validator<String, EB, CTX>
where
    EB: LengthErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, value: &String| {
        let actual = value.chars().count();
        if actual < min {
            ValidationResult::invalid(location.clone(), env.errors().min_length(min, actual))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The string must have at most `max` characters.
pub fn max_length<EB, CTX>(max: usize) -> Validator<String, EB, CTX>
where
    EB: LengthErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, value: &String| {
        let actual = value.chars().count();
        if actual > max {
            ValidationResult::invalid(location.clone(), env.errors().max_length(max, actual))
        } else {
            ValidationResult::Valid
        }
    })
}

/// The string must contain at least one non-whitespace character.
pub fn is_not_blank<EB, CTX>() -> Validator<String, EB, CTX>
where
    EB: LengthErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(|env: &ReaderEnv<EB>, _, location, value: &String| {
        if value.trim().is_empty() {
            ValidationResult::invalid(location.clone(), env.errors().is_blank())
        } else {
            ValidationResult::Valid
        }
    })
}

/// The string must match `regex`.
pub fn pattern<EB, CTX>(regex: Regex) -> Validator<String, EB, CTX>
where
    EB: PatternErrorBuilder + 'static,
    CTX: 'static,
{
    Validator::new(move |env: &ReaderEnv<EB>, _, location, value: &String| {
        if regex.is_match(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(
                location.clone(),
                env.errors().pattern(value, regex.as_str()),
            )
        }
    })
}

/// Compiles `pattern` and returns a validator for it.
///
/// Returns an error if the regex pattern is invalid.
pub fn pattern_str<EB, CTX>(pattern_text: &str) -> Result<Validator<String, EB, CTX>, regex::Error>
where
    EB: PatternErrorBuilder + 'static,
    CTX: 'static,
{
    Ok(pattern(Regex::new(pattern_text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ReaderEnv;
    use crate::error::{StandardError, StandardErrors};
    use crate::location::Location;

    fn check(
        validator: &Validator<String, StandardErrors>,
        value: &str,
    ) -> ValidationResult<StandardError> {
        validator.validate(
            &ReaderEnv::new(StandardErrors),
            &(),
            &Location::root().key("name"),
            &value.to_string(),
        )
    }

    #[test]
    fn test_min_length_counts_chars() {
        let validator = min_length(3);
        assert!(check(&validator, "日本語").is_valid());
        let failure = check(&validator, "ab").into_failure().unwrap();
        assert_eq!(
            failure.first().errors.first(),
            &StandardError::MinLength {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(failure.first().location.to_string(), "name");
    }

    #[test]
    fn test_max_length() {
        let validator = max_length(3);
        assert!(check(&validator, "abc").is_valid());
        assert!(check(&validator, "abcd").is_invalid());
    }

    #[test]
    fn test_is_not_blank() {
        let validator = is_not_blank();
        assert!(check(&validator, " a ").is_valid());
        assert!(check(&validator, "   ").is_invalid());
        assert!(check(&validator, "").is_invalid());
    }

    #[test]
    fn test_pattern() {
        let validator = pattern_str(r"^\d+$").unwrap();
        assert!(check(&validator, "12345").is_valid());
        let failure = check(&validator, "abc").into_failure().unwrap();
        assert_eq!(failure.first().errors.first().code(), "pattern");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(pattern_str::<StandardErrors, ()>("[unclosed").is_err());
    }
}
