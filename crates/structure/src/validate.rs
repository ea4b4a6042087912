//! Fluent, multi-constraint validation.
//!
//! [`Validator`] hands out one builder per value kind. Every constraint method
//! on a builder evaluates independently, reports at most one error at the
//! field's location, and returns the builder so constraints chain:
//!
//! ```
//! use structure::Validator;
//!
//! let validator = Validator::new();
//! validator.int("count", None).exists().in_range(1, 10);
//! validator
//!     .string("name", Some(""))
//!     .exists()
//!     .not_empty()
//!     .length_less_than_or_equal_to(8);
//!
//! let errors = validator.error().unwrap();
//! let codes: Vec<_> = errors.0.iter().map(|e| e.code()).collect();
//! assert_eq!(codes, ["value-not-exists", "value-empty"]);
//! ```
//!
//! Constraints other than `exists`/`not_exists` are no-ops on an absent value,
//! so an optional field can carry the same chain as a required one.

/// Length constraints for a builder with a `reporter` field and a
/// `fn length(&self) -> Option<usize>`.
macro_rules! length_constraints {
    () => {
        pub fn length_equal_to(self, limit: usize) -> Self {
            self.length_is(|length| length == limit, || {
                $crate::Comparison::EqualTo(limit.to_string())
            })
        }

        pub fn length_not_equal_to(self, limit: usize) -> Self {
            self.length_is(|length| length != limit, || {
                $crate::Comparison::NotEqualTo(limit.to_string())
            })
        }

        pub fn length_less_than(self, limit: usize) -> Self {
            self.length_is(|length| length < limit, || {
                $crate::Comparison::LessThan(limit.to_string())
            })
        }

        pub fn length_less_than_or_equal_to(self, limit: usize) -> Self {
            self.length_is(|length| length <= limit, || {
                $crate::Comparison::LessThanOrEqualTo(limit.to_string())
            })
        }

        pub fn length_greater_than(self, limit: usize) -> Self {
            self.length_is(|length| length > limit, || {
                $crate::Comparison::GreaterThan(limit.to_string())
            })
        }

        pub fn length_greater_than_or_equal_to(self, limit: usize) -> Self {
            self.length_is(|length| length >= limit, || {
                $crate::Comparison::GreaterThanOrEqualTo(limit.to_string())
            })
        }

        pub fn length_in_range(self, lower: usize, upper: usize) -> Self {
            self.length_is(
                |length| lower <= length && length <= upper,
                || $crate::Comparison::InRange(lower.to_string(), upper.to_string()),
            )
        }

        fn length_is(
            self,
            satisfied: impl FnOnce(usize) -> bool,
            comparison: impl FnOnce() -> $crate::Comparison,
        ) -> Self {
            $crate::validate::check_length(&self.reporter, self.length(), satisfied, comparison);
            self
        }
    };
}

mod array;
mod boolean;
mod number;
mod object;
mod string;
mod string_array;
mod time;

pub use array::ArrayValidator;
pub use boolean::BoolValidator;
pub use number::{Float64Validator, IntValidator, NumberValidator};
pub use object::ObjectValidator;
pub use string::StringValidator;
pub use string_array::StringArrayValidator;
pub use time::TimeValidator;

use core::fmt::Display;

use chrono::{DateTime, Utc};

use crate::prelude_internal::*;

// =============================================================================
// Validatable
// =============================================================================

/// A type that checks its own fields.
pub trait Validatable {
    fn validate(&self, validator: &Validator);
}

impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self, validator: &Validator) {
        if let Some(inner) = self {
            inner.validate(validator);
        }
    }
}

impl<T: Validatable> Validatable for [T] {
    fn validate(&self, validator: &Validator) {
        for (index, element) in self.iter().enumerate() {
            element.validate(&validator.with_reference(index));
        }
    }
}

impl<T: Validatable> Validatable for Vec<T> {
    fn validate(&self, validator: &Validator) {
        self.as_slice().validate(validator);
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn validate(&self, validator: &Validator) {
        (**self).validate(validator);
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Entry point for validating one call tree.
///
/// Derived validators ([`with_reference`](Self::with_reference),
/// [`with_meta`](Self::with_meta), ...) share the root's aggregator.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    reporter: ErrorReporter,
    origin: Origin,
}

impl Validator {
    /// Root validator with a fresh aggregator, addressing by JSON Pointer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator reporting into an existing aggregator, e.g. the one a parser
    /// already used.
    pub fn with_reporter(reporter: ErrorReporter) -> Self {
        Self {
            reporter,
            origin: Origin::default(),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn with_origin(&self, origin: Origin) -> Self {
        Self {
            reporter: self.reporter.clone(),
            origin,
        }
    }

    pub fn source(&self) -> Option<&Location> {
        self.reporter.source()
    }

    pub fn with_source(&self, source: Location) -> Self {
        Self {
            reporter: self.reporter.with_source(source),
            origin: self.origin,
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.reporter.meta()
    }

    pub fn with_meta(&self, meta: impl Into<Meta>) -> Self {
        Self {
            reporter: self.reporter.with_meta(meta),
            origin: self.origin,
        }
    }

    /// Validator one level deeper, for nested objects and arrays.
    pub fn with_reference(&self, reference: impl Display) -> Self {
        Self {
            reporter: self.reporter.with_reference(reference),
            origin: self.origin,
        }
    }

    /// Run `validatable`'s checks at this validator's location.
    pub fn validate<V: Validatable + ?Sized>(&self, validatable: &V) {
        validatable.validate(self);
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn bool(&self, reference: &str, value: Option<bool>) -> BoolValidator {
        BoolValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn int(&self, reference: &str, value: Option<i64>) -> IntValidator {
        NumberValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn float64(&self, reference: &str, value: Option<f64>) -> Float64Validator {
        NumberValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn string<'v>(&self, reference: &str, value: Option<&'v str>) -> StringValidator<'v> {
        StringValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn string_array<'v>(
        &self,
        reference: &str,
        value: Option<&'v [String]>,
    ) -> StringArrayValidator<'v> {
        StringArrayValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn time(&self, reference: &str, value: Option<DateTime<Utc>>) -> TimeValidator {
        TimeValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn object<'v>(
        &self,
        reference: &str,
        value: Option<&'v Map<String, Value>>,
    ) -> ObjectValidator<'v> {
        ObjectValidator::new(self.reporter.with_reference(reference), value)
    }

    pub fn array<'v>(&self, reference: &str, value: Option<&'v [Value]>) -> ArrayValidator<'v> {
        ArrayValidator::new(self.reporter.with_reference(reference), value)
    }

    // =========================================================================
    // Error reporting
    // =========================================================================

    pub fn error_reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn report_error(&self, kind: ErrorKind) {
        self.reporter.report_error(kind);
    }

    pub fn has_error(&self) -> bool {
        self.reporter.has_error()
    }

    pub fn error(&self) -> Option<Errors> {
        self.reporter.error()
    }

    pub fn result(&self) -> Result<(), Errors> {
        self.reporter.result()
    }
}

// =============================================================================
// Shared checks
// =============================================================================

/// Length constraints shared by the string, string array and array builders.
pub(crate) fn check_length(
    reporter: &ErrorReporter,
    length: Option<usize>,
    satisfied: impl FnOnce(usize) -> bool,
    comparison: impl FnOnce() -> Comparison,
) {
    if let Some(length) = length
        && !satisfied(length)
    {
        reporter.report_error(ErrorKind::LengthOutOfRange {
            length,
            comparison: comparison(),
        });
    }
}

pub(crate) fn quoted(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| format!("{:?}", value)).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Rendition {
        url: Option<String>,
    }

    impl Validatable for Rendition {
        fn validate(&self, validator: &Validator) {
            validator.string("url", self.url.as_deref()).exists();
        }
    }

    struct Upload {
        id: Option<String>,
        renditions: Option<Vec<Rendition>>,
    }

    impl Validatable for Upload {
        fn validate(&self, validator: &Validator) {
            validator.string("id", self.id.as_deref()).exists();
            if let Some(renditions) = &self.renditions {
                validator.with_reference("renditions").validate(renditions);
            }
        }
    }

    #[test]
    fn test_nested_validation_funnels_into_root() {
        let upload = Upload {
            id: None,
            renditions: Some(vec![
                Rendition {
                    url: Some("a".to_string()),
                },
                Rendition { url: None },
            ]),
        };
        let validator = Validator::new();
        validator.validate(&upload);

        let errors = validator.result().unwrap_err();
        let located: Vec<_> = errors
            .0
            .iter()
            .map(|e| (e.location().unwrap().pointer(), e.code()))
            .collect();
        assert_eq!(
            located,
            vec![
                ("/id", "value-not-exists"),
                ("/renditions/1/url", "value-not-exists"),
            ]
        );
    }

    #[test]
    fn test_option_none_is_noop() {
        let validator = Validator::new();
        validator.validate(&Option::<Rendition>::None);
        assert!(!validator.has_error());
    }

    #[test]
    fn test_with_meta_reaches_errors() {
        let validator = Validator::new().with_meta(json!({ "type": "smbg" }));
        validator.bool("flag", None).exists();
        assert_eq!(
            validator.error().unwrap().0[0].meta(),
            Some(&json!({ "type": "smbg" }))
        );
    }

    #[test]
    fn test_origin_is_inherited() {
        let validator = Validator::new().with_origin(Origin::Internal);
        assert_eq!(validator.with_reference("a").origin(), Origin::Internal);
    }

    #[test]
    fn test_parameter_source() {
        let validator = Validator::new().with_source(Location::new_parameter());
        validator.string("mediaType", Some("")).not_empty();
        let errors = validator.error().unwrap();
        assert_eq!(errors.0[0].location().unwrap().parameter(), "mediaType");
    }

    #[test]
    fn test_shares_reporter_with_parser() {
        let input = json!({ "count": "x" });
        let parser = crate::ObjectParser::from_value(&input);
        let count = parser.int("count");

        let validator = Validator::with_reporter(parser.error_reporter().clone());
        validator.int("count", count).exists();

        let codes: Vec<_> = validator
            .error()
            .unwrap()
            .0
            .iter()
            .map(|e| e.code().to_string())
            .collect();
        assert_eq!(codes, vec!["type-not-int", "value-not-exists"]);
    }
}
