use regex::Regex;

use super::{TimeValidator, quoted};
use crate::prelude_internal::*;

/// Constraints over an optional string. Lengths count Unicode scalar values.
#[derive(Debug, Clone)]
pub struct StringValidator<'v> {
    reporter: ErrorReporter,
    value: Option<&'v str>,
}

impl<'v> StringValidator<'v> {
    pub fn new(reporter: ErrorReporter, value: Option<&'v str>) -> Self {
        Self { reporter, value }
    }

    pub fn exists(self) -> Self {
        if self.value.is_none() {
            self.reporter.report_error(ErrorKind::ValueNotExists);
        }
        self
    }

    pub fn not_exists(self) -> Self {
        if self.value.is_some() {
            self.reporter.report_error(ErrorKind::ValueExists);
        }
        self
    }

    pub fn empty(self) -> Self {
        if self.value.is_some_and(|value| !value.is_empty()) {
            self.reporter.report_error(ErrorKind::ValueNotEmpty);
        }
        self
    }

    pub fn not_empty(self) -> Self {
        if self.value.is_some_and(str::is_empty) {
            self.reporter.report_error(ErrorKind::ValueEmpty);
        }
        self
    }

    pub fn equal_to(self, expected: &str) -> Self {
        if let Some(value) = self.value
            && value != expected
        {
            self.reporter.report_error(ErrorKind::ValueNotInRange {
                value: format!("{:?}", value),
                comparison: Comparison::EqualTo(format!("{:?}", expected)),
            });
        }
        self
    }

    pub fn not_equal_to(self, unexpected: &str) -> Self {
        if let Some(value) = self.value
            && value == unexpected
        {
            self.reporter.report_error(ErrorKind::ValueNotInRange {
                value: format!("{:?}", value),
                comparison: Comparison::NotEqualTo(format!("{:?}", unexpected)),
            });
        }
        self
    }

    length_constraints!();

    pub fn one_of(self, allowed: &[&str]) -> Self {
        if let Some(value) = self.value
            && !allowed.contains(&value)
        {
            self.reporter.report_error(ErrorKind::ValueNotAllowed {
                value: format!("{:?}", value),
                allowed: quoted(allowed),
            });
        }
        self
    }

    pub fn not_one_of(self, disallowed: &[&str]) -> Self {
        if let Some(value) = self.value
            && disallowed.contains(&value)
        {
            self.reporter.report_error(ErrorKind::ValueDisallowed {
                value: format!("{:?}", value),
                disallowed: quoted(disallowed),
            });
        }
        self
    }

    pub fn matches(self, pattern: &Regex) -> Self {
        if let Some(value) = self.value
            && !pattern.is_match(value)
        {
            self.reporter.report_error(ErrorKind::ValueNotMatches {
                value: value.to_string(),
                pattern: pattern.as_str().to_string(),
            });
        }
        self
    }

    pub fn not_matches(self, pattern: &Regex) -> Self {
        if let Some(value) = self.value
            && pattern.is_match(value)
        {
            self.reporter.report_error(ErrorKind::ValueMatches {
                value: value.to_string(),
                pattern: pattern.as_str().to_string(),
            });
        }
        self
    }

    /// Run a custom check when the value is present.
    pub fn using(self, check: impl FnOnce(&str, &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }

    /// Continue with time constraints on the string read with `layout`.
    ///
    /// A string that does not parse reports `value-not-valid` and the returned
    /// validator holds no value.
    pub fn as_time(self, layout: &str) -> TimeValidator {
        let time = self.value.and_then(|value| {
            let time = crate::parse::parse_time(value, layout);
            if time.is_none() {
                self.reporter.report_error(ErrorKind::TimeNotValid {
                    value: value.to_string(),
                    layout: layout.to_string(),
                });
            }
            time
        });
        TimeValidator::new(self.reporter, time)
    }

    fn length(&self) -> Option<usize> {
        self.value.map(|value| value.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(reporter: &ErrorReporter) -> Vec<String> {
        reporter
            .error()
            .map(|errors| errors.0.iter().map(|e| e.code().to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_absent_value_skips_everything_but_exists() {
        let reporter = ErrorReporter::new();
        let pattern = Regex::new("^a").unwrap();
        StringValidator::new(reporter.clone(), None)
            .exists()
            .not_empty()
            .empty()
            .length_in_range(1, 2)
            .one_of(&["a"])
            .matches(&pattern)
            .as_time(crate::RFC3339)
            .before_now();
        assert_eq!(codes(&reporter), vec!["value-not-exists"]);
    }

    #[test]
    fn test_emptiness() {
        let reporter = ErrorReporter::new();
        StringValidator::new(reporter.clone(), Some("")).not_empty().empty();
        StringValidator::new(reporter.clone(), Some("x")).not_empty().empty();
        assert_eq!(codes(&reporter), vec!["value-empty", "value-not-empty"]);
    }

    #[test]
    fn test_length_counts_chars() {
        let reporter = ErrorReporter::new();
        StringValidator::new(reporter.clone(), Some("héllo"))
            .length_equal_to(5)
            .length_less_than(5);
        let errors = reporter.error().unwrap();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].code(), "length-out-of-range");
        assert_eq!(errors.0[0].detail(), "Length 5 is not less than 5");
    }

    #[test]
    fn test_one_of() {
        let reporter = ErrorReporter::new();
        StringValidator::new(reporter.clone(), Some("c"))
            .one_of(&["a", "b"])
            .not_one_of(&["c"]);
        let details: Vec<_> = reporter
            .error()
            .unwrap()
            .0
            .iter()
            .map(|e| e.detail())
            .collect();
        assert_eq!(
            details,
            vec![
                "Value \"c\" is not one of [\"a\", \"b\"]",
                "Value \"c\" is one of [\"c\"]",
            ]
        );
    }

    #[test]
    fn test_equality() {
        let reporter = ErrorReporter::new();
        StringValidator::new(reporter.clone(), Some("b"))
            .equal_to("a")
            .not_equal_to("b");
        let errors = reporter.error().unwrap();
        assert_eq!(errors.0[0].detail(), "Value \"b\" is not equal to \"a\"");
        assert_eq!(errors.0[1].detail(), "Value \"b\" is equal to \"b\"");
    }

    #[test]
    fn test_matches() {
        let serial = Regex::new("^[0-9]{4}$").unwrap();
        let reporter = ErrorReporter::new();
        StringValidator::new(reporter.clone(), Some("12a4"))
            .matches(&serial)
            .not_matches(&serial);
        StringValidator::new(reporter.clone(), Some("1234")).not_matches(&serial);
        assert_eq!(codes(&reporter), vec!["value-not-matches", "value-matches"]);
    }

    #[test]
    fn test_as_time() {
        let reporter = ErrorReporter::new();
        StringValidator::new(reporter.clone(), Some("2015-01-01T00:00:00Z"))
            .as_time(crate::RFC3339)
            .before_now();
        assert!(!reporter.has_error());

        StringValidator::new(reporter.clone(), Some("yesterday"))
            .as_time(crate::RFC3339)
            .before_now();
        assert_eq!(codes(&reporter), vec!["value-not-valid"]);
    }
}
