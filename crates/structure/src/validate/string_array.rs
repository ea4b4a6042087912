use ahash::AHashSet;
use regex::Regex;

use super::quoted;
use crate::prelude_internal::*;

/// Constraints over an optional array of strings.
///
/// Length constraints apply to the array. The `each_*` constraints apply to
/// every element and report at `/<field>/<index>`.
#[derive(Debug, Clone)]
pub struct StringArrayValidator<'v> {
    reporter: ErrorReporter,
    value: Option<&'v [String]>,
}

impl<'v> StringArrayValidator<'v> {
    pub fn new(reporter: ErrorReporter, value: Option<&'v [String]>) -> Self {
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
        if self.value.is_some_and(<[String]>::is_empty) {
            self.reporter.report_error(ErrorKind::ValueEmpty);
        }
        self
    }

    length_constraints!();

    pub fn each_not_empty(self) -> Self {
        self.each(|element, reporter| {
            if element.is_empty() {
                reporter.report_error(ErrorKind::ValueEmpty);
            }
        })
    }

    pub fn each_one_of(self, allowed: &[&str]) -> Self {
        self.each(|element, reporter| {
            if !allowed.contains(&element) {
                reporter.report_error(ErrorKind::ValueNotAllowed {
                    value: format!("{:?}", element),
                    allowed: quoted(allowed),
                });
            }
        })
    }

    pub fn each_not_one_of(self, disallowed: &[&str]) -> Self {
        self.each(|element, reporter| {
            if disallowed.contains(&element) {
                reporter.report_error(ErrorKind::ValueDisallowed {
                    value: format!("{:?}", element),
                    disallowed: quoted(disallowed),
                });
            }
        })
    }

    pub fn each_matches(self, pattern: &Regex) -> Self {
        self.each(|element, reporter| {
            if !pattern.is_match(element) {
                reporter.report_error(ErrorKind::ValueNotMatches {
                    value: element.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        })
    }

    pub fn each_not_matches(self, pattern: &Regex) -> Self {
        self.each(|element, reporter| {
            if pattern.is_match(element) {
                reporter.report_error(ErrorKind::ValueMatches {
                    value: element.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        })
    }

    /// Report `value-duplicate` at every element equal to an earlier one.
    pub fn each_unique(self) -> Self {
        let mut seen = AHashSet::new();
        self.each(|element, reporter| {
            if !seen.insert(element) {
                reporter.report_error(ErrorKind::ValueDuplicate);
            }
        })
    }

    /// Run a custom check on every element, reporting at its index.
    pub fn each_using(self, check: impl FnMut(&str, &ErrorReporter)) -> Self {
        self.each(check)
    }

    /// Run a custom check on the whole array when it is present.
    pub fn using(self, check: impl FnOnce(&[String], &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }

    fn each(self, mut check: impl FnMut(&'v str, &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            for (index, element) in value.iter().enumerate() {
                check(element.as_str(), &self.reporter.with_reference(index));
            }
        }
        self
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[String]>::len)
    }
}
