use core::fmt::Display;

use crate::prelude_internal::*;

pub type IntValidator = NumberValidator<i64>;
pub type Float64Validator = NumberValidator<f64>;

/// Constraints over an optional number. Every comparison failure reports
/// `value-not-in-range` with the violated bound in its detail.
#[derive(Debug, Clone)]
pub struct NumberValidator<T> {
    reporter: ErrorReporter,
    value: Option<T>,
}

impl<T> NumberValidator<T>
where
    T: Copy + PartialOrd + Display,
{
    pub fn new(reporter: ErrorReporter, value: Option<T>) -> Self {
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

    pub fn equal_to(self, limit: T) -> Self {
        self.compare(|value| value == limit, || Comparison::EqualTo(limit.to_string()))
    }

    pub fn not_equal_to(self, limit: T) -> Self {
        self.compare(|value| value != limit, || Comparison::NotEqualTo(limit.to_string()))
    }

    pub fn less_than(self, limit: T) -> Self {
        self.compare(|value| value < limit, || Comparison::LessThan(limit.to_string()))
    }

    pub fn less_than_or_equal_to(self, limit: T) -> Self {
        self.compare(
            |value| value <= limit,
            || Comparison::LessThanOrEqualTo(limit.to_string()),
        )
    }

    pub fn greater_than(self, limit: T) -> Self {
        self.compare(|value| value > limit, || Comparison::GreaterThan(limit.to_string()))
    }

    pub fn greater_than_or_equal_to(self, limit: T) -> Self {
        self.compare(
            |value| value >= limit,
            || Comparison::GreaterThanOrEqualTo(limit.to_string()),
        )
    }

    /// Inclusive on both ends.
    pub fn in_range(self, lower: T, upper: T) -> Self {
        self.compare(
            |value| lower <= value && value <= upper,
            || Comparison::InRange(lower.to_string(), upper.to_string()),
        )
    }

    pub fn one_of(self, allowed: &[T]) -> Self {
        if let Some(value) = self.value
            && !allowed.contains(&value)
        {
            self.reporter.report_error(ErrorKind::ValueNotAllowed {
                value: value.to_string(),
                allowed: allowed.iter().map(ToString::to_string).collect(),
            });
        }
        self
    }

    pub fn not_one_of(self, disallowed: &[T]) -> Self {
        if let Some(value) = self.value
            && disallowed.contains(&value)
        {
            self.reporter.report_error(ErrorKind::ValueDisallowed {
                value: value.to_string(),
                disallowed: disallowed.iter().map(ToString::to_string).collect(),
            });
        }
        self
    }

    /// Run a custom check when the value is present.
    pub fn using(self, check: impl FnOnce(T, &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }

    fn compare(
        self,
        satisfied: impl FnOnce(T) -> bool,
        comparison: impl FnOnce() -> Comparison,
    ) -> Self {
        if let Some(value) = self.value
            && !satisfied(value)
        {
            self.reporter.report_error(ErrorKind::ValueNotInRange {
                value: value.to_string(),
                comparison: comparison(),
            });
        }
        self
    }
}
