use crate::prelude_internal::*;

/// Constraints over an optional `bool`.
#[derive(Debug, Clone)]
pub struct BoolValidator {
    reporter: ErrorReporter,
    value: Option<bool>,
}

impl BoolValidator {
    pub fn new(reporter: ErrorReporter, value: Option<bool>) -> Self {
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

    pub fn is_true(self) -> Self {
        if self.value == Some(false) {
            self.reporter.report_error(ErrorKind::ValueNotTrue);
        }
        self
    }

    pub fn is_false(self) -> Self {
        if self.value == Some(true) {
            self.reporter.report_error(ErrorKind::ValueNotFalse);
        }
        self
    }

    /// Run a custom check when the value is present.
    pub fn using(self, check: impl FnOnce(bool, &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }
}
