use crate::prelude_internal::*;

/// Constraints over an optional raw object node.
#[derive(Debug, Clone)]
pub struct ObjectValidator<'v> {
    reporter: ErrorReporter,
    value: Option<&'v Map<String, Value>>,
}

impl<'v> ObjectValidator<'v> {
    pub fn new(reporter: ErrorReporter, value: Option<&'v Map<String, Value>>) -> Self {
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
        if self.value.is_some_and(Map::is_empty) {
            self.reporter.report_error(ErrorKind::ValueEmpty);
        }
        self
    }

    /// Run a custom check when the value is present. Errors reported with
    /// `reporter.with_reference(key)` land under this object.
    pub fn using(self, check: impl FnOnce(&Map<String, Value>, &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }
}
