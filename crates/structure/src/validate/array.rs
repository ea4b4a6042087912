use crate::prelude_internal::*;

/// Constraints over an optional raw array node.
#[derive(Debug, Clone)]
pub struct ArrayValidator<'v> {
    reporter: ErrorReporter,
    value: Option<&'v [Value]>,
}

impl<'v> ArrayValidator<'v> {
    pub fn new(reporter: ErrorReporter, value: Option<&'v [Value]>) -> Self {
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
        if self.value.is_some_and(<[Value]>::is_empty) {
            self.reporter.report_error(ErrorKind::ValueEmpty);
        }
        self
    }

    length_constraints!();

    pub fn using(self, check: impl FnOnce(&[Value], &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[Value]>::len)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_length_and_emptiness() {
        let reporter = ErrorReporter::new().with_reference("values");
        let values = json!([1, 2, 3]);
        let values = values.as_array().map(Vec::as_slice);
        ArrayValidator::new(reporter.clone(), values)
            .exists()
            .not_empty()
            .length_in_range(1, 2)
            .length_greater_than(2);

        let errors = reporter.error().unwrap();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].location().unwrap().pointer(), "/values");
        assert_eq!(errors.0[0].detail(), "Length 3 is not between 1 and 2");
    }

    #[test]
    fn test_empty_array() {
        let reporter = ErrorReporter::new();
        let values: Vec<Value> = Vec::new();
        ArrayValidator::new(reporter.clone(), Some(values.as_slice()))
            .not_empty()
            .empty()
            .length_equal_to(0);
        assert_eq!(reporter.error().unwrap().0[0].code(), "value-empty");
        assert_eq!(reporter.error_count(), 1);
    }

    #[test]
    fn test_every_length_constraint() {
        let reporter = ErrorReporter::new();
        let values = json!([1, 2]);
        let values = values.as_array().map(Vec::as_slice);
        ArrayValidator::new(reporter.clone(), values)
            .length_equal_to(3)
            .length_not_equal_to(2)
            .length_less_than(2)
            .length_less_than_or_equal_to(1)
            .length_greater_than(2)
            .length_greater_than_or_equal_to(3)
            .length_in_range(0, 2);
        ArrayValidator::new(reporter.clone(), None)
            .length_equal_to(3)
            .length_in_range(5, 6);

        let details: Vec<_> = reporter
            .error()
            .unwrap()
            .0
            .iter()
            .map(|e| e.detail().to_string())
            .collect();
        assert_eq!(details.len(), 6);
        assert!(details.iter().all(|detail| detail.starts_with("Length 2 ")));
    }
}
