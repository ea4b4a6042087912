use chrono::{DateTime, SecondsFormat, Utc};

use crate::prelude_internal::*;

/// Constraints over an optional instant. Times in error details are rendered
/// as RFC 3339 in UTC.
#[derive(Debug, Clone)]
pub struct TimeValidator {
    reporter: ErrorReporter,
    value: Option<DateTime<Utc>>,
}

fn render(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl TimeValidator {
    pub fn new(reporter: ErrorReporter, value: Option<DateTime<Utc>>) -> Self {
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

    /// Strictly after `limit`.
    pub fn after(self, limit: DateTime<Utc>) -> Self {
        if let Some(value) = &self.value
            && *value <= limit
        {
            self.reporter.report_error(ErrorKind::ValueNotAfter {
                value: render(value),
                limit: render(&limit),
            });
        }
        self
    }

    pub fn after_now(self) -> Self {
        if let Some(value) = &self.value
            && *value <= Utc::now()
        {
            self.reporter.report_error(ErrorKind::ValueNotAfterNow {
                value: render(value),
            });
        }
        self
    }

    /// Strictly before `limit`.
    pub fn before(self, limit: DateTime<Utc>) -> Self {
        if let Some(value) = &self.value
            && *value >= limit
        {
            self.reporter.report_error(ErrorKind::ValueNotBefore {
                value: render(value),
                limit: render(&limit),
            });
        }
        self
    }

    pub fn before_now(self) -> Self {
        if let Some(value) = &self.value
            && *value >= Utc::now()
        {
            self.reporter.report_error(ErrorKind::ValueNotBeforeNow {
                value: render(value),
            });
        }
        self
    }

    /// Run a custom check when the value is present.
    pub fn using(self, check: impl FnOnce(DateTime<Utc>, &ErrorReporter)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.reporter);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn details(reporter: &ErrorReporter) -> Vec<String> {
        reporter
            .error()
            .map(|errors| errors.0.iter().map(|e| e.detail()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_after_and_before() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let reporter = ErrorReporter::new();
        TimeValidator::new(reporter.clone(), Some(time))
            .after(time)
            .before(time)
            .after(time - Duration::seconds(1))
            .before(time + Duration::seconds(1));
        assert_eq!(
            details(&reporter),
            vec![
                "Value 2024-03-01T08:00:00Z is not after 2024-03-01T08:00:00Z",
                "Value 2024-03-01T08:00:00Z is not before 2024-03-01T08:00:00Z",
            ]
        );
    }

    #[test]
    fn test_relative_to_now() {
        let past = Utc::now() - Duration::days(1);
        let reporter = ErrorReporter::new();
        TimeValidator::new(reporter.clone(), Some(past))
            .before_now()
            .after_now();
        let errors = reporter.error().unwrap();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].code(), "value-not-after");
    }

    #[test]
    fn test_absent() {
        let reporter = ErrorReporter::new();
        TimeValidator::new(reporter.clone(), None)
            .after_now()
            .before_now()
            .exists();
        assert_eq!(details(&reporter), vec!["Value does not exist"]);
    }
}
