//! Recursive descent over untyped trees.
//!
//! [`ObjectParser`] walks string-keyed maps and [`ArrayParser`] walks arrays.
//! Both share the same accessor contract:
//!
//! - key absent: `None`, nothing reported
//! - key present and convertible: `Some(value)`
//! - key present but not convertible: `None`, and a type error is reported at
//!   the key's location
//!
//! Every access marks the key as consumed, so [`ObjectParser::not_parsed`]
//! can report any key the target type never looked at.

pub mod array;
pub mod object;

pub use array::ArrayParser;
pub use object::ObjectParser;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::prelude_internal::*;

// =============================================================================
// Capability traits
// =============================================================================

/// A type that populates itself from a string-keyed map.
pub trait ObjectParsable {
    fn parse(&mut self, parser: &ObjectParser<'_>);
}

/// A type that populates itself from an array.
pub trait ArrayParsable {
    fn parse(&mut self, parser: &ArrayParser<'_>);
}

// =============================================================================
// Lookup
// =============================================================================

/// Outcome of reading one node. The public accessors collapse it to
/// `Option<T>`; the `Invalid` case has always been reported by then.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lookup<T> {
    Absent,
    Invalid,
    Present(T),
}

impl<T> Lookup<T> {
    /// Run `convert` over a present node. The converter reports its own
    /// errors and returns `None` when the node is not convertible.
    pub(crate) fn read<'a>(
        raw: Option<&'a Value>,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Self {
        match raw {
            None => Lookup::Absent,
            Some(raw) => match convert(raw) {
                Some(value) => Lookup::Present(value),
                None => Lookup::Invalid,
            },
        }
    }

    pub(crate) fn into_option(self) -> Option<T> {
        match self {
            Lookup::Present(value) => Some(value),
            Lookup::Absent | Lookup::Invalid => None,
        }
    }
}

// =============================================================================
// Scalar conversion
// =============================================================================

fn type_mismatch(expected: TypeName, raw: &Value) -> ErrorKind {
    ErrorKind::TypeMismatch {
        expected,
        actual: ValueKind::of(raw),
    }
}

pub(crate) fn to_bool(raw: &Value, reporter: &ErrorReporter) -> Option<bool> {
    match raw {
        Value::Bool(value) => Some(*value),
        other => {
            reporter.report_error(type_mismatch(TypeName::Bool, other));
            None
        }
    }
}

/// Integers written with a zero fraction (`3.0`) are accepted.
pub(crate) fn to_int(raw: &Value, reporter: &ErrorReporter) -> Option<i64> {
    let value = match raw {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    if value.is_none() {
        reporter.report_error(type_mismatch(TypeName::Int, raw));
    }
    value
}

pub(crate) fn to_float64(raw: &Value, reporter: &ErrorReporter) -> Option<f64> {
    match raw {
        Value::Number(number) => number.as_f64(),
        other => {
            reporter.report_error(type_mismatch(TypeName::Float64, other));
            None
        }
    }
}

pub(crate) fn to_string(raw: &Value, reporter: &ErrorReporter) -> Option<String> {
    match raw {
        Value::String(value) => Some(value.clone()),
        other => {
            reporter.report_error(type_mismatch(TypeName::String, other));
            None
        }
    }
}

/// Every non-string element is reported at its own index; any such element
/// makes the whole array invalid.
pub(crate) fn to_string_array(raw: &Value, reporter: &ErrorReporter) -> Option<Vec<String>> {
    let Value::Array(elements) = raw else {
        reporter.report_error(type_mismatch(TypeName::Array, raw));
        return None;
    };
    let mut strings = Vec::with_capacity(elements.len());
    let mut valid = true;
    for (index, element) in elements.iter().enumerate() {
        match element {
            Value::String(value) => strings.push(value.clone()),
            other => {
                reporter
                    .with_reference(index)
                    .report_error(type_mismatch(TypeName::String, other));
                valid = false;
            }
        }
    }
    valid.then_some(strings)
}

pub(crate) fn to_time(raw: &Value, layout: &str, reporter: &ErrorReporter) -> Option<DateTime<Utc>> {
    let Value::String(value) = raw else {
        reporter.report_error(type_mismatch(TypeName::Time, raw));
        return None;
    };
    let time = parse_time(value, layout);
    if time.is_none() {
        reporter.report_error(ErrorKind::TimeNotParsable {
            value: value.clone(),
            layout: layout.to_string(),
        });
    }
    time
}

pub(crate) fn to_object<'a>(raw: &'a Value, reporter: &ErrorReporter) -> Option<&'a Map<String, Value>> {
    match raw {
        Value::Object(object) => Some(object),
        other => {
            reporter.report_error(type_mismatch(TypeName::Object, other));
            None
        }
    }
}

pub(crate) fn to_array<'a>(raw: &'a Value, reporter: &ErrorReporter) -> Option<&'a Vec<Value>> {
    match raw {
        Value::Array(array) => Some(array),
        other => {
            reporter.report_error(type_mismatch(TypeName::Array, other));
            None
        }
    }
}

/// Parse `value` with a chrono strftime `layout`. Layouts without an offset
/// are read as UTC.
pub(crate) fn parse_time(value: &str, layout: &str) -> Option<DateTime<Utc>> {
    if layout == crate::RFC3339 {
        return DateTime::parse_from_rfc3339(value)
            .map(|time| time.with_timezone(&Utc))
            .ok();
    }
    DateTime::parse_from_str(value, layout)
        .map(|time| time.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, layout)
                .ok()
                .map(|time| time.and_utc())
        })
}
