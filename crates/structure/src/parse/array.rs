//! ArrayParser for reading arrays element by element.

use std::cell::RefCell;

use ahash::AHashSet;
use chrono::{DateTime, Utc};

use super::{ArrayParsable, Lookup, ObjectParsable, ObjectParser};
use crate::prelude_internal::*;

/// Reads typed elements from one array node, addressed by index.
///
/// Mirrors [`ObjectParser`]; errors for element `i` are located one segment
/// deeper than the array, at `/<array>/<i>`.
#[derive(Debug, Clone)]
pub struct ArrayParser<'a> {
    array: Option<&'a Vec<Value>>,
    reporter: ErrorReporter,
    origin: Origin,
    parsed: RefCell<AHashSet<usize>>,
}

impl<'a> ArrayParser<'a> {
    /// Root parser over an array, addressing by JSON Pointer.
    pub fn new(array: &'a Vec<Value>) -> Self {
        Self::with_reporter(Some(array), ErrorReporter::new())
    }

    /// Root parser over any node. A node that is not an array is reported as
    /// `type-not-array` at the root and the parser does not exist.
    pub fn from_value(value: &'a Value) -> Self {
        Self::from_value_with_reporter(value, ErrorReporter::new())
    }

    pub fn from_value_with_reporter(value: &'a Value, reporter: ErrorReporter) -> Self {
        let array = super::to_array(value, &reporter);
        Self::with_reporter(array, reporter)
    }

    pub fn with_reporter(array: Option<&'a Vec<Value>>, reporter: ErrorReporter) -> Self {
        Self {
            array,
            reporter,
            origin: Origin::default(),
            parsed: RefCell::new(AHashSet::new()),
        }
    }

    /// Same node and aggregator, different location. The derived parser
    /// starts from a copy of the consumed indices.
    pub fn with_source(&self, source: Location) -> Self {
        Self {
            reporter: self.reporter.with_source(source),
            ..self.clone()
        }
    }

    pub fn with_meta(&self, meta: impl Into<Meta>) -> Self {
        Self {
            reporter: self.reporter.with_meta(meta),
            ..self.clone()
        }
    }

    pub fn with_origin(&self, origin: Origin) -> Self {
        Self {
            origin,
            ..self.clone()
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn source(&self) -> Option<&Location> {
        self.reporter.source()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.reporter.meta()
    }

    pub fn exists(&self) -> bool {
        self.array.is_some()
    }

    /// Number of elements, zero when the array does not exist.
    pub fn len(&self) -> usize {
        self.array.map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every index of the underlying array.
    pub fn references(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    pub fn reference_exists(&self, reference: usize) -> bool {
        reference < self.len()
    }

    pub fn bool(&self, reference: usize) -> Option<bool> {
        self.read(reference, super::to_bool)
    }

    pub fn int(&self, reference: usize) -> Option<i64> {
        self.read(reference, super::to_int)
    }

    pub fn float64(&self, reference: usize) -> Option<f64> {
        self.read(reference, super::to_float64)
    }

    pub fn string(&self, reference: usize) -> Option<String> {
        self.read(reference, super::to_string)
    }

    pub fn string_array(&self, reference: usize) -> Option<Vec<String>> {
        self.read(reference, super::to_string_array)
    }

    pub fn time(&self, reference: usize, layout: &str) -> Option<DateTime<Utc>> {
        self.read(reference, |raw, reporter| super::to_time(raw, layout, reporter))
    }

    pub fn object(&self, reference: usize) -> Option<&'a Map<String, Value>> {
        self.read(reference, super::to_object)
    }

    pub fn array(&self, reference: usize) -> Option<&'a Vec<Value>> {
        self.read(reference, super::to_array)
    }

    pub fn value(&self, reference: usize) -> Option<&'a Value> {
        self.read(reference, |raw, _| Some(raw))
    }

    fn read<T>(
        &self,
        reference: usize,
        convert: impl FnOnce(&'a Value, &ErrorReporter) -> Option<T>,
    ) -> Option<T> {
        self.parsed.borrow_mut().insert(reference);
        let raw = self.array.and_then(|array| array.get(reference));
        Lookup::read(raw, |raw| convert(raw, &self.reporter.with_reference(reference)))
            .into_option()
    }

    pub fn with_reference_object_parser(&self, reference: usize) -> ObjectParser<'a> {
        let object = self.object(reference);
        ObjectParser::with_reporter(object, self.reporter.with_reference(reference))
            .with_origin(self.origin)
    }

    pub fn with_reference_array_parser(&self, reference: usize) -> ArrayParser<'a> {
        let array = self.array(reference);
        ArrayParser::with_reporter(array, self.reporter.with_reference(reference))
            .with_origin(self.origin)
    }

    pub fn with_reference_error_reporter(&self, reference: usize) -> ErrorReporter {
        self.reporter.with_reference(reference)
    }

    pub fn parse_into<T: ArrayParsable + ?Sized>(&self, target: &mut T) {
        target.parse(self);
    }

    /// Build a `T` from this array, or `None` when the array does not exist.
    pub fn parse<T: ArrayParsable + Default>(&self) -> Option<T> {
        if !self.exists() {
            return None;
        }
        let mut target = T::default();
        target.parse(self);
        Some(target)
    }

    /// Build one `T` per element; elements that are not maps yield `None`
    /// after reporting `type-not-object`.
    pub fn parse_each<T: ObjectParsable + Default>(&self) -> Vec<Option<T>> {
        (0..self.len())
            .map(|index| self.with_reference_object_parser(index).parse())
            .collect()
    }

    /// Report `not-parsed` for every index that was never accessed. Reported
    /// indices count as consumed afterwards.
    pub fn not_parsed(&self) {
        let mut parsed = self.parsed.borrow_mut();
        for index in 0..self.len() {
            if parsed.insert(index) {
                self.reporter
                    .with_reference(index)
                    .report_error(ErrorKind::NotParsed);
            }
        }
    }

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
