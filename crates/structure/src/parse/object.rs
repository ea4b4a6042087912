//! ObjectParser for reading string-keyed maps.

use std::cell::RefCell;

use ahash::AHashSet;
use chrono::{DateTime, Utc};

use super::{ArrayParsable, ArrayParser, Lookup, ObjectParsable};
use crate::prelude_internal::*;

/// Reads typed fields from one map node.
///
/// Tracks consumed keys for [`not_parsed`](Self::not_parsed). Child parsers
/// created with [`with_reference_object_parser`](Self::with_reference_object_parser)
/// share the error aggregator but track their own keys.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use structure::ObjectParser;
///
/// let input = json!({ "name": "pump", "settings": { "rate": 1.5 } });
/// let parser = ObjectParser::from_value(&input);
///
/// assert_eq!(parser.string("name").as_deref(), Some("pump"));
/// let settings = parser.with_reference_object_parser("settings");
/// assert_eq!(settings.float64("rate"), Some(1.5));
/// settings.not_parsed();
/// parser.not_parsed();
/// assert!(!parser.has_error());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectParser<'a> {
    object: Option<&'a Map<String, Value>>,
    reporter: ErrorReporter,
    origin: Origin,
    parsed: RefCell<AHashSet<String>>,
}

impl<'a> ObjectParser<'a> {
    /// Root parser over a map, addressing by JSON Pointer.
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self::with_reporter(Some(object), ErrorReporter::new())
    }

    /// Root parser over any node. A node that is not a map is reported as
    /// `type-not-object` at the root and the parser does not exist.
    pub fn from_value(value: &'a Value) -> Self {
        Self::from_value_with_reporter(value, ErrorReporter::new())
    }

    pub fn from_value_with_reporter(value: &'a Value, reporter: ErrorReporter) -> Self {
        let object = super::to_object(value, &reporter);
        Self::with_reporter(object, reporter)
    }

    /// Parser over an optional map, reporting into an existing aggregator.
    pub fn with_reporter(object: Option<&'a Map<String, Value>>, reporter: ErrorReporter) -> Self {
        Self {
            object,
            reporter,
            origin: Origin::default(),
            parsed: RefCell::new(AHashSet::new()),
        }
    }

    /// Same node and aggregator, different location. The derived parser
    /// starts from a copy of the consumed keys.
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

    /// Whether the map this parser reads exists at all.
    pub fn exists(&self) -> bool {
        self.object.is_some()
    }

    /// Keys of the underlying map, in input order.
    pub fn references(&self) -> Vec<String> {
        self.object
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `reference` is present. Does not mark it consumed.
    pub fn reference_exists(&self, reference: &str) -> bool {
        self.object
            .is_some_and(|object| object.contains_key(reference))
    }

    // =========================================================================
    // Scalar accessors
    // =========================================================================

    pub fn bool(&self, reference: &str) -> Option<bool> {
        self.read(reference, super::to_bool)
    }

    pub fn int(&self, reference: &str) -> Option<i64> {
        self.read(reference, super::to_int)
    }

    pub fn float64(&self, reference: &str) -> Option<f64> {
        self.read(reference, super::to_float64)
    }

    pub fn string(&self, reference: &str) -> Option<String> {
        self.read(reference, super::to_string)
    }

    pub fn string_array(&self, reference: &str) -> Option<Vec<String>> {
        self.read(reference, super::to_string_array)
    }

    /// Read a string and parse it with a chrono strftime `layout`.
    pub fn time(&self, reference: &str, layout: &str) -> Option<DateTime<Utc>> {
        self.read(reference, |raw, reporter| super::to_time(raw, layout, reporter))
    }

    pub fn object(&self, reference: &str) -> Option<&'a Map<String, Value>> {
        self.read(reference, super::to_object)
    }

    pub fn array(&self, reference: &str) -> Option<&'a Vec<Value>> {
        self.read(reference, super::to_array)
    }

    /// The raw node, whatever its type.
    pub fn value(&self, reference: &str) -> Option<&'a Value> {
        self.read(reference, |raw, _| Some(raw))
    }

    fn read<T>(
        &self,
        reference: &str,
        convert: impl FnOnce(&'a Value, &ErrorReporter) -> Option<T>,
    ) -> Option<T> {
        self.lookup(reference, convert).into_option()
    }

    fn lookup<T>(
        &self,
        reference: &str,
        convert: impl FnOnce(&'a Value, &ErrorReporter) -> Option<T>,
    ) -> Lookup<T> {
        self.mark_parsed(reference);
        let raw = self.object.and_then(|object| object.get(reference));
        Lookup::read(raw, |raw| convert(raw, &self.reporter.with_reference(reference)))
    }

    fn mark_parsed(&self, reference: &str) {
        self.parsed.borrow_mut().insert(reference.to_string());
    }

    // =========================================================================
    // Nested descent
    // =========================================================================

    /// Parser one level deeper. When the key is absent the child does not
    /// exist; when it is not a map, `type-not-object` is reported.
    pub fn with_reference_object_parser(&self, reference: &str) -> ObjectParser<'a> {
        let object = self.object(reference);
        ObjectParser::with_reporter(object, self.reporter.with_reference(reference))
            .with_origin(self.origin)
    }

    /// Array parser one level deeper. When the key is absent the child does not
    /// exist; when it is not an array, `type-not-array` is reported.
    pub fn with_reference_array_parser(&self, reference: &str) -> ArrayParser<'a> {
        let array = self.array(reference);
        ArrayParser::with_reporter(array, self.reporter.with_reference(reference))
            .with_origin(self.origin)
    }

    /// Reporter scoped to `reference`, for domain-level errors about a key.
    pub fn with_reference_error_reporter(&self, reference: &str) -> ErrorReporter {
        self.reporter.with_reference(reference)
    }

    /// Populate `target` from this map.
    pub fn parse_into<T: ObjectParsable + ?Sized>(&self, target: &mut T) {
        target.parse(self);
    }

    /// Build a `T` from this map, or `None` when the map does not exist.
    pub fn parse<T: ObjectParsable + Default>(&self) -> Option<T> {
        if !self.exists() {
            return None;
        }
        let mut target = T::default();
        target.parse(self);
        Some(target)
    }

    /// Build a `T` from the map at `reference`.
    pub fn parse_object<T: ObjectParsable + Default>(&self, reference: &str) -> Option<T> {
        self.with_reference_object_parser(reference).parse()
    }

    /// Build a `T` from the array at `reference`.
    pub fn parse_array<T: ArrayParsable + Default>(&self, reference: &str) -> Option<T> {
        self.with_reference_array_parser(reference).parse()
    }

    // =========================================================================
    // Strictness
    // =========================================================================

    /// Report `not-parsed` for every key that was never accessed.
    ///
    /// Reported keys count as consumed afterwards, so each unknown key is
    /// reported once however many times this is called.
    pub fn not_parsed(&self) {
        let Some(object) = self.object else {
            return;
        };
        let mut parsed = self.parsed.borrow_mut();
        for key in object.keys() {
            if parsed.insert(key.clone()) {
                self.reporter
                    .with_reference(key)
                    .report_error(ErrorKind::NotParsed);
            }
        }
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
