//! The error aggregator and the scoped handles that report into it.
//!
//! One aggregator is created per call tree. Every parser, validator and
//! reporter derived from the root shares it, so errors from the whole object
//! graph land in one ordered list. Nothing is deduplicated.

use core::fmt::Display;
use std::cell::RefCell;
use std::rc::Rc;

use crate::prelude_internal::*;

/// A handle onto the shared error aggregator, scoped to one location and
/// optional meta context.
///
/// Cloning a reporter or deriving one with [`with_reference`](Self::with_reference)
/// keeps the same aggregator. Reporters are not `Send`; build a fresh root per
/// concurrent operation.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    errors: Rc<RefCell<Vec<Error>>>,
    source: Option<Location>,
    meta: Option<Meta>,
}

impl ErrorReporter {
    /// A root reporter with a fresh aggregator, addressing by JSON Pointer.
    pub fn new() -> Self {
        Self::with_source_root(Location::new_pointer())
    }

    /// A root reporter with a fresh aggregator and the given root location.
    pub fn with_source_root(source: Location) -> Self {
        Self {
            errors: Rc::new(RefCell::new(Vec::new())),
            source: Some(source),
            meta: None,
        }
    }

    pub fn source(&self) -> Option<&Location> {
        self.source.as_ref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Same aggregator, different location.
    pub fn with_source(&self, source: Location) -> Self {
        Self {
            errors: self.errors.clone(),
            source: Some(source),
            meta: self.meta.clone(),
        }
    }

    /// Same aggregator, different meta context.
    pub fn with_meta(&self, meta: impl Into<Meta>) -> Self {
        Self {
            errors: self.errors.clone(),
            source: self.source.clone(),
            meta: Some(meta.into()),
        }
    }

    /// Same aggregator, location extended by one reference.
    ///
    /// When the current location cannot be extended (a named parameter) the
    /// derived reporter has no location and its errors are reported unlocated.
    pub fn with_reference(&self, reference: impl Display) -> Self {
        Self {
            errors: self.errors.clone(),
            source: self
                .source
                .as_ref()
                .and_then(|source| source.with_reference(reference)),
            meta: self.meta.clone(),
        }
    }

    /// Append an error at this reporter's location.
    pub fn report_error(&self, kind: ErrorKind) {
        tracing::trace!(
            code = kind.code(),
            source = self.source.as_ref().map(tracing::field::display),
            "structure error reported"
        );
        self.errors.borrow_mut().push(Error {
            kind,
            location: self.source.clone(),
            meta: self.meta.clone(),
        });
    }

    pub fn has_error(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Snapshot of everything reported so far, or `None` when nothing was.
    pub fn error(&self) -> Option<Errors> {
        let errors = self.errors.borrow();
        if errors.is_empty() {
            None
        } else {
            Some(Errors(errors.clone()))
        }
    }

    /// `Ok(())` when nothing was reported, otherwise every error so far.
    pub fn result(&self) -> Result<(), Errors> {
        match self.error() {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_reporter_has_no_error() {
        let reporter = ErrorReporter::new();
        assert!(!reporter.has_error());
        assert_eq!(reporter.error(), None);
        assert_eq!(reporter.result(), Ok(()));
    }

    #[test]
    fn test_derived_reporters_share_aggregator_in_call_order() {
        let root = ErrorReporter::new();
        let a = root.with_reference("a");
        let b = root.with_reference("b").with_reference(2);

        b.report_error(ErrorKind::ValueEmpty);
        a.report_error(ErrorKind::ValueNotExists);
        a.report_error(ErrorKind::ValueNotExists);

        let errors = root.error().unwrap();
        assert_eq!(errors.0.len(), 3);
        assert_eq!(errors.0[0].location().unwrap().pointer(), "/b/2");
        assert_eq!(errors.0[1].location().unwrap().pointer(), "/a");
        assert_eq!(errors.0[1], errors.0[2]);
    }

    #[test]
    fn test_meta_is_attached() {
        let root = ErrorReporter::new();
        root.with_meta(json!({ "type": "cbg" }))
            .with_reference("value")
            .report_error(ErrorKind::ValueNotValid);

        let errors = root.error().unwrap();
        assert_eq!(errors.0[0].meta(), Some(&json!({ "type": "cbg" })));
        assert_eq!(root.meta(), None);
    }

    #[test]
    fn test_parameter_reporter_nests_once() {
        let root = ErrorReporter::with_source_root(Location::new_parameter());
        let named = root.with_reference("mediaType");
        assert_eq!(named.source().unwrap().parameter(), "mediaType");

        let nested = named.with_reference(0);
        assert_eq!(nested.source(), None);
        nested.report_error(ErrorKind::ValueEmpty);
        assert_eq!(root.error().unwrap().0[0].location(), None);
    }
}
