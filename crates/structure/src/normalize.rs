//! In-place canonicalization after validation.
//!
//! A [`Normalizer`] walks the same shape a [`Validator`](crate::Validator)
//! does but has no error channel: normalizing never rejects data.

use core::fmt::Display;

use crate::prelude_internal::*;

/// A type that canonicalizes itself, e.g. sorting collections or filling
/// defaults.
pub trait Normalizable {
    fn normalize(&mut self, normalizer: &Normalizer);
}

impl<T: Normalizable> Normalizable for Option<T> {
    fn normalize(&mut self, normalizer: &Normalizer) {
        if let Some(inner) = self {
            inner.normalize(normalizer);
        }
    }
}

impl<T: Normalizable> Normalizable for [T] {
    fn normalize(&mut self, normalizer: &Normalizer) {
        for (index, element) in self.iter_mut().enumerate() {
            element.normalize(&normalizer.with_reference(index));
        }
    }
}

impl<T: Normalizable> Normalizable for Vec<T> {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.as_mut_slice().normalize(normalizer);
    }
}

impl<T: Normalizable + ?Sized> Normalizable for Box<T> {
    fn normalize(&mut self, normalizer: &Normalizer) {
        (**self).normalize(normalizer);
    }
}

/// Entry point for normalizing one call tree.
#[derive(Debug, Clone)]
pub struct Normalizer {
    source: Option<Location>,
    meta: Option<Meta>,
    origin: Origin,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Root normalizer addressing by JSON Pointer.
    pub fn new() -> Self {
        Self {
            source: Some(Location::new_pointer()),
            meta: None,
            origin: Origin::default(),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn with_origin(&self, origin: Origin) -> Self {
        Self {
            origin,
            ..self.clone()
        }
    }

    pub fn source(&self) -> Option<&Location> {
        self.source.as_ref()
    }

    pub fn with_source(&self, source: Location) -> Self {
        Self {
            source: Some(source),
            ..self.clone()
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn with_meta(&self, meta: impl Into<Meta>) -> Self {
        Self {
            meta: Some(meta.into()),
            ..self.clone()
        }
    }

    pub fn with_reference(&self, reference: impl Display) -> Self {
        Self {
            source: self
                .source
                .as_ref()
                .and_then(|source| source.with_reference(reference)),
            ..self.clone()
        }
    }

    pub fn normalize<N: Normalizable + ?Sized>(&self, normalizable: &mut N) {
        tracing::debug!(
            source = self.source.as_ref().map(tracing::field::display),
            origin = %self.origin,
            "normalizing {}",
            core::any::type_name::<N>()
        );
        normalizable.normalize(self);
    }
}
