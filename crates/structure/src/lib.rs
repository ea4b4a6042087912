//! Turn semi-structured data into typed domain objects while collecting every
//! violated constraint, each located by a query-parameter name or a JSON
//! Pointer path.
//!
//! A domain type plugs into the engine by implementing up to three traits:
//!
//! - [`ObjectParsable`] / [`ArrayParsable`]: pull typed fields out of a tree
//!   through an [`ObjectParser`] or [`ArrayParser`].
//! - [`Validatable`]: chain constraints per field through a [`Validator`].
//! - [`Normalizable`]: canonicalize in place through a [`Normalizer`].
//!
//! Parsers and validators never fail fast. Every problem is appended to one
//! shared aggregator owned by the root instance, so a single pass yields the
//! complete list of [`Errors`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use structure::{ObjectParsable, ObjectParser, Validatable, Validator};
//!
//! #[derive(Default)]
//! struct Device {
//!     id: Option<String>,
//!     revision: Option<i64>,
//! }
//!
//! impl ObjectParsable for Device {
//!     fn parse(&mut self, parser: &ObjectParser<'_>) {
//!         self.id = parser.string("id");
//!         self.revision = parser.int("revision");
//!     }
//! }
//!
//! impl Validatable for Device {
//!     fn validate(&self, validator: &Validator) {
//!         validator.string("id", self.id.as_deref()).exists().not_empty();
//!         validator
//!             .int("revision", self.revision)
//!             .greater_than_or_equal_to(0);
//!     }
//! }
//!
//! let input = json!({ "revision": -1 });
//! let parser = ObjectParser::from_value(&input);
//! let device: Device = parser.parse().unwrap_or_default();
//! assert!(!parser.has_error());
//!
//! let validator = Validator::new();
//! validator.validate(&device);
//! let errors = validator.error().unwrap();
//! assert_eq!(errors.0.len(), 2);
//! assert_eq!(errors.0[0].code(), "value-not-exists");
//! assert_eq!(errors.0[0].location().map(|s| s.pointer()), Some("/id"));
//! ```

/// JSON kinds of the nodes in a parse tree.
pub mod value;

/// Locations of values and errors: flat parameter names or JSON Pointers.
pub mod source;

/// Error taxonomy and the combined error returned to callers.
pub mod error;

/// Handle onto the shared error aggregator of one call tree.
pub mod report;

/// Where the data being processed came from.
pub mod origin;

/// Recursive descent over untyped trees.
pub mod parse;

/// Fluent, multi-constraint validation.
pub mod validate;

/// In-place canonicalization pass.
pub mod normalize;

/// Root configuration for a parse/validate/normalize cycle.
pub mod config;

pub use config::{Addressing, Config};
pub use error::{Comparison, Error, ErrorKind, Errors, Meta, TypeName};
pub use normalize::{Normalizable, Normalizer};
pub use origin::Origin;
pub use parse::{ArrayParsable, ArrayParser, ObjectParsable, ObjectParser};
pub use report::ErrorReporter;
pub use source::Location;
pub use validate::{
    ArrayValidator, BoolValidator, Float64Validator, IntValidator, NumberValidator,
    ObjectValidator, StringArrayValidator, StringValidator, TimeValidator, Validatable,
    Validator,
};
pub use value::ValueKind;

/// Layout accepted by [`ObjectParser::time`] for RFC 3339 timestamps with an
/// optional fractional second.
pub const RFC3339: &str = "%+";

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::error::{Comparison, Error, ErrorKind, Errors, Meta, TypeName};
    pub use crate::origin::Origin;
    pub use crate::report::ErrorReporter;
    pub use crate::source::Location;
    pub use crate::value::ValueKind;
    pub use serde_json::{Map, Value};
}
