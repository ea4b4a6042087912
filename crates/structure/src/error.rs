//! Error taxonomy shared by parsers and validators.
//!
//! Every violation is an [`ErrorKind`] carrying a machine-readable code, a
//! short title and a human detail. The reporter wraps it into an [`Error`]
//! together with the location it was found at and the optional meta context
//! of the reporting instance. One call tree yields a single [`Errors`] value.

use core::fmt::Display;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thisisplural::Plural;

use crate::source::Location;
use crate::value::ValueKind;

/// Opaque diagnostic context attached to errors. It is carried into error
/// payloads only and never consulted by the engine.
pub type Meta = serde_json::Value;

// =============================================================================
// TypeName
// =============================================================================

/// Target type of a parser accessor, used in type-mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Bool,
    Int,
    Float64,
    String,
    Time,
    Object,
    Array,
}

impl TypeName {
    fn code(&self) -> &'static str {
        match self {
            TypeName::Bool => "type-not-bool",
            TypeName::Int => "type-not-int",
            TypeName::Float64 => "type-not-float64",
            TypeName::String => "type-not-string",
            TypeName::Time => "type-not-time",
            TypeName::Object => "type-not-object",
            TypeName::Array => "type-not-array",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            TypeName::Bool => "type is not bool",
            TypeName::Int => "type is not int",
            TypeName::Float64 => "type is not float64",
            TypeName::String => "type is not string",
            TypeName::Time => "type is not time",
            TypeName::Object => "type is not object",
            TypeName::Array => "type is not array",
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TypeName::Bool => write!(f, "bool"),
            TypeName::Int => write!(f, "int"),
            TypeName::Float64 => write!(f, "float64"),
            TypeName::String => write!(f, "string"),
            TypeName::Time => write!(f, "time"),
            TypeName::Object => write!(f, "object"),
            TypeName::Array => write!(f, "array"),
        }
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// A comparison a value or length failed to satisfy, holding the formatted
/// bound(s).
///
/// Displays as the violated phrase, e.g. `GreaterThanOrEqualTo("0")` renders
/// `not greater than or equal to 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    EqualTo(String),
    NotEqualTo(String),
    LessThan(String),
    LessThanOrEqualTo(String),
    GreaterThan(String),
    GreaterThanOrEqualTo(String),
    /// Inclusive on both ends.
    InRange(String, String),
}

impl Display for Comparison {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Comparison::EqualTo(limit) => write!(f, "not equal to {}", limit),
            Comparison::NotEqualTo(limit) => write!(f, "equal to {}", limit),
            Comparison::LessThan(limit) => write!(f, "not less than {}", limit),
            Comparison::LessThanOrEqualTo(limit) => {
                write!(f, "not less than or equal to {}", limit)
            }
            Comparison::GreaterThan(limit) => write!(f, "not greater than {}", limit),
            Comparison::GreaterThanOrEqualTo(limit) => {
                write!(f, "not greater than or equal to {}", limit)
            }
            Comparison::InRange(lower, upper) => {
                write!(f, "not between {} and {}", lower, upper)
            }
        }
    }
}

// =============================================================================
// ErrorKind
// =============================================================================

/// A single violation. `Display` renders the detail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    // --- parser --------------------------------------------------------------
    #[error("Type is not {expected}, but {actual}")]
    TypeMismatch { expected: TypeName, actual: ValueKind },

    #[error("Value {value:?} is not a parsable time of format {layout:?}")]
    TimeNotParsable { value: String, layout: String },

    #[error("Not parsed")]
    NotParsed,

    // --- existence -----------------------------------------------------------
    #[error("Value does not exist")]
    ValueNotExists,

    #[error("Value exists")]
    ValueExists,

    #[error("Value is empty")]
    ValueEmpty,

    #[error("Value is not empty")]
    ValueNotEmpty,

    #[error("Value is a duplicate")]
    ValueDuplicate,

    #[error("Value is not true")]
    ValueNotTrue,

    #[error("Value is not false")]
    ValueNotFalse,

    // --- range and format ----------------------------------------------------
    #[error("Value {value} is {comparison}")]
    ValueNotInRange {
        value: String,
        comparison: Comparison,
    },

    #[error("Length {length} is {comparison}")]
    LengthOutOfRange {
        length: usize,
        comparison: Comparison,
    },

    #[error("Value {value} is not one of [{list}]", list = .allowed.join(", "))]
    ValueNotAllowed { value: String, allowed: Vec<String> },

    #[error("Value {value} is one of [{list}]", list = .disallowed.join(", "))]
    ValueDisallowed {
        value: String,
        disallowed: Vec<String>,
    },

    #[error("Value {value:?} matches expression {pattern:?}")]
    ValueMatches { value: String, pattern: String },

    #[error("Value {value:?} does not match expression {pattern:?}")]
    ValueNotMatches { value: String, pattern: String },

    #[error("Value {value} is not after {limit}")]
    ValueNotAfter { value: String, limit: String },

    #[error("Value {value} is not after now")]
    ValueNotAfterNow { value: String },

    #[error("Value {value} is not before {limit}")]
    ValueNotBefore { value: String, limit: String },

    #[error("Value {value} is not before now")]
    ValueNotBeforeNow { value: String },

    #[error("Value {value:?} is not valid as time with layout {layout:?}")]
    TimeNotValid { value: String, layout: String },

    #[error("Value is not valid")]
    ValueNotValid,

    /// Domain-defined violation.
    #[error("{detail}")]
    Custom {
        code: String,
        title: String,
        detail: String,
    },
}

impl ErrorKind {
    /// Build a domain-defined violation.
    pub fn custom(
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        ErrorKind::Custom {
            code: code.into(),
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Machine-readable code. Part of the wire contract.
    pub fn code(&self) -> &str {
        match self {
            ErrorKind::TypeMismatch { expected, .. } => expected.code(),
            ErrorKind::TimeNotParsable { .. } => "value-not-parsable",
            ErrorKind::NotParsed => "not-parsed",
            ErrorKind::ValueNotExists => "value-not-exists",
            ErrorKind::ValueExists => "value-exists",
            ErrorKind::ValueEmpty => "value-empty",
            ErrorKind::ValueNotEmpty => "value-not-empty",
            ErrorKind::ValueDuplicate => "value-duplicate",
            ErrorKind::ValueNotTrue => "value-not-true",
            ErrorKind::ValueNotFalse => "value-not-false",
            ErrorKind::ValueNotInRange { .. } => "value-not-in-range",
            ErrorKind::LengthOutOfRange { .. } => "length-out-of-range",
            ErrorKind::ValueNotAllowed { .. } => "value-not-allowed",
            ErrorKind::ValueDisallowed { .. } => "value-disallowed",
            ErrorKind::ValueMatches { .. } => "value-matches",
            ErrorKind::ValueNotMatches { .. } => "value-not-matches",
            ErrorKind::ValueNotAfter { .. } | ErrorKind::ValueNotAfterNow { .. } => {
                "value-not-after"
            }
            ErrorKind::ValueNotBefore { .. } | ErrorKind::ValueNotBeforeNow { .. } => {
                "value-not-before"
            }
            ErrorKind::TimeNotValid { .. } | ErrorKind::ValueNotValid => "value-not-valid",
            ErrorKind::Custom { code, .. } => code,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ErrorKind::TypeMismatch { expected, .. } => expected.title(),
            ErrorKind::TimeNotParsable { .. } => "value is not a parsable time",
            ErrorKind::NotParsed => "not parsed",
            ErrorKind::ValueNotExists => "value does not exist",
            ErrorKind::ValueExists => "value exists",
            ErrorKind::ValueEmpty => "value is empty",
            ErrorKind::ValueNotEmpty => "value is not empty",
            ErrorKind::ValueDuplicate => "value is a duplicate",
            ErrorKind::ValueNotTrue => "value is not true",
            ErrorKind::ValueNotFalse => "value is not false",
            ErrorKind::ValueNotInRange { .. } => "value is not in range",
            ErrorKind::LengthOutOfRange { .. } => "length is out of range",
            ErrorKind::ValueNotAllowed { .. } => "value is not one of the allowed values",
            ErrorKind::ValueDisallowed { .. } => "value is one of the disallowed values",
            ErrorKind::ValueMatches { .. } => "value matches expression",
            ErrorKind::ValueNotMatches { .. } => "value does not match expression",
            ErrorKind::ValueNotAfter { .. } => "value is not after the specified time",
            ErrorKind::ValueNotAfterNow { .. } => "value is not after now",
            ErrorKind::ValueNotBefore { .. } => "value is not before the specified time",
            ErrorKind::ValueNotBeforeNow { .. } => "value is not before now",
            ErrorKind::TimeNotValid { .. } | ErrorKind::ValueNotValid => "value is not valid",
            ErrorKind::Custom { title, .. } => title,
        }
    }

    pub fn detail(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// Error
// =============================================================================

/// A violation tagged with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub location: Option<Location>,
    pub meta: Option<Meta>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
            meta: None,
        }
    }

    pub fn code(&self) -> &str {
        self.kind.code()
    }

    pub fn title(&self) -> &str {
        self.kind.title()
    }

    pub fn detail(&self) -> String {
        self.kind.detail()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "at {}: {}", location, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 3 + usize::from(self.location.is_some()) + usize::from(self.meta.is_some());
        let mut state = serializer.serialize_struct("Error", len)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("detail", &self.detail())?;
        if let Some(location) = &self.location {
            state.serialize_field("source", location)?;
        }
        if let Some(meta) = &self.meta {
            state.serialize_field("meta", meta)?;
        }
        state.end()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Every violation found in one call tree, in the order they were reported.
#[derive(Debug, Clone, PartialEq, Default, Plural, serde::Serialize)]
#[serde(transparent)]
pub struct Errors(pub Vec<Error>);

impl Display for Errors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no errors"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (and {} more)", first, rest.len()),
        }
    }
}

impl std::error::Error for Errors {}
