//! Engine configuration and the one-call parse, validate, normalize cycle.
//!
//! A [`Config`] is itself read with the engine, so a bad configuration is
//! reported with the same located [`Errors`] as bad data.

use core::fmt::Display;
use core::str::FromStr;

use crate::normalize::{Normalizable, Normalizer};
use crate::parse::{ArrayParser, ObjectParsable, ObjectParser};
use crate::prelude_internal::*;
use crate::validate::{Validatable, Validator};

/// Addressing scheme of the root location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// JSON Pointer paths, for request bodies.
    #[default]
    Pointer,
    /// Flat names, for query parameters.
    Parameter,
}

impl Addressing {
    pub const ALL: [Addressing; 2] = [Addressing::Pointer, Addressing::Parameter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Addressing::Pointer => "pointer",
            Addressing::Parameter => "parameter",
        }
    }

    pub fn root(&self) -> Location {
        match self {
            Addressing::Pointer => Location::new_pointer(),
            Addressing::Parameter => Location::new_parameter(),
        }
    }
}

impl Display for Addressing {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown addressing: {0}")]
pub struct UnknownAddressing(pub String);

impl FromStr for Addressing {
    type Err = UnknownAddressing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Addressing::ALL
            .into_iter()
            .find(|addressing| addressing.as_str() == s)
            .ok_or_else(|| UnknownAddressing(s.to_string()))
    }
}

/// How root parsers, validators and normalizers are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addressing: Addressing,
    pub origin: Origin,
    /// Report `not-parsed` for unknown keys of the root object.
    pub deny_unknown_fields: bool,
    /// Run the normalizer after a successful validation.
    pub normalize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addressing: Addressing::default(),
            origin: Origin::default(),
            deny_unknown_fields: false,
            normalize: true,
        }
    }
}

/// Configuration as written, before enum names are resolved.
#[derive(Debug, Default)]
struct RawConfig {
    addressing: Option<String>,
    origin: Option<String>,
    deny_unknown_fields: Option<bool>,
    normalize: Option<bool>,
}

impl ObjectParsable for RawConfig {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.addressing = parser.string("addressing");
        self.origin = parser.string("origin");
        self.deny_unknown_fields = parser.bool("denyUnknownFields");
        self.normalize = parser.bool("normalize");
        parser.not_parsed();
    }
}

impl Validatable for RawConfig {
    fn validate(&self, validator: &Validator) {
        let addressings = Addressing::ALL.map(|addressing| addressing.as_str());
        let origins = Origin::ALL.map(|origin| origin.as_str());
        validator
            .string("addressing", self.addressing.as_deref())
            .one_of(&addressings);
        validator
            .string("origin", self.origin.as_deref())
            .one_of(&origins);
    }
}

impl Config {
    /// Read a configuration object. Every key is optional; unknown keys and
    /// unknown enum names are errors.
    pub fn from_value(value: &Value) -> Result<Config, Errors> {
        let parser = ObjectParser::from_value(value);
        let raw: RawConfig = parser.parse().unwrap_or_default();
        let validator = Validator::with_reporter(parser.error_reporter().clone());
        validator.validate(&raw);
        validator.result()?;

        let defaults = Config::default();
        let addressing = match raw.addressing.as_deref().map(str::parse::<Addressing>) {
            Some(Ok(addressing)) => addressing,
            _ => defaults.addressing,
        };
        let origin = match raw.origin.as_deref().map(str::parse::<Origin>) {
            Some(Ok(origin)) => origin,
            _ => defaults.origin,
        };
        Ok(Config {
            addressing,
            origin,
            deny_unknown_fields: raw
                .deny_unknown_fields
                .unwrap_or(defaults.deny_unknown_fields),
            normalize: raw.normalize.unwrap_or(defaults.normalize),
        })
    }

    pub fn root_source(&self) -> Location {
        self.addressing.root()
    }

    pub fn object_parser<'a>(&self, value: &'a Value) -> ObjectParser<'a> {
        let reporter = ErrorReporter::with_source_root(self.root_source());
        ObjectParser::from_value_with_reporter(value, reporter).with_origin(self.origin)
    }

    pub fn array_parser<'a>(&self, value: &'a Value) -> ArrayParser<'a> {
        let reporter = ErrorReporter::with_source_root(self.root_source());
        ArrayParser::from_value_with_reporter(value, reporter).with_origin(self.origin)
    }

    pub fn validator(&self) -> Validator {
        Validator::with_reporter(ErrorReporter::with_source_root(self.root_source()))
            .with_origin(self.origin)
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new()
            .with_source(self.root_source())
            .with_origin(self.origin)
    }

    /// Parse, validate and optionally normalize one object.
    ///
    /// Stops after parsing when the input is malformed, so validation only
    /// ever sees well-typed values.
    pub fn process<T>(&self, value: &Value) -> Result<T, Errors>
    where
        T: ObjectParsable + Validatable + Normalizable + Default,
    {
        let parser = self.object_parser(value);
        let parsed: Option<T> = parser.parse();
        if self.deny_unknown_fields {
            parser.not_parsed();
        }
        parser.result()?;
        let mut target = parsed.unwrap_or_default();

        let validator = self.validator();
        validator.validate(&target);
        validator.result()?;

        if self.normalize {
            self.normalizer().normalize(&mut target);
        }
        Ok(target)
    }
}
