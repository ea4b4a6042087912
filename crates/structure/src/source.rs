use core::fmt::Display;
use std::borrow::Cow;

use serde::Serialize;

/// Where in the input a value, or an error about it, came from.
///
/// Two addressing schemes share one contract:
///
/// - `Parameter`: a flat query-parameter name. It starts unnamed (`None`) and
///   accepts a single reference; a named parameter cannot be extended further,
///   even when its name is `""`.
/// - `Pointer`: an RFC 6901 JSON Pointer. It starts as `""` and every
///   reference appends one escaped segment.
///
/// A `Location` is never mutated; extending it returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[serde(serialize_with = "serialize_parameter")]
    Parameter(Option<String>),
    Pointer(String),
}

fn serialize_parameter<S: serde::Serializer>(
    name: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(name.as_deref().unwrap_or_default())
}

impl Location {
    /// An unnamed parameter location.
    pub fn new_parameter() -> Self {
        Location::Parameter(None)
    }

    /// The pointer to the document root (`""`).
    pub fn new_pointer() -> Self {
        Location::Pointer(String::new())
    }

    /// The parameter name, or `""` for unnamed parameters and pointer
    /// locations.
    pub fn parameter(&self) -> &str {
        match self {
            Location::Parameter(name) => name.as_deref().unwrap_or_default(),
            Location::Pointer(_) => "",
        }
    }

    /// The pointer path, or `""` for parameter locations.
    pub fn pointer(&self) -> &str {
        match self {
            Location::Parameter(_) => "",
            Location::Pointer(path) => path,
        }
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Location::Parameter(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Location::Pointer(_))
    }

    /// Extend this location by one reference.
    ///
    /// Returns `None` when a parameter that already holds a name is asked to
    /// nest; parameter addressing is single-level.
    pub fn with_reference(&self, reference: impl Display) -> Option<Location> {
        match self {
            Location::Parameter(None) => Some(Location::Parameter(Some(reference.to_string()))),
            Location::Parameter(Some(name)) => {
                tracing::warn!(
                    parameter = %name,
                    reference = %reference,
                    "parameter location cannot be nested"
                );
                None
            }
            Location::Pointer(path) => {
                let segment = reference.to_string();
                let mut pointer = String::with_capacity(path.len() + segment.len() + 1);
                pointer.push_str(path);
                pointer.push('/');
                pointer.push_str(&escape(&segment));
                Some(Location::Pointer(pointer))
            }
        }
    }

    /// Decode the segments of a pointer location.
    ///
    /// A parameter location yields its name as the only segment, or nothing
    /// when unnamed.
    pub fn segments(&self) -> Vec<String> {
        match self {
            Location::Parameter(name) => name.iter().cloned().collect(),
            Location::Pointer(path) if path.is_empty() => Vec::new(),
            Location::Pointer(path) => path
                .split('/')
                .skip(1)
                .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
                .collect(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Location::Parameter(name) => write!(f, "{}", name.as_deref().unwrap_or_default()),
            Location::Pointer(path) if path.is_empty() => write!(f, "(root)"),
            Location::Pointer(path) => write!(f, "{}", path),
        }
    }
}

/// Escape a pointer segment. `~` is replaced before `/` so the `~` introduced
/// by `~1` is not escaped again.
fn escape(segment: &str) -> Cow<'_, str> {
    if segment.contains(['~', '/']) {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}
