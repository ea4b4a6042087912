use core::fmt::Display;
use core::str::FromStr;

/// Where the data being processed came from.
///
/// Parsers, validators and normalizers carry an origin and hand it down to
/// every instance derived from them. The engine itself never branches on it;
/// domain types read it to decide, for example, whether server-managed fields
/// may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    /// Produced by the service itself.
    Internal,
    /// Submitted by a client.
    #[default]
    External,
    /// Read back from storage.
    Store,
}

impl Origin {
    pub const ALL: [Origin; 3] = [Origin::Internal, Origin::External, Origin::Store];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Internal => "internal",
            Origin::External => "external",
            Origin::Store => "store",
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown origin: {0}")]
pub struct UnknownOrigin(pub String);

impl FromStr for Origin {
    type Err = UnknownOrigin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Origin::ALL
            .into_iter()
            .find(|origin| origin.as_str() == s)
            .ok_or_else(|| UnknownOrigin(s.to_string()))
    }
}
