//! The closed set of shelter kinds.
//!
//! Each kind is backed by a physically distinct table with its own column
//! set. Keeping the set closed means no user-supplied string can ever
//! reach an SQL identifier position: parsing happens here, once, at the
//! boundary.

use serde::{Deserialize, Serialize};

/// One of the four shelter categories served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterKind {
    /// Heat-wave shelters.
    Heat,
    /// Climate-response shelters.
    Climate,
    /// Fine-dust shelters.
    FineDust,
    /// Smart shelters.
    Smart,
}

impl ShelterKind {
    /// All kinds, in canonical whitelist order.
    pub const ALL: [ShelterKind; 4] = [
        ShelterKind::Heat,
        ShelterKind::Climate,
        ShelterKind::FineDust,
        ShelterKind::Smart,
    ];

    /// Wire name of the kind, as used in paths and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Climate => "climate",
            Self::FineDust => "finedust",
            Self::Smart => "smart",
        }
    }

    /// Physical table backing this kind.
    pub fn table(self) -> &'static str {
        match self {
            Self::Heat => "shelters_heat",
            Self::Climate => "shelters_climate",
            Self::FineDust => "shelters_finedust",
            Self::Smart => "shelters_smart",
        }
    }

    /// Parse a wire name, case-insensitively. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "heat" => Some(Self::Heat),
            "climate" => Some(Self::Climate),
            "finedust" => Some(Self::FineDust),
            "smart" => Some(Self::Smart),
            _ => None,
        }
    }

    /// Filter a comma-separated kinds parameter against the whitelist.
    ///
    /// Unknown entries are dropped silently (partial kind sets are
    /// expected from loose client input); duplicates are collapsed while
    /// preserving first-seen order.
    pub fn filter_csv(raw: &str) -> Vec<Self> {
        let mut kinds = Vec::new();
        for token in raw.split(',') {
            if let Some(kind) = Self::parse(token) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }
}

impl std::fmt::Display for ShelterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShelterKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

/// Error returned when a path segment names a kind outside the whitelist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shelter kind: {0}")]
pub struct UnknownKind(pub String);
