// ── Site identity types ──
//
// SiteId and SiteKey form the foundation of every lookup in this crate.
// They unify numeric identifiers and string slugs behind a single
// ergonomic interface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── SiteId ──────────────────────────────────────────────────────────

/// Numeric site identifier assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SiteId(pub u64);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SiteId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ── SiteKey ─────────────────────────────────────────────────────────

/// Lookup key accepted wherever a site can be addressed.
///
/// Transparently wraps either a numeric ID or a string slug. Consumers
/// never care which; resolution tries the numeric interpretation first,
/// then the slug (see `SiteStore::site`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteKey {
    Id(SiteId),
    Slug(String),
}

impl SiteKey {
    pub fn as_id(&self) -> Option<SiteId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Slug(_) => None,
        }
    }

    pub fn as_slug(&self) -> Option<&str> {
        match self {
            Self::Slug(s) => Some(s),
            Self::Id(_) => None,
        }
    }
}

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for SiteKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<SiteId> for SiteKey {
    fn from(id: SiteId) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for SiteKey {
    fn from(id: u64) -> Self {
        Self::Id(SiteId(id))
    }
}

impl From<String> for SiteKey {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(id) => Self::Id(SiteId(id)),
            Err(_) => Self::Slug(s),
        }
    }
}

impl From<&str> for SiteKey {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}
