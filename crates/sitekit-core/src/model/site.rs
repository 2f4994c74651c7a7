// ── Site domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::site_id::SiteId;

/// A site record as delivered by the backend, minimally processed.
///
/// Only the identity fields are typed; every payload field (including
/// the ones mirrored into `id` and `slug`) rides along untouched in
/// `attrs`. Records are immutable once constructed; an update arrives
/// as a whole replacement record with a fresh allocation, which is what
/// the computed-site cache keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSite {
    pub id: SiteId,
    /// URL-safe short name, unique across the store when present.
    pub slug: Option<String>,
    /// The full backend payload.
    pub attrs: Map<String, Value>,
}

impl RawSite {
    /// Record with an empty payload. Mostly useful in tests and builders;
    /// real records come from [`RawSite::from_value`].
    pub fn new(id: impl Into<SiteId>, slug: Option<&str>) -> Self {
        Self {
            id: id.into(),
            slug: slug.map(str::to_owned),
            attrs: Map::new(),
        }
    }

    /// Payload field by name.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Payload field by name, as a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Insert a payload field, builder-style.
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_owned(), value.into());
        self
    }
}

/// The externally visible "site" value: raw payload fields overlaid
/// with derived attributes.
///
/// Handed out as `Arc<ComputedSite>` so that repeated lookups of the
/// same raw record share one allocation — callers can rely on pointer
/// equality to detect "unchanged site".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedSite {
    pub id: SiteId,
    pub slug: Option<String>,
    /// Merged attribute map. See [`ComputedSite::merged`] for precedence.
    pub attrs: Map<String, Value>,
}

impl ComputedSite {
    /// Build the merged view: raw attrs, overlaid with the general
    /// derived attributes, overlaid with the Jetpack derived attributes.
    /// Later sources override earlier ones on key collision.
    pub(crate) fn merged(
        raw: &RawSite,
        site_attrs: Map<String, Value>,
        jetpack_attrs: Map<String, Value>,
    ) -> Self {
        let mut attrs = raw.attrs.clone();
        attrs.extend(site_attrs);
        attrs.extend(jetpack_attrs);
        Self {
            id: raw.id,
            slug: raw.slug.clone(),
            attrs,
        }
    }

    /// Attribute by name.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Attribute by name, as a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Attribute by name, as a boolean. Missing or non-boolean
    /// attributes read as `false`.
    pub fn attr_flag(&self, key: &str) -> bool {
        self.attrs
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merged_keeps_raw_fields() {
        let raw = RawSite::new(7u64, Some("example")).with_attr("name", "Example");
        let merged = ComputedSite::merged(&raw, Map::new(), Map::new());

        assert_eq!(merged.id, SiteId(7));
        assert_eq!(merged.slug.as_deref(), Some("example"));
        assert_eq!(merged.attr_str("name"), Some("Example"));
    }

    #[test]
    fn merged_site_attrs_override_raw() {
        let raw = RawSite::new(7u64, Some("example")).with_attr("name", "Example");
        let mut site_attrs = Map::new();
        site_attrs.insert("name".to_owned(), json!("Example Computed"));

        let merged = ComputedSite::merged(&raw, site_attrs, Map::new());
        assert_eq!(merged.attr_str("name"), Some("Example Computed"));
    }

    #[test]
    fn merged_jetpack_attrs_win_last() {
        let raw = RawSite::new(7u64, None).with_attr("name", "Raw");
        let mut site_attrs = Map::new();
        site_attrs.insert("name".to_owned(), json!("General"));
        let mut jetpack_attrs = Map::new();
        jetpack_attrs.insert("name".to_owned(), json!("Jetpack"));

        let merged = ComputedSite::merged(&raw, site_attrs, jetpack_attrs);
        assert_eq!(merged.attr_str("name"), Some("Jetpack"));
    }

    #[test]
    fn attr_flag_defaults_to_false() {
        let raw = RawSite::new(1u64, None).with_attr("visible", true);
        let merged = ComputedSite::merged(&raw, Map::new(), Map::new());

        assert!(merged.attr_flag("visible"));
        assert!(!merged.attr_flag("jetpack"));
        assert!(!merged.attr_flag("missing"));
    }
}
