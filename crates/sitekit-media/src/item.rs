// ── Media item model ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A media-library item as the backend describes it.
///
/// Every field is optional: items pass through several states of
/// completeness (a transient upload has no server URL or thumbnails
/// yet; some attachment types never report a MIME type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    /// Canonical URL of the original file. The backend spells it `URL`.
    #[serde(rename = "URL")]
    pub url: Option<String>,

    /// Server-generated thumbnails, keyed by size name.
    pub thumbnails: HashMap<String, String>,

    /// MIME type reported by the backend.
    pub mime_type: Option<String>,

    /// Original filename.
    pub file: Option<String>,

    pub title: Option<String>,

    /// Extension reported by the backend, when present.
    pub extension: Option<String>,
}

impl MediaItem {
    /// Item with only a URL set. Handy for tests and transient entries.
    pub fn with_url(url: &str) -> Self {
        Self {
            url: Some(url.to_owned()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_backend_payload() {
        let item: MediaItem = serde_json::from_value(serde_json::json!({
            "URL": "https://example.files.wordpress.com/2026/01/photo.jpg",
            "thumbnails": { "thumbnail": "https://example.files.wordpress.com/t.jpg" },
            "mime_type": "image/jpeg",
            "file": "photo.jpg",
        }))
        .unwrap();

        assert_eq!(
            item.url.as_deref(),
            Some("https://example.files.wordpress.com/2026/01/photo.jpg")
        );
        assert_eq!(item.thumbnails.len(), 1);
        assert_eq!(item.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(item.extension, None);
    }

    #[test]
    fn empty_payload_is_all_absent() {
        let item: MediaItem = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(item, MediaItem::default());
    }
}
