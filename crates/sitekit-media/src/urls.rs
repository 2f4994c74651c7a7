// ── Display-URL resolution ──
//
// Derives the URL a UI should show for a media item. Precedence:
// named thumbnail size, then max-width resize, then named resize,
// then the raw URL.

use url::Url;

use crate::item::MediaItem;
use crate::thumb::ThumbnailSize;

/// Options controlling display-URL derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaUrlOptions {
    /// Prefer this server-generated thumbnail when the item has one.
    pub size: Option<ThumbnailSize>,

    /// Request a width-constrained resize of the original.
    pub max_width: Option<u32>,

    /// Request a named resize spec (e.g. `"200,200"`).
    pub resize: Option<String>,
}

impl MediaUrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn size(mut self, size: ThumbnailSize) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    #[must_use]
    pub fn resize(mut self, spec: &str) -> Self {
        self.resize = Some(spec.to_owned());
        self
    }
}

/// Resolve the display URL for `item` under `options`.
///
/// A requested thumbnail the item doesn't carry falls through to the
/// next rule rather than failing. Returns `None` when the item has no
/// usable URL at all (e.g. an upload still in flight) or its URL fails
/// to parse while a resize was requested.
pub fn media_url(item: &MediaItem, options: &MediaUrlOptions) -> Option<String> {
    if let Some(size) = options.size {
        if let Some(thumb) = item.thumbnails.get(size.as_ref()) {
            return Some(thumb.clone());
        }
    }

    let raw = item.url.as_deref()?;
    if let Some(width) = options.max_width {
        return with_query_param(raw, "w", &width.to_string());
    }
    if let Some(spec) = &options.resize {
        return with_query_param(raw, "resize", spec);
    }
    Some(raw.to_owned())
}

/// Re-emit `raw` with `key=value` set, replacing any existing `key`.
fn with_query_param(raw: &str, key: &str, value: &str) -> Option<String> {
    let mut parsed = Url::parse(raw).ok()?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = parsed.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(key, value);
    }
    Some(parsed.into())
}
