// ── Named thumbnail sizes ──

use strum::{AsRefStr, Display, EnumString};

/// Server-generated thumbnail size names.
///
/// These match the keys of [`MediaItem::thumbnails`] as the backend
/// emits them.
///
/// [`MediaItem::thumbnails`]: crate::item::MediaItem::thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ThumbnailSize {
    Thumbnail,
    Medium,
    Large,
}
