//! Media helper functions for site-management clients.
//!
//! Small, independent derivations over media-library items and bare
//! path/URL strings:
//!
//! - [`media_url`] — option-driven display URL with a fixed precedence:
//!   named thumbnail size, then max-width resize, then named resize,
//!   then the raw URL.
//! - [`file_extension`] / [`item_extension`] — lowercase extension
//!   inference from paths, URLs, or item metadata.
//! - [`mime_type`] / [`item_mime_type`] — extension-to-MIME lookup via
//!   the `mime_guess` static table.
//!
//! Absence (no usable URL, unknown extension) is `None`, never an
//! error; every function is pure.

pub mod item;
pub mod mime;
pub mod thumb;
pub mod urls;

// ── Primary re-exports ──────────────────────────────────────────────

pub use item::MediaItem;
pub use mime::{file_extension, item_extension, item_mime_type, mime_type};
pub use thumb::ThumbnailSize;
pub use urls::{MediaUrlOptions, media_url};
