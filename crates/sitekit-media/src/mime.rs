// ── Extension and MIME inference ──
//
// Lowercase extension from a path or URL, and extension -> MIME type
// via the `mime_guess` static table. Indeterminate inputs yield `None`,
// never an error.

use crate::item::MediaItem;

/// Lowercase extension of a path or URL.
///
/// Query strings and fragments are stripped first, then the final path
/// segment is split on its last dot. Returns `None` for extension-less
/// names, trailing dots, and dotfiles without a further extension.
pub fn file_extension(path_or_url: &str) -> Option<String> {
    let trimmed = path_or_url
        .split_once(['?', '#'])
        .map_or(path_or_url, |(head, _)| head);
    let name = trimmed
        .rsplit_once(['/', '\\'])
        .map_or(trimmed, |(_, tail)| tail);

    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Extension of a media item: the explicit field when the backend set
/// it, otherwise derived from the filename, URL, or title, in that
/// order.
pub fn item_extension(item: &MediaItem) -> Option<String> {
    if let Some(ext) = &item.extension {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if !ext.is_empty() {
            return Some(ext);
        }
    }

    [
        item.file.as_deref(),
        item.url.as_deref(),
        item.title.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(file_extension)
}

/// MIME type for a bare extension or a path/URL, from the static
/// `mime_guess` table. `None` when unknown.
pub fn mime_type(ext_or_path: &str) -> Option<&'static str> {
    let ext = file_extension(ext_or_path)
        .unwrap_or_else(|| ext_or_path.trim_start_matches('.').to_ascii_lowercase());
    mime_guess::from_ext(&ext).first_raw()
}

/// MIME type of a media item: the backend-reported type when present,
/// otherwise inferred from the item's extension.
pub fn item_mime_type(item: &MediaItem) -> Option<String> {
    if let Some(mime) = &item.mime_type {
        if !mime.is_empty() {
            return Some(mime.clone());
        }
    }
    item_extension(item)
        .as_deref()
        .and_then(mime_type)
        .map(str::to_owned)
}
