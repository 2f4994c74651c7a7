// ── Core error types ──
//
// The only fallible surface in this crate is payload ingestion. Lookups
// model absence as `Option` -- an unknown ID or slug is a normal
// outcome, not a failure. See the store module.

use thiserror::Error;

/// Errors from turning an untyped backend payload into a [`RawSite`].
///
/// [`RawSite`]: crate::model::RawSite
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has no site ID field")]
    MissingId,

    #[error("site ID is not an unsigned integer: {value}")]
    InvalidId { value: String },

    #[error("site slug is not a string: {value}")]
    InvalidSlug { value: String },
}
