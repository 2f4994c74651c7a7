//! Client-side site state: raw records, selectors, and memoized
//! computed-site materialization.
//!
//! This crate owns the slice of client state that describes the user's
//! sites:
//!
//! - **[`SiteStore`]** — Central facade. Raw records live under a
//!   numeric-ID primary index with a slug secondary index, next to the
//!   selected-site register and the identity-keyed computed-site cache.
//!   All reads are lock-free.
//!
//! - **[`RawSite`] / [`ComputedSite`]** — A raw record is the backend
//!   payload with its identity fields lifted out; the computed site is
//!   that payload overlaid with two layers of derived attributes
//!   (general, then Jetpack — later layers win on key collision).
//!
//! - **[`ComputedAttributes`]** — The provider seam for the derived
//!   layers. [`StandardAttributes`] and [`JetpackAttributes`] are the
//!   stock implementations; consumers with richer state inject their
//!   own.
//!
//! - **Ingestion** — [`RawSite::from_value`] bridges untyped REST
//!   payloads into records, the one fallible operation here.
//!
//! Computed sites are memoized per raw-record *allocation*, not per ID:
//! while a record is unchanged, every lookup resolving to it returns
//! the identical `Arc<ComputedSite>`, and dropping the record releases
//! its cache entry. Absence (unknown ID or slug) is `None`, never an
//! error.

pub mod attributes;
pub mod error;
pub mod model;
pub mod store;

mod ingest;

// ── Primary re-exports ──────────────────────────────────────────────

pub use attributes::{ComputedAttributes, JetpackAttributes, StandardAttributes};
pub use error::IngestError;
pub use model::{ComputedSite, RawSite, SiteId, SiteKey};
pub use store::{SiteRecords, SiteStore};
