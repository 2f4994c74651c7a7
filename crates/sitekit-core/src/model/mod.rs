// ── Domain model ──
//
// Canonical site types. `RawSite` is the backend payload with its
// identity fields lifted out; `ComputedSite` is the merged view that
// consumers actually read.

pub mod site;
pub mod site_id;

// ── Re-exports ──────────────────────────────────────────────────────

pub use site::{ComputedSite, RawSite};
pub use site_id::{SiteId, SiteKey};
