// ── Site store facade ──
//
// Owns the raw records, the computed-site cache, the attribute
// providers, and the selected-site register. Thread-safe and lock-free
// for reads.

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::attributes::{ComputedAttributes, JetpackAttributes, StandardAttributes};
use crate::model::{ComputedSite, RawSite, SiteId, SiteKey};

mod computed_cache;
mod records;

use computed_cache::ComputedCache;
pub use records::SiteRecords;

/// Central store for the site slice of client state.
///
/// Raw records live under a numeric-ID primary index with a slug
/// secondary index. Computed sites are memoized per raw-record
/// allocation: while a record is unchanged, every lookup that resolves
/// to it returns the identical `Arc<ComputedSite>`.
pub struct SiteStore {
    records: SiteRecords,
    computed: ComputedCache,
    site_attrs: Box<dyn ComputedAttributes>,
    jetpack_attrs: Box<dyn ComputedAttributes>,
    selected: ArcSwapOption<SiteId>,
}

impl SiteStore {
    /// Store with the stock attribute providers.
    pub fn new() -> Self {
        Self::with_providers(Box::new(StandardAttributes), Box::new(JetpackAttributes))
    }

    /// Store with caller-supplied attribute providers.
    ///
    /// `site_attrs` is merged onto the raw payload first, `jetpack_attrs`
    /// last; on key collision the later source silently wins.
    pub fn with_providers(
        site_attrs: Box<dyn ComputedAttributes>,
        jetpack_attrs: Box<dyn ComputedAttributes>,
    ) -> Self {
        Self {
            records: SiteRecords::new(),
            computed: ComputedCache::new(),
            site_attrs,
            jetpack_attrs,
            selected: ArcSwapOption::const_empty(),
        }
    }

    // ── Record maintenance ───────────────────────────────────────────

    /// Insert or replace a single record. Returns `true` if the ID was new.
    pub fn upsert(&self, record: RawSite) -> bool {
        self.records.upsert(record)
    }

    /// Remove a record by ID. Returns the removed record if it existed.
    pub fn remove(&self, id: SiteId) -> Option<Arc<RawSite>> {
        self.records.remove(id)
    }

    /// Replace the whole record set.
    ///
    /// Incoming records are upserted first, then IDs absent from the
    /// incoming set are pruned; this avoids the brief empty state a
    /// clear-then-insert would cause. The computed-site cache is dropped
    /// afterwards: new-set records are fresh allocations even when their
    /// content matches the old ones, and materializations tied to the
    /// old allocations must not outlive them.
    pub fn replace_all(&self, records: impl IntoIterator<Item = RawSite>) {
        let incoming: Vec<RawSite> = records.into_iter().collect();
        let keep: HashSet<SiteId> = incoming.iter().map(|r| r.id).collect();

        for record in incoming {
            self.records.upsert(record);
        }
        for existing in self.records.ids() {
            if !keep.contains(&existing) {
                self.records.remove(existing);
            }
        }

        self.clear_computed();
        tracing::debug!(count = keep.len(), "site record set replaced");
    }

    /// Drop every memoized computed site. Raw records are untouched.
    ///
    /// Infallible; the next lookup per record recomputes lazily.
    pub fn clear_computed(&self) {
        self.computed.clear();
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Set (or clear) the selected site.
    pub fn select(&self, id: Option<SiteId>) {
        self.selected.store(id.map(Arc::new));
    }

    /// Currently selected site ID, if any. A direct register read.
    pub fn selected_site_id(&self) -> Option<SiteId> {
        self.selected.load_full().map(|id| *id)
    }

    /// Computed view of the selected site.
    pub fn selected_site(&self) -> Option<Arc<ComputedSite>> {
        let id = self.selected_site_id()?;
        self.site(id)
    }

    // ── Single-site lookups ──────────────────────────────────────────

    /// Raw record by numeric ID.
    pub fn raw_site(&self, id: SiteId) -> Option<Arc<RawSite>> {
        self.records.get(id)
    }

    /// Raw record by slug.
    pub fn raw_site_by_slug(&self, slug: &str) -> Option<Arc<RawSite>> {
        self.records.get_by_slug(slug)
    }

    /// Computed site by ID or slug.
    ///
    /// Resolution tries the numeric interpretation first, then the slug
    /// (the key `"7"` finds site 7 before a site whose slug is literally
    /// `"7"`). Returns `None` when neither resolves; absence is a normal
    /// outcome, not an error, and misses leave the cache alone.
    ///
    /// The result is memoized per raw-record allocation: while the
    /// underlying record is unchanged, every call returns the same
    /// `Arc<ComputedSite>` without re-deriving attributes.
    pub fn site(&self, key: impl Into<SiteKey>) -> Option<Arc<ComputedSite>> {
        let raw = self.resolve(&key.into())?;
        Some(self.computed.get_or_insert(&raw, || {
            let site = self.site_attrs.attributes(&self.records, raw.id);
            let jetpack = self.jetpack_attrs.attributes(&self.records, raw.id);
            ComputedSite::merged(&raw, site, jetpack)
        }))
    }

    // ── Counts & access ──────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of live materialization-cache entries (diagnostics).
    pub fn computed_len(&self) -> usize {
        self.computed.len()
    }

    /// The underlying record store, as handed to attribute providers.
    pub fn records(&self) -> &SiteRecords {
        &self.records
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Resolve a key to a raw record: ID interpretation first, slug
    /// fallback second.
    fn resolve(&self, key: &SiteKey) -> Option<Arc<RawSite>> {
        match key {
            SiteKey::Id(id) => self
                .records
                .get(*id)
                .or_else(|| self.records.get_by_slug(&id.to_string())),
            SiteKey::Slug(slug) => {
                if let Ok(id) = slug.parse::<u64>() {
                    if let Some(record) = self.records.get(SiteId(id)) {
                        return Some(record);
                    }
                }
                self.records.get_by_slug(slug)
            }
        }
    }
}

impl Default for SiteStore {
    fn default() -> Self {
        Self::new()
    }
}
