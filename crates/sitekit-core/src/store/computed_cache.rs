// ── Computed-site materialization cache ──
//
// Memoizes the raw-record -> computed-site derivation per record
// *identity* (the `Arc` allocation), not per ID: during a state
// transition two record allocations with the same ID can coexist, and
// each gets its own entry. Entries hold only a `Weak` handle to the raw
// record, so the cache never extends a stale record's lifetime.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::model::{ComputedSite, RawSite};

/// One memoized derivation.
struct CacheSlot {
    /// The record this entry was computed from. Upgrading and comparing
    /// with `ptr_eq` guards against the allocator reusing a reclaimed
    /// address for an unrelated record.
    raw: Weak<RawSite>,
    computed: Arc<ComputedSite>,
}

/// Identity-keyed cache of computed sites.
///
/// Keys are raw-record allocation addresses. The check-then-insert in
/// [`get_or_insert`](Self::get_or_insert) runs under the owning shard's
/// entry lock, so concurrent callers racing on the same record agree on
/// a single computed allocation.
pub(crate) struct ComputedCache {
    entries: DashMap<usize, CacheSlot>,
}

impl ComputedCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the memoized computed site for `raw`, deriving it with
    /// `compute` on first sight of this record allocation.
    pub(crate) fn get_or_insert(
        &self,
        raw: &Arc<RawSite>,
        compute: impl FnOnce() -> ComputedSite,
    ) -> Arc<ComputedSite> {
        let key = Arc::as_ptr(raw) as usize;

        let mut inserted = false;
        let computed = match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                if let Some(live) = slot.get().raw.upgrade() {
                    if Arc::ptr_eq(&live, raw) {
                        return Arc::clone(&slot.get().computed);
                    }
                }
                // The address was reclaimed and reused by a different
                // record: recompute in place.
                let computed = Arc::new(compute());
                slot.insert(CacheSlot {
                    raw: Arc::downgrade(raw),
                    computed: Arc::clone(&computed),
                });
                inserted = true;
                computed
            }
            Entry::Vacant(slot) => {
                let computed = Arc::new(compute());
                slot.insert(CacheSlot {
                    raw: Arc::downgrade(raw),
                    computed: Arc::clone(&computed),
                });
                inserted = true;
                computed
            }
        };

        // Piggyback housekeeping on misses, outside the entry lock.
        if inserted {
            self.purge_dead();
        }
        computed
    }

    /// Drop entries whose raw record has been reclaimed. Correctness
    /// never depends on this running; it only bounds the entry count.
    fn purge_dead(&self) {
        let before = self.entries.len();
        self.entries.retain(|_, slot| slot.raw.strong_count() > 0);
        let purged = before - self.entries.len();
        if purged > 0 {
            tracing::trace!(purged, "dropped cache entries for reclaimed records");
        }
    }

    /// Discard every entry.
    pub(crate) fn clear(&self) {
        self.entries.clear();
        tracing::debug!("computed-site cache cleared");
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::SiteId;
    use serde_json::Map;

    fn compute_for(raw: &Arc<RawSite>) -> ComputedSite {
        ComputedSite::merged(raw, Map::new(), Map::new())
    }

    #[test]
    fn second_lookup_returns_same_allocation() {
        let cache = ComputedCache::new();
        let raw = Arc::new(RawSite::new(7u64, Some("example")));

        let first = cache.get_or_insert(&raw, || compute_for(&raw));
        let second = cache.get_or_insert(&raw, || compute_for(&raw));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn second_lookup_skips_recomputation() {
        let cache = ComputedCache::new();
        let raw = Arc::new(RawSite::new(7u64, None));

        cache.get_or_insert(&raw, || compute_for(&raw));
        // A hit must return the cached value without running `compute`.
        let hit = cache.get_or_insert(&raw, || panic!("recomputed on a cache hit"));
        assert_eq!(hit.id, SiteId(7));
    }

    #[test]
    fn distinct_allocations_with_same_id_get_distinct_entries() {
        let cache = ComputedCache::new();
        let a = Arc::new(RawSite::new(7u64, None).with_attr("name", "A"));
        let b = Arc::new(RawSite::new(7u64, None).with_attr("name", "B"));

        let computed_a = cache.get_or_insert(&a, || compute_for(&a));
        let computed_b = cache.get_or_insert(&b, || compute_for(&b));

        assert!(!Arc::ptr_eq(&computed_a, &computed_b));
        assert_eq!(computed_a.attr_str("name"), Some("A"));
        assert_eq!(computed_b.attr_str("name"), Some("B"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn entry_does_not_keep_record_alive() {
        let cache = ComputedCache::new();
        let raw = Arc::new(RawSite::new(7u64, None));
        cache.get_or_insert(&raw, || compute_for(&raw));

        let weak = Arc::downgrade(&raw);
        drop(raw);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn dead_entries_are_purged_on_next_miss() {
        let cache = ComputedCache::new();
        let dead = Arc::new(RawSite::new(1u64, None));
        cache.get_or_insert(&dead, || compute_for(&dead));
        drop(dead);
        assert_eq!(cache.len(), 1);

        let live = Arc::new(RawSite::new(2u64, None));
        cache.get_or_insert(&live, || compute_for(&live));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_discards_everything() {
        let cache = ComputedCache::new();
        let raw = Arc::new(RawSite::new(7u64, None));
        let before = cache.get_or_insert(&raw, || compute_for(&raw));

        cache.clear();
        assert_eq!(cache.len(), 0);

        let after = cache.get_or_insert(&raw, || compute_for(&raw));
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
