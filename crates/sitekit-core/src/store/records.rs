// ── Raw site record storage ──
//
// Lock-free concurrent storage with O(1) lookups by numeric ID and by
// slug. Records are shared as `Arc`s: a lookup never copies payload
// data, and every caller observes the same record allocation until the
// record is replaced.

use std::sync::Arc;

use dashmap::DashMap;

use crate::model::{RawSite, SiteId};

/// Raw-record store for sites.
///
/// The numeric ID is the primary key; slugs are a secondary index kept
/// in sync on every mutation. Lookups hand out `Arc<RawSite>` clones,
/// so the record allocation itself is the stable identity downstream
/// caches key on.
pub struct SiteRecords {
    /// Primary storage: numeric ID -> record.
    by_id: DashMap<SiteId, Arc<RawSite>>,

    /// Secondary index: slug -> numeric ID.
    slug_to_id: DashMap<String, SiteId>,

    /// Reverse of `slug_to_id` for efficient cleanup on replacement.
    id_to_slug: DashMap<SiteId, String>,
}

impl SiteRecords {
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
            slug_to_id: DashMap::new(),
            id_to_slug: DashMap::new(),
        }
    }

    /// Insert or replace a record. Returns `true` if the ID was new.
    pub fn upsert(&self, record: RawSite) -> bool {
        let id = record.id;
        let slug = record.slug.clone();

        // Drop the stale slug mapping if this ID previously carried a
        // different slug. `remove_if` keeps a mapping another ID has
        // since claimed.
        if let Some(old_slug) = self.id_to_slug.get(&id) {
            if slug.as_deref() != Some(old_slug.as_str()) {
                self.slug_to_id
                    .remove_if(old_slug.as_str(), |_, owner| *owner == id);
            }
        }

        let is_new = !self.by_id.contains_key(&id);
        self.by_id.insert(id, Arc::new(record));
        match slug {
            Some(slug) => {
                self.slug_to_id.insert(slug.clone(), id);
                self.id_to_slug.insert(id, slug);
            }
            None => {
                self.id_to_slug.remove(&id);
            }
        }

        is_new
    }

    /// Remove a record by ID. Returns the removed record if it existed.
    pub fn remove(&self, id: SiteId) -> Option<Arc<RawSite>> {
        let removed = self.by_id.remove(&id).map(|(_, record)| record);
        if removed.is_some() {
            if let Some((_, slug)) = self.id_to_slug.remove(&id) {
                self.slug_to_id.remove_if(&slug, |_, owner| *owner == id);
            }
        }
        removed
    }

    /// Look up a record by its numeric ID.
    pub fn get(&self, id: SiteId) -> Option<Arc<RawSite>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    /// Look up a record by its slug (secondary index).
    pub fn get_by_slug(&self, slug: &str) -> Option<Arc<RawSite>> {
        let id = self.slug_to_id.get(slug)?;
        self.by_id.get(id.value()).map(|r| Arc::clone(r.value()))
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.by_id.clear();
        self.slug_to_id.clear();
        self.id_to_slug.clear();
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Return all current IDs in the store.
    pub fn ids(&self) -> Vec<SiteId> {
        self.by_id.iter().map(|r| *r.key()).collect()
    }
}

impl Default for SiteRecords {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upsert_returns_true_for_new_id() {
        let records = SiteRecords::new();
        assert!(records.upsert(RawSite::new(1u64, Some("one"))));
    }

    #[test]
    fn upsert_returns_false_for_existing_id() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("one")));
        assert!(!records.upsert(RawSite::new(1u64, Some("one"))));
    }

    #[test]
    fn get_by_id_and_slug() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("one")).with_attr("name", "One"));

        assert_eq!(records.get(SiteId(1)).unwrap().attr_str("name"), Some("One"));
        assert_eq!(
            records.get_by_slug("one").unwrap().attr_str("name"),
            Some("One")
        );
    }

    #[test]
    fn id_and_slug_lookups_share_one_allocation() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("one")));

        let by_id = records.get(SiteId(1)).unwrap();
        let by_slug = records.get_by_slug("one").unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_slug));
    }

    #[test]
    fn remove_cleans_up_indexes() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("one")));

        let removed = records.remove(SiteId(1));
        assert_eq!(removed.unwrap().id, SiteId(1));
        assert!(records.get(SiteId(1)).is_none());
        assert!(records.get_by_slug("one").is_none());
        assert!(records.is_empty());
    }

    #[test]
    fn upsert_with_changed_slug_drops_stale_mapping() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("old-slug")));
        assert!(records.get_by_slug("old-slug").is_some());

        records.upsert(RawSite::new(1u64, Some("new-slug")));
        assert!(records.get_by_slug("old-slug").is_none());
        assert!(records.get_by_slug("new-slug").is_some());
    }

    #[test]
    fn upsert_dropping_slug_clears_index() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("one")));

        records.upsert(RawSite::new(1u64, None));
        assert!(records.get_by_slug("one").is_none());
        assert!(records.get(SiteId(1)).is_some());
    }

    #[test]
    fn slug_reclaimed_by_other_id_survives_removal() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("shared")));
        // ID 2 claims the slug; ID 1 still has a stale reverse entry.
        records.upsert(RawSite::new(2u64, Some("shared")));

        records.remove(SiteId(1));
        assert_eq!(records.get_by_slug("shared").unwrap().id, SiteId(2));
    }

    #[test]
    fn clear_empties_everything() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, Some("one")));
        records.upsert(RawSite::new(2u64, None));
        assert_eq!(records.len(), 2);

        records.clear();
        assert!(records.is_empty());
        assert!(records.get_by_slug("one").is_none());
    }

    #[test]
    fn ids_lists_current_records() {
        let records = SiteRecords::new();
        records.upsert(RawSite::new(1u64, None));
        records.upsert(RawSite::new(2u64, None));

        let mut ids = records.ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![SiteId(1), SiteId(2)]);
    }
}
