// ── Derived site attributes ──
//
// Providers derive the extra attributes merged onto raw records when a
// computed site is materialized. Two stock providers ship here;
// consumers with richer state can inject their own through
// `SiteStore::with_providers`.

use serde_json::{Map, Value};
use url::Url;

use crate::model::{RawSite, SiteId};
use crate::store::SiteRecords;

/// Derives extra attributes for one site from the current record set.
///
/// Implementations must be pure with respect to the store contents: the
/// same records and ID always produce the same map. Unknown IDs yield
/// an empty map, never an error.
pub trait ComputedAttributes: Send + Sync {
    fn attributes(&self, records: &SiteRecords, id: SiteId) -> Map<String, Value>;
}

// ── Stock provider: general derivations ─────────────────────────────

/// General-purpose derivations every site gets: `domain`, `slug`, and a
/// `title` fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAttributes;

impl ComputedAttributes for StandardAttributes {
    fn attributes(&self, records: &SiteRecords, id: SiteId) -> Map<String, Value> {
        let mut out = Map::new();
        let Some(record) = records.get(id) else {
            return out;
        };

        let domain = record.attr_str("URL").and_then(domain_of);
        if let Some(domain) = &domain {
            out.insert("domain".to_owned(), Value::String(domain.clone()));
        }

        // Slug: the record's own, else the domain stands in.
        if let Some(slug) = record.slug.clone().or_else(|| domain.clone()) {
            out.insert("slug".to_owned(), Value::String(slug));
        }

        // Title: the raw name, else the domain.
        let title = record
            .attr_str("name")
            .map(str::to_owned)
            .or_else(|| domain.clone());
        if let Some(title) = title {
            out.insert("title".to_owned(), Value::String(title));
        }

        out
    }
}

// ── Stock provider: Jetpack feature flags ───────────────────────────

/// Feature-set flags for Jetpack-connected sites.
///
/// Sites without a truthy `jetpack` attr contribute nothing; connected
/// sites get `can_update_files` and the network-topology flags derived
/// from their raw options.
#[derive(Debug, Clone, Copy, Default)]
pub struct JetpackAttributes;

impl ComputedAttributes for JetpackAttributes {
    fn attributes(&self, records: &SiteRecords, id: SiteId) -> Map<String, Value> {
        let mut out = Map::new();
        let Some(record) = records.get(id) else {
            return out;
        };
        if !record
            .attr("jetpack")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return out;
        }

        out.insert(
            "can_update_files".to_owned(),
            Value::Bool(can_update_files(&record)),
        );
        out.insert(
            "is_main_network_site".to_owned(),
            Value::Bool(is_main_network_site(&record)),
        );
        out.insert(
            "is_secondary_network_site".to_owned(),
            Value::Bool(is_secondary_network_site(&record)),
        );
        out
    }
}

// ── Derivation helpers ──────────────────────────────────────────────

/// One entry of the record's `options` object.
fn option<'a>(record: &'a RawSite, key: &str) -> Option<&'a Value> {
    record.attr("options")?.get(key)
}

/// Host of a site URL: scheme dropped, leading `www.` stripped,
/// non-default port kept.
fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

/// File updates are allowed unless the backend reports blockers in
/// `options.file_mod_disabled`.
fn can_update_files(record: &RawSite) -> bool {
    match option(record, "file_mod_disabled") {
        Some(Value::Array(reasons)) => reasons.is_empty(),
        _ => true,
    }
}

/// Hosts of the network's main site and of this site itself, when both
/// are known. The site's own host prefers the unmapped URL: a mapped
/// domain says nothing about network topology.
fn network_hosts(record: &RawSite) -> Option<(String, String)> {
    let main = option(record, "main_network_site")
        .and_then(Value::as_str)
        .and_then(domain_of)?;
    let own = option(record, "unmapped_url")
        .and_then(Value::as_str)
        .or_else(|| record.attr_str("URL"))
        .and_then(domain_of)?;
    Some((main, own))
}

fn is_main_network_site(record: &RawSite) -> bool {
    if option(record, "is_multi_network")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return false;
    }
    network_hosts(record).is_some_and(|(main, own)| main == own)
}

fn is_secondary_network_site(record: &RawSite) -> bool {
    option(record, "is_multi_site")
        .and_then(Value::as_bool)
        .unwrap_or(false)
        && network_hosts(record).is_some_and(|(main, own)| main != own)
}
