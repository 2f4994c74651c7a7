// ── Payload-to-record ingestion ──
//
// Bridges untyped REST payloads into `RawSite` records. The backend
// spells the identifier `ID` on current endpoints and `id` on older
// ones; both are accepted. Every other field is carried opaquely in the
// record's attrs map.

use serde_json::{Map, Value};

use crate::error::IngestError;
use crate::model::{RawSite, SiteId};

/// Field names the backend uses for the numeric site identifier, in
/// lookup order.
const ID_FIELDS: [&str; 2] = ["ID", "id"];

impl RawSite {
    /// Build a record from an untyped payload object.
    ///
    /// The full object is retained as the record's attrs; only the ID
    /// and `slug` are additionally lifted into typed fields.
    pub fn from_value(payload: Value) -> Result<Self, IngestError> {
        let Value::Object(attrs) = payload else {
            return Err(IngestError::NotAnObject);
        };

        let id = extract_id(&attrs)?;
        let slug = extract_slug(&attrs)?;
        Ok(Self { id, slug, attrs })
    }
}

fn extract_id(attrs: &Map<String, Value>) -> Result<SiteId, IngestError> {
    let raw = ID_FIELDS
        .iter()
        .find_map(|field| attrs.get(*field))
        .ok_or(IngestError::MissingId)?;

    raw.as_u64().map(SiteId).ok_or_else(|| IngestError::InvalidId {
        value: raw.to_string(),
    })
}

fn extract_slug(attrs: &Map<String, Value>) -> Result<Option<String>, IngestError> {
    match attrs.get("slug") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(slug)) => Ok(Some(slug.clone())),
        Some(other) => Err(IngestError::InvalidSlug {
            value: other.to_string(),
        }),
    }
}
