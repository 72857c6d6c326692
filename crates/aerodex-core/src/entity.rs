use crate::{EntityKind, Locale};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use time::OffsetDateTime;

/// One catalog record (an airline or an airport) as returned by the bulk
/// fetch.
///
/// The record is opaque to the engine: besides the stable `id` and the
/// `kind`, everything lives in a free-form JSON field map. The accessors
/// below cover the fields the query layer reads (search text, short codes,
/// rating, numeric metrics) and tolerate absent or differently-shaped data
/// by returning `None` rather than panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: String,
    pub kind: EntityKind,
    #[serde(flatten)]
    pub data: HashMap<String, Value>,
}

impl CatalogEntity {
    pub fn new(id: String, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            data: HashMap::new(),
        }
    }

    pub fn with_data(mut self, data: HashMap<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn add_field(&mut self, key: String, value: Value) {
        self.data.insert(key, value);
    }

    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Look up a nested value by dotted path, e.g. `"stats.fleetSize"`.
    ///
    /// Returns `None` if any segment is missing or a non-object is traversed.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// String value at a dotted path, if present.
    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Numeric value at a dotted path.
    ///
    /// Numbers are read directly; numeric strings are parsed, matching the
    /// permissive shape of bulk catalog payloads.
    pub fn number_at(&self, path: &str) -> Option<f64> {
        match self.get_path(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Display name used for list rendering and substring search.
    pub fn display_name(&self) -> Option<&str> {
        self.text_at("name")
    }

    pub fn city(&self) -> Option<&str> {
        self.text_at("city")
    }

    pub fn country(&self) -> Option<&str> {
        self.text_at("country")
    }

    /// Primary short code (IATA).
    pub fn code_primary(&self) -> Option<&str> {
        self.text_at("iataCode")
    }

    /// Secondary short code (ICAO).
    pub fn code_secondary(&self) -> Option<&str> {
        self.text_at("icaoCode")
    }

    pub fn rating(&self) -> Option<f64> {
        self.number_at("rating")
    }
}

/// The full in-memory set of entities for one `(kind, locale)` pair.
///
/// A collection is created by a successful bulk fetch and replaced
/// wholesale on refetch or locale change; it is never mutated element-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub kind: EntityKind,
    pub locale: Locale,
    pub entities: Vec<CatalogEntity>,
    /// Runtime metadata, not part of the wire shape.
    #[serde(skip, default = "OffsetDateTime::now_utc")]
    pub fetched_at: OffsetDateTime,
}

impl Collection {
    pub fn new(kind: EntityKind, locale: Locale, entities: Vec<CatalogEntity>) -> Self {
        Self {
            kind,
            locale,
            entities,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
