//! Filter key registry.
//!
//! Maps the filter keys a UI may send to the predicate kind and the entity
//! field they constrain. Keys not present here are unknown and impose no
//! constraint (the caller logs and skips them).

use aerodex_core::EntityKind;

/// How a filter key's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive equality against a string field.
    Categorical,
    /// Numeric field must be present and `>=` the threshold.
    MinRating,
    /// Numeric field must fall within a compact range token.
    Range,
}

/// One registered filter key: its predicate kind and the dotted path of the
/// entity field it reads.
#[derive(Debug, Clone, Copy)]
pub struct FilterKeyDef {
    pub key: &'static str,
    pub kind: FilterKind,
    pub path: &'static str,
}

const fn def(key: &'static str, kind: FilterKind, path: &'static str) -> FilterKeyDef {
    FilterKeyDef { key, kind, path }
}

const AIRLINE_KEYS: &[FilterKeyDef] = &[
    def("region", FilterKind::Categorical, "region"),
    def("business_type", FilterKind::Categorical, "businessType"),
    def("business_model", FilterKind::Categorical, "businessModel"),
    def("alliance", FilterKind::Categorical, "alliance"),
    def("min_rating", FilterKind::MinRating, "rating"),
    def("founded", FilterKind::Range, "founded"),
    def("passengers", FilterKind::Range, "stats.passengers"),
    def("employees", FilterKind::Range, "stats.employees"),
    def("destinations", FilterKind::Range, "stats.destinations"),
    def("fleet_size", FilterKind::Range, "stats.fleetSize"),
    def("fleet_age", FilterKind::Range, "stats.fleetAge"),
];

const AIRPORT_KEYS: &[FilterKeyDef] = &[
    def("region", FilterKind::Categorical, "region"),
    def("airport_type", FilterKind::Categorical, "airportType"),
    def("min_rating", FilterKind::MinRating, "rating"),
    def("founded", FilterKind::Range, "founded"),
    def("passengers", FilterKind::Range, "stats.passengers"),
    def("runways", FilterKind::Range, "stats.runways"),
    def("terminals", FilterKind::Range, "stats.terminals"),
    def("cargo", FilterKind::Range, "stats.cargoTonnes"),
];

/// All filter keys registered for a kind.
pub fn filter_keys(kind: EntityKind) -> &'static [FilterKeyDef] {
    match kind {
        EntityKind::Airline => AIRLINE_KEYS,
        EntityKind::Airport => AIRPORT_KEYS,
    }
}

/// Look up a single key, `None` when unregistered for this kind.
pub fn lookup(kind: EntityKind, key: &str) -> Option<&'static FilterKeyDef> {
    filter_keys(kind).iter().find(|def| def.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_keys() {
        let alliance = lookup(EntityKind::Airline, "alliance").unwrap();
        assert_eq!(alliance.kind, FilterKind::Categorical);
        assert_eq!(alliance.path, "alliance");

        let fleet = lookup(EntityKind::Airline, "fleet_size").unwrap();
        assert_eq!(fleet.kind, FilterKind::Range);
        assert_eq!(fleet.path, "stats.fleetSize");

        let rating = lookup(EntityKind::Airport, "min_rating").unwrap();
        assert_eq!(rating.kind, FilterKind::MinRating);
    }

    #[test]
    fn test_keys_are_kind_scoped() {
        assert!(lookup(EntityKind::Airline, "runways").is_none());
        assert!(lookup(EntityKind::Airport, "alliance").is_none());
        // shared keys resolve for both
        assert!(lookup(EntityKind::Airline, "region").is_some());
        assert!(lookup(EntityKind::Airport, "region").is_some());
    }

    #[test]
    fn test_unknown_key() {
        assert!(lookup(EntityKind::Airline, "wingspan").is_none());
    }

    #[test]
    fn test_no_duplicate_keys() {
        for kind in [EntityKind::Airline, EntityKind::Airport] {
            let keys = filter_keys(kind);
            for (i, def) in keys.iter().enumerate() {
                assert!(
                    keys.iter().skip(i + 1).all(|other| other.key != def.key),
                    "duplicate filter key {} for {kind}",
                    def.key
                );
            }
        }
    }
}
