//! Multi-criteria collection filtering.
//!
//! A [`FilterSet`] is the raw key/value map a UI maintains. Compiling it
//! against the per-kind registry yields [`CompiledFilters`], a list of typed
//! predicates evaluated with AND semantics: an entity stays in the result
//! only if it passes every present key. There is no partial-match scoring.

use crate::range::RangeBounds;
use crate::registry::{self, FilterKind};
use aerodex_core::{CatalogEntity, EntityKind};
use indexmap::IndexMap;

/// The active combination of filter constraints, keyed by filter key.
///
/// Absent keys impose no constraint. Values are raw strings exactly as a UI
/// produced them; interpretation happens at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: IndexMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one filter key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Remove one filter key; absent keys are a no-op.
    pub fn clear_key(&mut self, key: &str) {
        self.values.shift_remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve every present key through the registry for `kind`.
    ///
    /// Unknown keys and malformed range tokens are skipped (logged at debug
    /// level): a filter the engine cannot interpret must never hide the
    /// whole catalog.
    pub fn compile(&self, kind: EntityKind) -> CompiledFilters {
        let mut filters = Vec::with_capacity(self.values.len());
        for (key, value) in &self.values {
            let Some(def) = registry::lookup(kind, key) else {
                tracing::debug!(kind = %kind, key = %key, "Unknown filter key, skipping");
                continue;
            };
            match def.kind {
                FilterKind::Categorical => filters.push(EntityFilter::Categorical {
                    path: def.path,
                    value: value.clone(),
                }),
                FilterKind::MinRating => match value.trim().parse::<f64>() {
                    Ok(threshold) => filters.push(EntityFilter::MinRating {
                        path: def.path,
                        threshold,
                    }),
                    Err(_) => {
                        tracing::debug!(key = %key, value = %value, "Unparseable rating threshold, skipping");
                    }
                },
                FilterKind::Range => match RangeBounds::parse(value) {
                    Some(bounds) => filters.push(EntityFilter::Range {
                        path: def.path,
                        bounds,
                    }),
                    None => {
                        tracing::debug!(key = %key, value = %value, "Malformed range token, skipping");
                    }
                },
            }
        }
        CompiledFilters { filters }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

/// One typed predicate compiled from a filter key.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityFilter {
    Categorical { path: &'static str, value: String },
    MinRating { path: &'static str, threshold: f64 },
    Range { path: &'static str, bounds: RangeBounds },
}

impl EntityFilter {
    /// Check if an entity satisfies this predicate.
    pub fn matches(&self, entity: &CatalogEntity) -> bool {
        match self {
            Self::Categorical { path, value } => entity
                .text_at(path)
                .is_some_and(|field| field.eq_ignore_ascii_case(value)),
            Self::MinRating { path, threshold } => entity
                .number_at(path)
                .is_some_and(|rating| rating >= *threshold),
            Self::Range { path, bounds } => entity
                .number_at(path)
                .is_some_and(|value| value.is_finite() && bounds.contains(value)),
        }
    }
}

/// The compiled predicate list for one kind, evaluated with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    filters: Vec<EntityFilter>,
}

impl CompiledFilters {
    /// True when every predicate passes.
    pub fn matches(&self, entity: &CatalogEntity) -> bool {
        self.filters.iter().all(|filter| filter.matches(entity))
    }

    /// Number of predicates that survived compilation.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Return the subset of `entities` passing all compiled filters.
pub fn filter_entities(entities: &[CatalogEntity], filters: &CompiledFilters) -> Vec<CatalogEntity> {
    entities
        .iter()
        .filter(|entity| filters.matches(entity))
        .cloned()
        .collect()
}
