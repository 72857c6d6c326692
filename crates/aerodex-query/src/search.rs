//! Free-text search over an in-memory collection.
//!
//! Search runs in two stages: an exact match on the short codes first, then
//! a case-insensitive substring sweep over the text fields. Exact code hits
//! take absolute priority because a user typing `"TK"` wants Turkish
//! Airlines, not every entity whose name happens to contain those letters.

use aerodex_core::CatalogEntity;

/// Return the subset of `entities` matching `term`.
///
/// An empty (or whitespace-only) term matches the whole collection. Missing
/// fields behave as empty strings; absent nested data never causes a panic.
pub fn search(entities: &[CatalogEntity], term: &str) -> Vec<CatalogEntity> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return entities.to_vec();
    }

    let exact: Vec<CatalogEntity> = entities
        .iter()
        .filter(|entity| matches_code(entity, &term))
        .cloned()
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    entities
        .iter()
        .filter(|entity| matches_text(entity, &term))
        .cloned()
        .collect()
}

fn matches_code(entity: &CatalogEntity, term: &str) -> bool {
    code_equals(entity.code_primary(), term) || code_equals(entity.code_secondary(), term)
}

fn code_equals(code: Option<&str>, term: &str) -> bool {
    code.is_some_and(|code| code.eq_ignore_ascii_case(term))
}

fn matches_text(entity: &CatalogEntity, term: &str) -> bool {
    [
        entity.display_name(),
        entity.city(),
        entity.country(),
        entity.code_primary(),
        entity.code_secondary(),
    ]
    .into_iter()
    .any(|field| field.unwrap_or("").to_lowercase().contains(term))
}
