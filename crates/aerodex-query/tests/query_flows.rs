//! End-to-end query flows: search, filter, and pagination composed through
//! the public engine surface.

use aerodex_client::{CatalogSource, ClientError};
use aerodex_core::{CatalogEntity, EntityKind, Locale};
use aerodex_query::{FilterSet, QueryEngine, QueryOptions};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::advance;

struct StaticSource {
    entities: Vec<CatalogEntity>,
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_collection(
        &self,
        _kind: EntityKind,
        _locale: &Locale,
    ) -> Result<Vec<CatalogEntity>, ClientError> {
        Ok(self.entities.clone())
    }
}

fn airline(id: &str, iata: &str, name: &str, region: &str, fleet_size: i64) -> CatalogEntity {
    let mut entity = CatalogEntity::new(id.to_string(), EntityKind::Airline);
    entity.add_field("iataCode".to_string(), json!(iata));
    entity.add_field("name".to_string(), json!(name));
    entity.add_field("region".to_string(), json!(region));
    entity.add_field("stats".to_string(), json!({ "fleetSize": fleet_size }));
    entity
}

fn catalog() -> Vec<CatalogEntity> {
    vec![
        airline("1", "TK", "Turkish Airlines", "EU", 371),
        airline("2", "LH", "Lufthansa", "EU", 710),
        airline("3", "AF", "Air France", "EU", 250),
        airline("4", "DL", "Delta Air Lines", "NA", 980),
    ]
}

async fn settled_engine(entities: Vec<CatalogEntity>) -> QueryEngine {
    let engine = QueryEngine::new(
        EntityKind::Airline,
        Arc::new(StaticSource { entities }),
        QueryOptions::default(),
    );
    engine.refresh(&Locale::default()).await.unwrap();
    engine
}

async fn settle(engine: &QueryEngine, term: &str) {
    engine.set_search_term(term);
    tokio::task::yield_now().await; // arm the spawned timer before advancing the clock
    advance(Duration::from_millis(500)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn exact_code_beats_substring_hits() {
    let engine = settled_engine(catalog()).await;

    // "tk" appears nowhere as a substring except the TK code itself, and
    // the code match wins outright even lowercased
    settle(&engine, "tk").await;
    let view = engine.snapshot();
    assert_eq!(view.filtered_total, 1);
    assert_eq!(view.visible_items[0].id, "1");
}

#[tokio::test(start_paused = true)]
async fn region_filter_applies_regardless_of_term() {
    let engine = settled_engine(catalog()).await;
    engine.set_filters(FilterSet::new().with("region", "NA"));

    let view = engine.snapshot();
    assert_eq!(view.filtered_total, 1);
    assert_eq!(view.visible_items[0].id, "4");

    // "air" matches several names, but the region filter still restricts
    settle(&engine, "air").await;
    let view = engine.snapshot();
    assert_eq!(view.filtered_total, 1);
    assert_eq!(view.visible_items[0].id, "4");
}

#[tokio::test(start_paused = true)]
async fn search_and_range_filter_compose() {
    let engine = settled_engine(catalog()).await;

    settle(&engine, "air").await;
    engine.set_filters(FilterSet::new().with("fleet_size", "300+"));
    let view = engine.snapshot();
    // "Turkish Airlines", "Air France", "Delta Air Lines" match the term;
    // only Turkish Airlines and Delta clear the fleet bound
    assert_eq!(view.filtered_total, 2);
    let ids: Vec<&str> = view.visible_items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4"]);
}

#[tokio::test(start_paused = true)]
async fn pagination_resets_on_new_query() {
    let mut entities = Vec::new();
    for i in 0..45 {
        entities.push(airline(
            &format!("bulk-{i}"),
            "XX",
            &format!("Bulk Carrier {i}"),
            "EU",
            10,
        ));
    }
    let engine = settled_engine(entities).await;

    engine.load_more();
    engine.load_more();
    let view = engine.snapshot();
    assert_eq!(view.visible_items.len(), 45);
    assert!(!view.has_more);

    settle(&engine, "bulk").await;
    let view = engine.snapshot();
    assert_eq!(view.visible_items.len(), 20);
    assert_eq!(view.filtered_total, 45);
    assert!(view.has_more);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_term_restores_the_catalog() {
    let engine = settled_engine(catalog()).await;

    settle(&engine, "lufthansa").await;
    assert_eq!(engine.snapshot().filtered_total, 1);

    settle(&engine, "").await;
    assert_eq!(engine.snapshot().filtered_total, 4);
}
