//! Per-kind query orchestration.
//!
//! A [`QueryEngine`] owns the browse state for one entity kind: the
//! collection handed over by the catalog source, the debounced search term,
//! the active filter set, and the incremental page window. Reads go through
//! [`QueryEngine::snapshot`], which recomputes the visible slice from
//! scratch — the collection is the single source of truth and is never
//! patched in place.

use crate::debounce::Debouncer;
use crate::filter::FilterSet;
use crate::options::QueryOptions;
use crate::search::search;
use aerodex_client::{ClientError, DynCatalogSource};
use aerodex_core::{CatalogEntity, Collection, EntityKind, Locale};
use arc_swap::ArcSwap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Lifecycle of the externally fetched collection.
#[derive(Debug)]
pub enum CollectionStatus {
    /// No fetch has been issued yet.
    Idle,
    /// A fetch is in flight; the visible set is empty meanwhile.
    Loading,
    /// The collection is resident and queryable.
    Ready(Arc<Collection>),
    /// The fetch failed; the error is surfaced as-is, no retry here.
    Failed(ClientError),
}

/// Everything a list screen needs for one render pass.
#[derive(Debug, Clone)]
pub struct QueryView {
    pub visible_items: Vec<CatalogEntity>,
    pub filtered_total: usize,
    pub has_more: bool,
    /// The base collection fetch is in flight.
    pub is_loading: bool,
    /// The search input has not settled yet; independent of `is_loading`.
    pub is_search_settling: bool,
    /// The raw term as currently typed (drives the input box).
    pub search_term: String,
    pub filters: FilterSet,
    pub error: Option<ClientError>,
}

struct WindowState {
    filters: FilterSet,
    page_index: usize,
}

/// Search, filter, and pagination engine for one entity kind.
pub struct QueryEngine {
    kind: EntityKind,
    source: DynCatalogSource,
    options: QueryOptions,
    status: ArcSwap<CollectionStatus>,
    window: Arc<RwLock<WindowState>>,
    debouncer: Debouncer,
}

impl QueryEngine {
    pub fn new(kind: EntityKind, source: DynCatalogSource, options: QueryOptions) -> Self {
        let window = Arc::new(RwLock::new(WindowState {
            filters: FilterSet::new(),
            page_index: 1,
        }));
        let settle_window = Arc::clone(&window);
        let debouncer = Debouncer::new(options.debounce_settings(), move |term| {
            // a new settled term invalidates the old page window
            settle_window
                .write()
                .expect("window lock poisoned")
                .page_index = 1;
            debug!(term = %term, "page window reset on settled term change");
        });
        Self {
            kind,
            source,
            options,
            status: ArcSwap::from_pointee(CollectionStatus::Idle),
            window,
            debouncer,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Fetch the collection for `locale`, replacing any resident one
    /// wholesale.
    ///
    /// # Errors
    ///
    /// Surfaces the collaborator's error as-is; the same error remains
    /// visible through [`snapshot`](Self::snapshot) until the next refresh.
    pub async fn refresh(&self, locale: &Locale) -> Result<(), ClientError> {
        self.status.store(Arc::new(CollectionStatus::Loading));
        match self.source.fetch_collection(self.kind, locale).await {
            Ok(entities) => {
                debug!(kind = %self.kind, locale = %locale, count = entities.len(), "collection fetched");
                let collection = Collection::new(self.kind, locale.clone(), entities);
                self.status
                    .store(Arc::new(CollectionStatus::Ready(Arc::new(collection))));
                self.window.write().expect("window lock poisoned").page_index = 1;
                Ok(())
            }
            Err(err) => {
                warn!(kind = %self.kind, locale = %locale, error = %err, "collection fetch failed");
                self.status
                    .store(Arc::new(CollectionStatus::Failed(err.clone())));
                Err(err)
            }
        }
    }

    /// Update the raw search term; the settled term follows after the
    /// debounce delay.
    pub fn set_search_term(&self, raw: &str) {
        self.debouncer.set(raw);
    }

    /// Replace the active filter set synchronously.
    ///
    /// A changed set resets the page window; re-applying the identical set
    /// leaves the window alone.
    pub fn set_filters(&self, filters: FilterSet) {
        let mut window = self.window.write().expect("window lock poisoned");
        if window.filters != filters {
            window.filters = filters;
            window.page_index = 1;
            debug!("page window reset on filter change");
        }
    }

    /// Reveal one more page, if there is one.
    ///
    /// No-op while the base collection is loading or when everything
    /// matching is already visible.
    pub fn load_more(&self) {
        let status = self.status.load_full();
        if matches!(*status, CollectionStatus::Loading) {
            return;
        }
        let filters = self
            .window
            .read()
            .expect("window lock poisoned")
            .filters
            .clone();
        let filtered_total = self.filtered_entities(&status, &filters).len();
        let mut window = self.window.write().expect("window lock poisoned");
        let visible = (window.page_index * self.options.page_size).min(filtered_total);
        if visible < filtered_total {
            window.page_index += 1;
        }
    }

    /// Derive the current view: search, then filter, then paginate.
    pub fn snapshot(&self) -> QueryView {
        let status = self.status.load_full();
        let (filters, page_index) = {
            let window = self.window.read().expect("window lock poisoned");
            (window.filters.clone(), window.page_index)
        };

        let filtered = self.filtered_entities(&status, &filters);
        let filtered_total = filtered.len();
        let visible_count = (page_index * self.options.page_size).min(filtered_total);
        let mut visible_items = filtered;
        visible_items.truncate(visible_count);

        QueryView {
            has_more: visible_count < filtered_total,
            is_loading: matches!(*status, CollectionStatus::Loading),
            is_search_settling: self.debouncer.is_settling(),
            search_term: self.debouncer.raw(),
            error: match &*status {
                CollectionStatus::Failed(err) => Some(err.clone()),
                _ => None,
            },
            filtered_total,
            visible_items,
            filters,
        }
    }

    /// Search runs before filtering so the exact-code short-circuit sees the
    /// full collection; both stages are AND predicates, so the resulting set
    /// is the same either way.
    fn filtered_entities(
        &self,
        status: &CollectionStatus,
        filters: &FilterSet,
    ) -> Vec<CatalogEntity> {
        let CollectionStatus::Ready(collection) = status else {
            return Vec::new();
        };
        let mut result = search(&collection.entities, &self.debouncer.settled());
        let compiled = filters.compile(self.kind);
        if !compiled.is_empty() {
            result.retain(|entity| compiled.matches(entity));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use aerodex_client::CatalogSource;
    use serde_json::json;
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

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch_collection(
            &self,
            _kind: EntityKind,
            _locale: &Locale,
        ) -> Result<Vec<CatalogEntity>, ClientError> {
            Err(ClientError::endpoint(502, "upstream unavailable"))
        }
    }

    struct StalledSource;

    #[async_trait]
    impl CatalogSource for StalledSource {
        async fn fetch_collection(
            &self,
            _kind: EntityKind,
            _locale: &Locale,
        ) -> Result<Vec<CatalogEntity>, ClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    fn airline(id: usize, region: &str) -> CatalogEntity {
        let mut entity = CatalogEntity::new(format!("al-{id}"), EntityKind::Airline);
        entity.add_field("name".to_string(), json!(format!("Airline {id}")));
        entity.add_field("region".to_string(), json!(region));
        entity
    }

    fn engine_with(entities: Vec<CatalogEntity>) -> QueryEngine {
        QueryEngine::new(
            EntityKind::Airline,
            Arc::new(StaticSource { entities }),
            QueryOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_refresh_makes_collection_visible() {
        let engine = engine_with(vec![airline(1, "EU"), airline(2, "NA")]);
        assert!(engine.snapshot().visible_items.is_empty());

        engine.refresh(&Locale::default()).await.unwrap();
        let view = engine.snapshot();
        assert_eq!(view.visible_items.len(), 2);
        assert_eq!(view.filtered_total, 2);
        assert!(!view.has_more);
        assert!(!view.is_loading);
        assert!(view.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_error_and_empty_view() {
        let engine = QueryEngine::new(
            EntityKind::Airline,
            Arc::new(FailingSource),
            QueryOptions::default(),
        );
        let err = engine.refresh(&Locale::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Endpoint { status: 502, .. }));

        let view = engine.snapshot();
        assert!(view.visible_items.is_empty());
        assert_eq!(view.filtered_total, 0);
        assert!(!view.is_loading);
        assert!(view.error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_noop_while_loading() {
        let engine = Arc::new(QueryEngine::new(
            EntityKind::Airline,
            Arc::new(StalledSource),
            QueryOptions::default(),
        ));
        let background = Arc::clone(&engine);
        let refresh = tokio::spawn(async move {
            let _ = background.refresh(&Locale::default()).await;
        });
        tokio::task::yield_now().await;

        let view = engine.snapshot();
        assert!(view.is_loading);

        engine.load_more();
        let view = engine.snapshot();
        assert!(view.visible_items.is_empty());

        refresh.abort();
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let entities: Vec<CatalogEntity> = (0..45).map(|i| airline(i, "EU")).collect();
        let engine = engine_with(entities);
        engine.refresh(&Locale::default()).await.unwrap();

        let view = engine.snapshot();
        assert_eq!(view.visible_items.len(), 20);
        assert_eq!(view.filtered_total, 45);
        assert!(view.has_more);

        engine.load_more();
        assert_eq!(engine.snapshot().visible_items.len(), 40);

        engine.load_more();
        let view = engine.snapshot();
        assert_eq!(view.visible_items.len(), 45);
        assert!(!view.has_more);

        // saturated window: further calls change nothing
        engine.load_more();
        assert_eq!(engine.snapshot().visible_items.len(), 45);
    }

    #[tokio::test]
    async fn test_filter_change_resets_window() {
        let entities: Vec<CatalogEntity> = (0..45).map(|i| airline(i, "EU")).collect();
        let engine = engine_with(entities);
        engine.refresh(&Locale::default()).await.unwrap();
        engine.load_more();
        assert_eq!(engine.snapshot().visible_items.len(), 40);

        engine.set_filters(FilterSet::new().with("region", "EU"));
        let view = engine.snapshot();
        assert_eq!(view.visible_items.len(), 20);
        assert_eq!(view.filtered_total, 45);

        // re-applying the identical set keeps the window
        engine.load_more();
        engine.set_filters(FilterSet::new().with("region", "EU"));
        assert_eq!(engine.snapshot().visible_items.len(), 40);
    }

    #[tokio::test]
    async fn test_filters_restrict_results() {
        let engine = engine_with(vec![airline(1, "EU"), airline(2, "NA"), airline(3, "EU")]);
        engine.refresh(&Locale::default()).await.unwrap();

        engine.set_filters(FilterSet::new().with("region", "EU"));
        let view = engine.snapshot();
        assert_eq!(view.filtered_total, 2);
        let ids: Vec<&str> = view.visible_items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["al-1", "al-3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_term_drives_results() {
        let mut turkish = airline(1, "EU");
        turkish.add_field("iataCode".to_string(), json!("TK"));
        turkish.add_field("name".to_string(), json!("Turkish Airlines"));
        let engine = engine_with(vec![turkish, airline(2, "EU")]);
        engine.refresh(&Locale::default()).await.unwrap();

        engine.set_search_term("TK");
        tokio::task::yield_now().await; // arm the spawned timer before advancing the clock
        // raw updates immediately, results only after settlement
        let view = engine.snapshot();
        assert_eq!(view.search_term, "TK");
        assert_eq!(view.filtered_total, 2);
        assert!(view.is_search_settling);
        assert!(!view.is_loading);

        advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        let view = engine.snapshot();
        assert_eq!(view.filtered_total, 1);
        assert_eq!(view.visible_items[0].id, "al-1");

        advance(Duration::from_millis(300)).await;
        tokio::task::yield_now().await;
        assert!(!engine.snapshot().is_search_settling);
    }

    #[tokio::test(start_paused = true)]
    async fn test_term_settlement_resets_window() {
        let entities: Vec<CatalogEntity> = (0..45).map(|i| airline(i, "EU")).collect();
        let engine = engine_with(entities);
        engine.refresh(&Locale::default()).await.unwrap();
        engine.load_more();
        engine.load_more();
        assert_eq!(engine.snapshot().visible_items.len(), 45);

        engine.set_search_term("airline");
        tokio::task::yield_now().await; // arm the spawned timer before advancing the clock
        advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;

        let view = engine.snapshot();
        assert_eq!(view.visible_items.len(), 20);
        assert!(view.has_more);
    }
}
