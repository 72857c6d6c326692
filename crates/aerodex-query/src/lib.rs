//! Search, filter, and pagination engine over in-memory Aerodex catalogs.
//!
//! This crate is the read side of the data layer: given a collection bulk
//! fetched through [`aerodex_client::CatalogSource`], a [`QueryEngine`]
//! exposes a debounced search term, a multi-criteria [`FilterSet`], and an
//! incremental page window, and derives the visible slice from them on
//! every [`QueryEngine::snapshot`] call.
//!
//! # Example
//!
//! ```ignore
//! use aerodex_query::{FilterSet, QueryEngine, QueryOptions};
//! use aerodex_core::{EntityKind, Locale};
//!
//! let engine = QueryEngine::new(EntityKind::Airline, source, QueryOptions::default());
//! engine.refresh(&Locale::default()).await?;
//!
//! engine.set_search_term("luft");
//! engine.set_filters(FilterSet::new().with("region", "EU"));
//!
//! let view = engine.snapshot();
//! for airline in &view.visible_items {
//!     println!("{}", airline.display_name().unwrap_or("?"));
//! }
//! ```

pub mod debounce;
pub mod engine;
pub mod filter;
pub mod options;
pub mod range;
pub mod registry;
pub mod search;

pub use debounce::{DebounceSettings, Debouncer};
pub use engine::{CollectionStatus, QueryEngine, QueryView};
pub use filter::{CompiledFilters, EntityFilter, FilterSet, filter_entities};
pub use options::QueryOptions;
pub use range::RangeBounds;
pub use registry::{FilterKeyDef, FilterKind, filter_keys};
pub use search::search;
