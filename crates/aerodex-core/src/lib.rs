//! Core entity model for the Aerodex catalog data layer.
//!
//! This crate defines the types shared by every other Aerodex crate: the
//! opaque [`CatalogEntity`] record, the [`Collection`] it is fetched into,
//! the [`FavoriteRef`] identifying a favorited entity, and the common error
//! taxonomy.
//!
//! # Example
//!
//! ```ignore
//! use aerodex_core::{CatalogEntity, EntityKind};
//! use serde_json::json;
//!
//! let mut airline = CatalogEntity::new("tk".to_string(), EntityKind::Airline);
//! airline.add_field("name".to_string(), json!("Turkish Airlines"));
//! airline.add_field("codes".to_string(), json!({"iata": "TK", "icao": "THY"}));
//!
//! assert_eq!(airline.code_primary(), Some("TK"));
//! ```

pub mod entity;
pub mod error;
pub mod favorite;
pub mod kind;
pub mod locale;

pub use entity::{CatalogEntity, Collection};
pub use error::{CoreError, ErrorCategory, Result};
pub use favorite::FavoriteRef;
pub use kind::EntityKind;
pub use locale::Locale;
