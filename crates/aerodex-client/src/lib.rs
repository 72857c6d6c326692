//! External collaborator traits for the Aerodex data layer.
//!
//! The query engine and the favorites store never talk to a network
//! themselves; they are driven through the traits defined here. A real
//! application implements them over its HTTP client of choice, tests
//! implement them as small in-process structs.
//!
//! # Example
//!
//! ```ignore
//! use aerodex_client::{CatalogSource, ClientError};
//! use aerodex_core::{CatalogEntity, EntityKind, Locale};
//!
//! async fn load_airlines(
//!     source: &dyn CatalogSource,
//! ) -> Result<Vec<CatalogEntity>, ClientError> {
//!     source.fetch_collection(EntityKind::Airline, &Locale::default()).await
//! }
//! ```

pub mod error;
pub mod traits;

pub use error::ClientError;
pub use traits::{CatalogSource, DynCatalogSource, DynFavoritesBackend, FavoritesBackend};
