//! Optimistic favorites cache for the Aerodex data layer.
//!
//! A [`FavoritesStore`] keeps a user's favorite set browsable offline-fast:
//! membership checks are synchronous and lock-free, add/remove apply
//! optimistically and roll back on backend failure, and a hydrated detail
//! list is derived from the membership set for the current locale.
//!
//! # Example
//!
//! ```ignore
//! use aerodex_favorites::FavoritesStore;
//! use aerodex_core::FavoriteRef;
//!
//! let store = FavoritesStore::new("user-42", backend);
//! store.refresh().await?;
//!
//! let tk = FavoriteRef::airline("tk");
//! store.add(tk.clone()).await?;
//! assert!(store.is_favorite(&tk));
//! ```

pub mod error;
pub mod mutation;
pub mod store;

pub use error::FavoritesError;
pub use mutation::{MembershipSet, MutationOp, MutationRecord, MutationState};
pub use store::{DetailState, FavoritesStore};
