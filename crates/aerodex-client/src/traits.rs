//! Collaborator traits for the Aerodex data layer.
//!
//! This module defines the contracts the engine depends on. Implementations
//! must be thread-safe (`Send + Sync`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ClientError;
use aerodex_core::{CatalogEntity, EntityKind, FavoriteRef, Locale};

/// Bulk catalog fetch collaborator.
///
/// One call returns the entire collection for a `(kind, locale)` pair; the
/// engine holds the result in memory and never asks for deltas.
///
/// # Example
///
/// ```ignore
/// use aerodex_client::{CatalogSource, ClientError};
/// use aerodex_core::{EntityKind, Locale};
///
/// async fn airline_count(source: &dyn CatalogSource) -> Result<usize, ClientError> {
///     let airlines = source
///         .fetch_collection(EntityKind::Airline, &Locale::default())
///         .await?;
///     Ok(airlines.len())
/// }
/// ```
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every entity of a kind, localized for the given locale.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` for any transport, decode, or endpoint
    /// failure; the engine surfaces it as-is and performs no retry.
    async fn fetch_collection(
        &self,
        kind: EntityKind,
        locale: &Locale,
    ) -> Result<Vec<CatalogEntity>, ClientError>;
}

/// Remote source of truth for a user's favorites.
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    /// Returns the user's current membership set.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` for any transport, decode, or endpoint
    /// failure.
    async fn fetch_favorite_ids(&self, user: &str) -> Result<Vec<FavoriteRef>, ClientError>;

    /// Hydrates full entity records for the given refs in the given locale.
    ///
    /// The returned list covers exactly the requested refs that still exist
    /// server-side; refs that resolve to nothing are omitted, not errors.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` for any transport, decode, or endpoint
    /// failure.
    async fn fetch_favorite_details(
        &self,
        refs: &[FavoriteRef],
        locale: &Locale,
    ) -> Result<Vec<CatalogEntity>, ClientError>;

    /// Persists one favorite server-side.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` on failure; the caller rolls back its
    /// optimistic state before surfacing it.
    async fn add_favorite(&self, user: &str, target: &FavoriteRef) -> Result<(), ClientError>;

    /// Removes one favorite server-side.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` on failure; the caller rolls back its
    /// optimistic state before surfacing it.
    async fn remove_favorite(&self, user: &str, target: &FavoriteRef) -> Result<(), ClientError>;
}

/// Type alias for a shareable catalog source.
pub type DynCatalogSource = Arc<dyn CatalogSource>;

/// Type alias for a shareable favorites backend.
pub type DynFavoritesBackend = Arc<dyn FavoritesBackend>;
