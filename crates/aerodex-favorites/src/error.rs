//! Error types for favorites cache operations.

use aerodex_client::ClientError;

/// Errors surfaced by the favorites store.
///
/// By the time a `Mutation` error reaches the caller, the membership set has
/// already been rolled back to its pre-optimistic snapshot; the error exists
/// so the UI can notify the user, not so the caller can repair the cache.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FavoritesError {
    /// A favorite add/remove failed; the optimistic write was rolled back.
    #[error("Favorite mutation failed (rolled back): {source}")]
    Mutation {
        #[source]
        source: ClientError,
    },

    /// Pulling the membership set from the source of truth failed.
    #[error("Membership refresh failed: {source}")]
    Refresh {
        #[source]
        source: ClientError,
    },

    /// Hydrating detail records failed; membership is unaffected.
    #[error("Favorite hydration failed: {source}")]
    Hydration {
        #[source]
        source: ClientError,
    },

    /// A background task died in a way that is not a collaborator failure.
    #[error("Internal favorites task error: {message}")]
    Internal { message: String },
}

impl FavoritesError {
    /// Creates a new `Mutation` error.
    #[must_use]
    pub fn mutation(source: ClientError) -> Self {
        Self::Mutation { source }
    }

    /// Creates a new `Refresh` error.
    #[must_use]
    pub fn refresh(source: ClientError) -> Self {
        Self::Refresh { source }
    }

    /// Creates a new `Hydration` error.
    #[must_use]
    pub fn hydration(source: ClientError) -> Self {
        Self::Hydration { source }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
