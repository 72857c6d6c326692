//! Optimistic favorites store.
//!
//! The store owns two related cached views for one user:
//! - the **membership set** (`(id, kind)` pairs, localeless), held behind an
//!   `ArcSwap` so reads are lock-free and writes replace it wholesale;
//! - the **detail cache** (hydrated entities for the current locale),
//!   strictly derived from the membership set.
//!
//! Mutations apply optimistically, then either invalidate both views on
//! backend success or restore the exact pre-write snapshot on failure. A
//! mutation aborts any in-flight membership refresh before writing, and the
//! refresh task only stores its result under the mutation lock, so a stale
//! response can never overwrite an optimistic write.

use crate::error::FavoritesError;
use crate::mutation::{MembershipSet, MutationOp, MutationRecord};
use aerodex_client::{ClientError, DynFavoritesBackend};
use aerodex_core::{CatalogEntity, FavoriteRef, Locale};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex as StdMutex, RwLock as StdRwLock};
use tokio::sync::{Mutex as AsyncMutex, RwLock as AsyncRwLock};
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// The hydrated detail view over the membership set.
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub entities: Vec<CatalogEntity>,
    pub error: Option<ClientError>,
    pub is_loading: bool,
}

struct StoreInner {
    user: String,
    backend: DynFavoritesBackend,
    locale: StdRwLock<Locale>,
    membership: ArcSwap<MembershipSet>,
    details: AsyncRwLock<DetailState>,
    refresh_task: StdMutex<Option<AbortHandle>>,
    // serializes mutations (arrival order) and guards membership stores
    // against resolved-but-unstored refreshes
    mutation_lock: AsyncMutex<()>,
    last_mutation: StdRwLock<Option<MutationRecord>>,
}

/// Favorites cache for one user.
///
/// Cheap to clone (all state is shared); create one per signed-in user and
/// call [`teardown`](Self::teardown) on logout. There is no ambient
/// singleton — the store is an explicit dependency of whatever uses it.
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<StoreInner>,
}

impl FavoritesStore {
    pub fn new(user: impl Into<String>, backend: DynFavoritesBackend) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                user: user.into(),
                backend,
                locale: StdRwLock::new(Locale::default()),
                membership: ArcSwap::from_pointee(MembershipSet::new()),
                details: AsyncRwLock::new(DetailState::default()),
                refresh_task: StdMutex::new(None),
                mutation_lock: AsyncMutex::new(()),
                last_mutation: StdRwLock::new(None),
            }),
        }
    }

    /// Builder-style locale override, for stores created mid-session.
    #[must_use]
    pub fn with_locale(self, locale: Locale) -> Self {
        *self.inner.locale.write().expect("locale lock poisoned") = locale;
        self
    }

    pub fn user(&self) -> &str {
        &self.inner.user
    }

    pub fn locale(&self) -> Locale {
        self.inner
            .locale
            .read()
            .expect("locale lock poisoned")
            .clone()
    }

    /// Synchronous membership test; id and kind must both match. Never
    /// touches the network.
    pub fn is_favorite(&self, target: &FavoriteRef) -> bool {
        self.inner.membership.load().contains(target)
    }

    /// The current membership snapshot.
    pub fn membership(&self) -> Arc<MembershipSet> {
        self.inner.membership.load_full()
    }

    /// The last mutation's lifecycle record, if any mutation ran.
    pub fn last_mutation(&self) -> Option<MutationRecord> {
        self.inner
            .last_mutation
            .read()
            .expect("mutation record lock poisoned")
            .clone()
    }

    /// The hydrated detail view for the current locale.
    pub async fn favorite_details(&self) -> DetailState {
        self.inner.details.read().await.clone()
    }

    /// Optimistically add a favorite.
    ///
    /// Idempotent on the visible state: adding an already-present ref does
    /// not change the membership set, but the backend request is still
    /// issued so the caller sees confirmation or failure.
    ///
    /// # Errors
    ///
    /// On backend failure the membership set is restored to its exact
    /// pre-write snapshot before the error is returned.
    pub async fn add(&self, target: FavoriteRef) -> Result<(), FavoritesError> {
        self.mutate(MutationOp::Add, target).await
    }

    /// Optimistically remove a favorite; symmetric to [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// On backend failure the membership set is restored to its exact
    /// pre-write snapshot before the error is returned.
    pub async fn remove(&self, target: FavoriteRef) -> Result<(), FavoritesError> {
        self.mutate(MutationOp::Remove, target).await
    }

    async fn mutate(&self, op: MutationOp, target: FavoriteRef) -> Result<(), FavoritesError> {
        let inner = &self.inner;
        let _guard = inner.mutation_lock.lock().await;
        inner.cancel_refresh();

        let snapshot = inner.membership.load_full();
        let mut record = MutationRecord::new(op, target.clone());
        record.mark_pending(Arc::clone(&snapshot));

        let mut next = (*snapshot).clone();
        let changed = match op {
            MutationOp::Add => next.insert(target.clone()),
            MutationOp::Remove => next.remove(&target),
        };
        if !changed {
            debug!(favorite = %target, "optimistic apply was a no-op, request still issued");
        }
        inner.membership.store(Arc::new(next));
        inner.record_mutation(record.clone());

        let result = match op {
            MutationOp::Add => inner.backend.add_favorite(&inner.user, &target).await,
            MutationOp::Remove => inner.backend.remove_favorite(&inner.user, &target).await,
        };

        // a refresh that started while the backend call was in flight holds
        // a response from before this mutation; it must not land either
        inner.cancel_refresh();

        match result {
            Ok(()) => {
                record.mark_committed();
                inner.record_mutation(record);
                debug!(favorite = %target, "favorite mutation committed");

                // invalidate both cached views; the optimistic state is
                // already correct, so failures here only degrade freshness
                if let Err(err) = inner.reconcile_membership().await {
                    warn!(error = %err, "membership reconcile after commit failed");
                }
                if let Err(err) = inner.refresh_details().await {
                    warn!(error = %err, "detail rehydration after commit failed");
                }
                Ok(())
            }
            Err(err) => {
                if let Some(snapshot) = record.mark_rolled_back() {
                    inner.membership.store(snapshot);
                }
                inner.record_mutation(record);
                warn!(favorite = %target, error = %err, "favorite mutation failed, rolled back");
                Err(FavoritesError::mutation(err))
            }
        }
    }

    /// Pull the membership set from the source of truth, then rehydrate the
    /// detail cache.
    ///
    /// A refresh superseded by a mutation is cancelled silently — the
    /// optimistic state is newer than whatever the refresh fetched.
    ///
    /// # Errors
    ///
    /// Returns `Refresh` for membership fetch failures and `Hydration` for
    /// detail fetch failures.
    pub async fn refresh(&self) -> Result<(), FavoritesError> {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let ids = inner
                .backend
                .fetch_favorite_ids(&inner.user)
                .await
                .map_err(FavoritesError::refresh)?;
            {
                // taking the mutation lock here means a response that
                // resolved mid-mutation parks until the mutation settles —
                // and the mutation's abort reaps it at this await
                let _guard = inner.mutation_lock.lock().await;
                inner
                    .membership
                    .store(Arc::new(ids.into_iter().collect::<MembershipSet>()));
            }
            inner.refresh_details().await
        });
        *self
            .inner
            .refresh_task
            .lock()
            .expect("refresh task lock poisoned") = Some(task.abort_handle());

        match task.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => {
                debug!("membership refresh superseded by a mutation");
                Ok(())
            }
            Err(join_err) => Err(FavoritesError::internal(join_err.to_string())),
        }
    }

    /// Switch locale and rehydrate the detail cache; membership is
    /// localeless and unaffected.
    ///
    /// # Errors
    ///
    /// Returns `Hydration` when the detail fetch fails.
    pub async fn set_locale(&self, locale: Locale) -> Result<(), FavoritesError> {
        {
            let mut current = self.inner.locale.write().expect("locale lock poisoned");
            if *current == locale {
                return Ok(());
            }
            *current = locale;
        }
        self.inner.refresh_details().await
    }

    /// Tear the store down on logout: abort background work and clear both
    /// cached views.
    pub async fn teardown(&self) {
        self.inner.cancel_refresh();
        self.inner.membership.store(Arc::new(MembershipSet::new()));
        *self.inner.details.write().await = DetailState::default();
        *self
            .inner
            .last_mutation
            .write()
            .expect("mutation record lock poisoned") = None;
        debug!(user = %self.inner.user, "favorites store torn down");
    }
}

impl StoreInner {
    fn cancel_refresh(&self) {
        if let Some(handle) = self
            .refresh_task
            .lock()
            .expect("refresh task lock poisoned")
            .take()
        {
            handle.abort();
        }
    }

    fn record_mutation(&self, record: MutationRecord) {
        *self
            .last_mutation
            .write()
            .expect("mutation record lock poisoned") = Some(record);
    }

    /// Refetch the membership set directly; callers hold the mutation lock.
    async fn reconcile_membership(&self) -> Result<(), FavoritesError> {
        let ids = self
            .backend
            .fetch_favorite_ids(&self.user)
            .await
            .map_err(FavoritesError::refresh)?;
        self.membership
            .store(Arc::new(ids.into_iter().collect::<MembershipSet>()));
        Ok(())
    }

    /// Rehydrate the detail cache from the current membership set.
    ///
    /// An empty membership short-circuits to an empty detail list without a
    /// request. Failures only mark the detail view; membership stays
    /// authoritative.
    async fn refresh_details(&self) -> Result<(), FavoritesError> {
        let members = self.membership.load_full();
        if members.is_empty() {
            let mut details = self.details.write().await;
            details.entities.clear();
            details.error = None;
            details.is_loading = false;
            return Ok(());
        }

        let locale = self.locale.read().expect("locale lock poisoned").clone();
        let mut refs: Vec<FavoriteRef> = members.iter().cloned().collect();
        refs.sort_by(|a, b| (a.kind.as_str(), &a.id).cmp(&(b.kind.as_str(), &b.id)));

        self.details.write().await.is_loading = true;
        match self.backend.fetch_favorite_details(&refs, &locale).await {
            Ok(entities) => {
                let mut details = self.details.write().await;
                details.entities = entities;
                details.error = None;
                details.is_loading = false;
                Ok(())
            }
            Err(err) => {
                let mut details = self.details.write().await;
                details.error = Some(err.clone());
                details.is_loading = false;
                Err(FavoritesError::hydration(err))
            }
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        if let Some(handle) = self
            .refresh_task
            .lock()
            .expect("refresh task lock poisoned")
            .take()
        {
            handle.abort();
        }
    }
}
