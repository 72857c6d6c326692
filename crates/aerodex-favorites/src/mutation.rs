//! Mutation lifecycle for optimistic favorite writes.
//!
//! Every add/remove runs through one [`MutationRecord`]:
//! `Idle → Pending{snapshot} → Committed | RolledBack`. The pre-optimistic
//! snapshot lives inside the `Pending` state, so rollback restores exactly
//! what was captured and nothing else. Tests assert on these transitions
//! directly instead of probing ad hoc flags.

use aerodex_core::FavoriteRef;
use std::collections::HashSet;
use std::sync::Arc;

/// The membership set as held by the store: a wholesale-replaced snapshot.
pub type MembershipSet = HashSet<FavoriteRef>;

/// Which way a mutation moves the membership set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Add,
    Remove,
}

/// Lifecycle state of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    /// Created, nothing applied yet.
    Idle,
    /// Optimistic write applied; the pre-write snapshot is held for
    /// rollback.
    Pending { snapshot: Arc<MembershipSet> },
    /// The backend confirmed; caches were invalidated.
    Committed,
    /// The backend refused; the snapshot was restored.
    RolledBack,
}

/// One optimistic mutation and its lifecycle.
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub op: MutationOp,
    pub target: FavoriteRef,
    state: MutationState,
}

impl MutationRecord {
    pub fn new(op: MutationOp, target: FavoriteRef) -> Self {
        Self {
            op,
            target,
            state: MutationState::Idle,
        }
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// True once the mutation reached a terminal state.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            MutationState::Committed | MutationState::RolledBack
        )
    }

    /// The snapshot captured at optimistic-apply time, while still pending.
    pub fn snapshot(&self) -> Option<&Arc<MembershipSet>> {
        match &self.state {
            MutationState::Pending { snapshot } => Some(snapshot),
            _ => None,
        }
    }

    /// Record the optimistic apply, capturing the pre-write snapshot.
    pub fn mark_pending(&mut self, snapshot: Arc<MembershipSet>) {
        debug_assert!(matches!(self.state, MutationState::Idle));
        self.state = MutationState::Pending { snapshot };
    }

    /// Record backend confirmation.
    pub fn mark_committed(&mut self) {
        debug_assert!(matches!(self.state, MutationState::Pending { .. }));
        self.state = MutationState::Committed;
    }

    /// Record backend failure, yielding the snapshot to restore.
    pub fn mark_rolled_back(&mut self) -> Option<Arc<MembershipSet>> {
        match std::mem::replace(&mut self.state, MutationState::RolledBack) {
            MutationState::Pending { snapshot } => Some(snapshot),
            other => {
                debug_assert!(false, "rollback from non-pending state {other:?}");
                None
            }
        }
    }
}
