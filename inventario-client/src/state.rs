//! Published view state
//!
//! One `watch` cell holds everything the list view renders from: the
//! product collection, the load status flags, and the in-flight operation
//! markers. Busy markers are owned by RAII guards so they are released on
//! every exit path, including failures.

use std::collections::HashSet;

use shared::models::Product;
use tokio::sync::watch;

/// Snapshot of the list view's state
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    pub products: Vec<Product>,
    /// Whole-collection load in progress
    pub loading: bool,
    /// Last load attempt failed (mutually exclusive with `loading`)
    pub load_error: bool,
    /// A create is in flight (single-flight for the whole view)
    pub creating: bool,
    /// Ids with a delete in flight
    pub deleting_ids: HashSet<i64>,
    /// Ids with an edit in flight
    pub editing_ids: HashSet<i64>,
}

/// Which per-id busy marker a guard owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyKind {
    Edit,
    Delete,
}

fn ids_for(state: &mut InventoryState, kind: BusyKind) -> &mut HashSet<i64> {
    match kind {
        BusyKind::Edit => &mut state.editing_ids,
        BusyKind::Delete => &mut state.deleting_ids,
    }
}

/// RAII holder of a per-id busy marker
///
/// Acquisition is an atomic test-and-set inside the watch cell; a second
/// acquisition for a held id fails instead of queueing (drop-on-busy).
/// Dropping the guard releases the marker and notifies subscribers.
pub struct BusyGuard<'a> {
    state: &'a watch::Sender<InventoryState>,
    kind: BusyKind,
    id: i64,
}

impl<'a> BusyGuard<'a> {
    pub fn try_acquire(
        state: &'a watch::Sender<InventoryState>,
        kind: BusyKind,
        id: i64,
    ) -> Option<Self> {
        let mut acquired = false;
        state.send_modify(|s| {
            acquired = ids_for(s, kind).insert(id);
        });
        // No guard may exist on the failure path: Drop releases the marker.
        if acquired { Some(Self { state, kind, id }) } else { None }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| {
            ids_for(s, self.kind).remove(&self.id);
        });
    }
}

/// RAII holder of the global create marker
pub struct CreateGuard<'a> {
    state: &'a watch::Sender<InventoryState>,
}

impl<'a> CreateGuard<'a> {
    pub fn try_acquire(state: &'a watch::Sender<InventoryState>) -> Option<Self> {
        let mut acquired = false;
        state.send_modify(|s| {
            acquired = !s.creating;
            s.creating = true;
        });
        if acquired { Some(Self { state }) } else { None }
    }
}

impl Drop for CreateGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.creating = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_guard_is_drop_on_busy_per_id() {
        let (state, _rx) = watch::channel(InventoryState::default());

        let first = BusyGuard::try_acquire(&state, BusyKind::Edit, 1).unwrap();
        assert!(BusyGuard::try_acquire(&state, BusyKind::Edit, 1).is_none());
        // Different id and different kind are independent
        let _other = BusyGuard::try_acquire(&state, BusyKind::Edit, 2).unwrap();
        let _delete = BusyGuard::try_acquire(&state, BusyKind::Delete, 1).unwrap();

        drop(first);
        assert!(!state.borrow().editing_ids.contains(&1));
        assert!(BusyGuard::try_acquire(&state, BusyKind::Edit, 1).is_some());
    }

    #[test]
    fn create_guard_is_single_flight() {
        let (state, _rx) = watch::channel(InventoryState::default());

        let guard = CreateGuard::try_acquire(&state).unwrap();
        assert!(state.borrow().creating);
        assert!(CreateGuard::try_acquire(&state).is_none());

        drop(guard);
        assert!(!state.borrow().creating);
        assert!(CreateGuard::try_acquire(&state).is_some());
    }
}
