use std::collections::{HashMap, HashSet};

use sightline_core::layers::LayerId;
use sightline_core::query::LayerAccess;
use sightline_core::types::ColliderId;

/// Per-collider original-layer record enabling restoration.
///
/// Invariant: an entry exists for a collider if and only if that collider
/// is currently reassigned to the override layer. Entries are created on
/// first override and removed exactly once, when the collider is restored
/// (or purged because its handle went stale).
#[derive(Debug, Default)]
pub struct LayerLedger {
    entries: HashMap<ColliderId, LayerId>,
}

impl LayerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ColliderId) -> bool {
        self.entries.contains_key(&id)
    }

    /// The layer recorded for a ledgered collider.
    pub fn original_layer(&self, id: ColliderId) -> Option<LayerId> {
        self.entries.get(&id).copied()
    }

    /// Reassign `id` to `new_layer`, capturing its current layer first.
    /// No-op (returning false) when the collider is already ledgered: the
    /// recorded original is never clobbered by the override layer on a
    /// later pass. Returns whether a new entry was created.
    pub fn override_layer<S: LayerAccess>(
        &mut self,
        layers: &mut S,
        id: ColliderId,
        new_layer: LayerId,
    ) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        let Some(original) = layers.layer(id) else {
            return false;
        };
        if !layers.set_layer(id, new_layer) {
            return false;
        }
        self.entries.insert(id, original);
        true
    }

    /// Restore `id` to its recorded layer and drop the entry. Safe no-op
    /// when not ledgered; calling twice is not an error.
    pub fn restore<S: LayerAccess>(&mut self, layers: &mut S, id: ColliderId) {
        if let Some(original) = self.entries.remove(&id) {
            layers.set_layer(id, original);
        }
    }

    /// Restore every ledgered collider and clear the ledger.
    pub fn restore_all<S: LayerAccess>(&mut self, layers: &mut S) {
        for (id, original) in self.entries.drain() {
            layers.set_layer(id, original);
        }
    }

    /// Restore every ledgered collider not in `keep`. Reconciles one
    /// frame's occluder set against the previous frame's.
    pub fn restore_all_except<S: LayerAccess>(
        &mut self,
        layers: &mut S,
        keep: &HashSet<ColliderId>,
    ) {
        self.entries.retain(|id, original| {
            if keep.contains(id) {
                return true;
            }
            layers.set_layer(*id, *original);
            false
        });
    }

    /// Drop entries whose collider no longer exists, without writing to
    /// them. Must run before any restore pass.
    pub fn purge_invalid<S: LayerAccess>(&mut self, layers: &S) {
        self.entries.retain(|id, _| layers.layer(*id).is_some());
    }
}
