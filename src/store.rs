//! Global Ranking State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. All mutations go
//! through the helpers below so each one is logged once.

use leptos::prelude::*;
use leptos_dragdrop::DropTarget;
use reactive_stores::Store;
use tracing::{debug, info};

use crate::models::{ChipFlavor, FlavorDraft, FlavorId};
use crate::ranking::Ranking;

/// Global ranking state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct RankingState {
    /// Current ranking, rank 1 first
    pub ranking: Ranking,
}

impl RankingState {
    pub fn new(seeded: bool) -> Self {
        Self {
            ranking: if seeded { Ranking::seeded() } else { Ranking::new() },
        }
    }
}

/// Type alias for the store
pub type RankingStore = Store<RankingState>;

/// Get the ranking store from context
pub fn use_ranking_store() -> RankingStore {
    expect_context::<RankingStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append a flavor; `None` when the draft was rejected
pub fn store_add_flavor(store: &RankingStore, draft: &FlavorDraft) -> Option<ChipFlavor> {
    let added = store.ranking().write().add(draft);
    match &added {
        Some(flavor) => info!(id = %flavor.id, name = %flavor.name, "flavor added"),
        None => debug!("flavor draft rejected: blank name"),
    }
    added
}

/// Remove a flavor by id
pub fn store_remove_flavor(store: &RankingStore, id: FlavorId) -> Option<ChipFlavor> {
    let removed = store.ranking().write().remove(id);
    info!(%id, found = removed.is_some(), "flavor removed");
    removed
}

/// Apply a finished drag; returns whether the order changed
pub fn store_drop_flavor(store: &RankingStore, dragged: FlavorId, target: DropTarget<FlavorId>) -> bool {
    let moved = match target {
        DropTarget::Item(over) => store.ranking().write().move_onto(dragged, over),
        DropTarget::Gap(gap) => store.ranking().write().move_into_gap(dragged, gap),
    };
    debug!(%dragged, ?target, moved, "flavor dropped");
    moved
}

/// Empty the ranking
pub fn store_clear(store: &RankingStore) {
    let count = store.ranking().read().len();
    store.ranking().write().clear();
    info!(count, "ranking cleared");
}

/// Replace the whole ranking (import)
pub fn store_replace(store: &RankingStore, ranking: Ranking) {
    info!(count = ranking.len(), "ranking replaced");
    store.ranking().set(ranking);
}
