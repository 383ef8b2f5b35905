//! Ranking List Component
//!
//! Draggable list of flavors. A row dropped on another row takes its place;
//! a row dropped on a gap lands between the two neighbours.

use leptos::prelude::*;
use leptos_dragdrop::{
    bind_global_mouseup, create_dnd_signals, make_on_gap_mouseenter, make_on_item_mouseenter,
    make_on_mousedown, make_on_mouseleave, DndSignals, DropTarget,
};

use crate::components::FlavorCard;
use crate::context::AppContext;
use crate::models::FlavorId;
use crate::store::{store_drop_flavor, store_remove_flavor, use_ranking_store, RankingStateStoreFields, RankingStore};

/// Drag state shared by the ranking list, provided once by the app shell
#[derive(Clone, Copy)]
pub struct FlavorDnd(pub DndSignals<FlavorId>);

/// Create the drag signals and bind the document listeners.
///
/// Called once at startup: the listeners outlive any single list mount.
pub fn provide_flavor_dnd(store: RankingStore) -> FlavorDnd {
    let dnd = create_dnd_signals::<FlavorId>();
    bind_global_mouseup(dnd, move |dragged, target| {
        store_drop_flavor(&store, dragged, target);
    });
    let flavor_dnd = FlavorDnd(dnd);
    provide_context(flavor_dnd);
    flavor_dnd
}

/// Toast text after a removal; the name is left out when nothing matched
fn removed_description(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} has been removed from your ranking.", name),
        None => "The flavor has been removed from your ranking.".to_string(),
    }
}

/// Drop zone between two rows
#[component]
pub fn GapZone(dnd: DndSignals<FlavorId>, #[prop(into)] gap: Signal<usize>) -> impl IntoView {
    let on_mouseenter = make_on_gap_mouseenter(dnd, gap);
    let on_mouseleave = make_on_mouseleave(dnd);
    let is_active = move || dnd.is_target(DropTarget::Gap(gap.get()));

    view! {
        <div
            class="gap-zone"
            class:visible=move || dnd.is_dragging()
            class:active=is_active
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}

#[component]
pub fn RankingList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_ranking_store();
    let dnd = expect_context::<FlavorDnd>().0;

    let on_remove = Callback::new(move |id: FlavorId| {
        let removed = store_remove_flavor(&store, id);
        ctx.notify(
            "Flavor removed",
            removed_description(removed.as_ref().map(|f| f.name.as_str())),
        );
    });

    view! {
        <div class="ranking-list" class:dragging=move || dnd.is_dragging()>
            <GapZone dnd=dnd gap=Signal::stored(0usize) />
            <For
                each=move || store.ranking().read().flavors().to_vec()
                key=|flavor| flavor.id
                children=move |flavor| {
                    let id = flavor.id;
                    let position = Signal::derive(move || {
                        store.ranking().read().position_of(id).unwrap_or_default()
                    });
                    let rank = Signal::derive(move || position.get() + 1);

                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mouseenter = make_on_item_mouseenter(dnd, id);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    view! {
                        <div
                            class="ranking-row"
                            class:is-dragging=move || dnd.dragging() == Some(id)
                            class:drop-target=move || dnd.is_target(DropTarget::Item(id))
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <FlavorCard flavor=flavor rank=rank on_remove=on_remove />
                        </div>
                        // Gap after this row sits before the next position
                        <GapZone dnd=dnd gap=rank />
                    }
                }
            />
        </div>
    }
}
