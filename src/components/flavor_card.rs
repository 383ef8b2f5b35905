//! Flavor Card Component
//!
//! A single row of the ranking.

use leptos::prelude::*;

use crate::models::{ChipFlavor, FlavorId};

/// Rank badge, name, category, brand and a remove button
#[component]
pub fn FlavorCard(
    flavor: ChipFlavor,
    #[prop(into)] rank: Signal<usize>,
    #[prop(into)] on_remove: Callback<FlavorId>,
) -> impl IntoView {
    let id = flavor.id;
    let category = flavor.category;

    view! {
        <div class=format!("flavor-card category-{}", category.as_str())>
            <div class="rank-badge">"#" {move || rank.get()}</div>
            <span class="grip" aria-hidden="true">"⋮⋮"</span>

            <div class="flavor-info">
                <h3 class="flavor-name">{flavor.name}</h3>
                <div class="flavor-meta">
                    <span class="category-pill">{category.label()}</span>
                    {flavor.brand.map(|brand| view! { <span class="flavor-brand">{brand}</span> })}
                </div>
            </div>

            <button
                class="remove-btn"
                title="Remove from ranking"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_remove.run(id);
                }
            >
                "×"
            </button>
        </div>
    }
}
