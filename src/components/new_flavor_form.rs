//! New Flavor Form Component
//!
//! Name, category and optional brand for a new flavor.

use leptos::prelude::*;

use crate::components::CategorySelector;
use crate::context::AppContext;
use crate::models::{Category, FlavorDraft};
use crate::store::{store_add_flavor, use_ranking_store};

/// Form appending a flavor at the bottom of the ranking
#[component]
pub fn NewFlavorForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_ranking_store();

    let (name, set_name) = signal(String::new());
    let (category, set_category) = signal(Category::default());
    let (brand, set_brand) = signal(String::new());

    let add_flavor = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = FlavorDraft {
            name: name.get(),
            category: Some(category.get()),
            brand: Some(brand.get()),
        };
        if let Some(flavor) = store_add_flavor(&store, &draft) {
            ctx.notify(
                "Flavor added!",
                format!("{} has been added to your ranking.", flavor.name),
            );
            set_name.set(String::new());
            set_brand.set(String::new());
            set_category.set(Category::default());
        }
    };

    view! {
        <form class="card new-flavor-form" on:submit=add_flavor>
            <h2 class="card-title">"+ Add New Flavor"</h2>

            <label for="flavor-name">"Flavor Name"</label>
            <input
                id="flavor-name"
                type="text"
                required=true
                placeholder="e.g., Cool Ranch Doritos"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />

            <label>"Category"</label>
            <CategorySelector current=category on_change=move |c| set_category.set(c) />

            <label for="flavor-brand">"Brand (Optional)"</label>
            <input
                id="flavor-brand"
                type="text"
                placeholder="e.g., Doritos, Lays, Pringles"
                prop:value=move || brand.get()
                on:input=move |ev| set_brand.set(event_target_value(&ev))
            />

            <button
                type="submit"
                class="primary-btn"
                disabled=move || name.get().trim().is_empty()
            >
                "Add Flavor"
            </button>
        </form>
    }
}
