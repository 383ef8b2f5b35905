//! Category Selector Component
//!
//! One button per flavor category.

use leptos::prelude::*;

use crate::models::Category;

/// Category selector buttons for the create form
#[component]
pub fn CategorySelector(
    current: ReadSignal<Category>,
    on_change: impl Fn(Category) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="category-selector" role="radiogroup">
            {Category::ALL.iter().map(|&category| {
                let is_selected = move || current.get() == category;
                view! {
                    <button
                        type="button"
                        role="radio"
                        aria-checked=move || is_selected().to_string()
                        class=move || {
                            if is_selected() {
                                format!("category-btn category-{} active", category.as_str())
                            } else {
                                format!("category-btn category-{}", category.as_str())
                            }
                        }
                        on:click=move |_| on_change(category)
                    >
                        {category.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
