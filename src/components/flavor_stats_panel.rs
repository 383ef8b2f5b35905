//! Flavor Stats Panel Component

use leptos::prelude::*;

use crate::stats::{pluralize, FlavorStats};
use crate::store::{use_ranking_store, RankingStateStoreFields};

/// Summary cards plus a per-category breakdown
#[component]
pub fn FlavorStatsPanel() -> impl IntoView {
    let store = use_ranking_store();
    let stats = Memo::new(move |_| FlavorStats::derive(store.ranking().read().flavors()));

    let top_label = move || {
        stats
            .get()
            .top_category
            .map(|(category, _)| category.label().to_string())
            .unwrap_or_else(|| "None".to_string())
    };
    let top_detail = move || match stats.get().top_category {
        Some((_, count)) => pluralize(count, "flavor"),
        None => "Add some flavors!".to_string(),
    };

    view! {
        <section class="stats-panel">
            <div class="stat-card">
                <span class="stat-title">"Total Flavors"</span>
                <span class="stat-value">{move || stats.get().total}</span>
                <span class="stat-detail">"In your ranking"</span>
            </div>

            <div class="stat-card">
                <span class="stat-title">"Top Category"</span>
                <span class="stat-value">{top_label}</span>
                <span class="stat-detail">{top_detail}</span>
            </div>

            <div class="stat-card">
                <span class="stat-title">"With Brands"</span>
                <span class="stat-value">{move || stats.get().brand_count}</span>
                <span class="stat-detail">
                    {move || format!("{}% have brand info", stats.get().brand_percentage)}
                </span>
            </div>

            <Show when=move || stats.get().total != 0>
                <div class="stat-card breakdown">
                    <span class="stat-title">"Category Breakdown"</span>
                    <ul class="breakdown-list">
                        {move || stats.get().by_category.into_iter().map(|(category, count)| view! {
                            <li class=format!("breakdown-row category-{}", category.as_str())>
                                <span class="breakdown-label">{category.label()}</span>
                                <span class="breakdown-count">{count}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                </div>
            </Show>
        </section>
    }
}
