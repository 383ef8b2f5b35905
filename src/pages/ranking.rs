//! Ranking Page
//!
//! Header, statistics, create form, actions and the draggable list.

use leptos::prelude::*;

use crate::components::{ActionsPanel, FlavorStatsPanel, NewFlavorForm, RankingList};
use crate::stats::pluralize;
use crate::store::{use_ranking_store, RankingStateStoreFields};

#[component]
pub fn RankingPage(export_filename: &'static str) -> impl IntoView {
    super::set_page_title("Chip Flavor Ranker");
    let store = use_ranking_store();
    let count = move || store.ranking().read().len();

    view! {
        <div class="ranking-page">
            <header class="page-header">
                <h1>"🥔 Chip Flavor Ranker"</h1>
                <p class="subtitle">"Rank your favorite chip flavors from best to worst"</p>
            </header>

            <FlavorStatsPanel />

            <div class="ranking-layout">
                <aside class="ranking-sidebar">
                    <NewFlavorForm />
                    <ActionsPanel export_filename=export_filename />
                </aside>

                <section class="card ranking-main">
                    <div class="ranking-header">
                        <h2 class="card-title">"Your Ranking"</h2>
                        <span class="ranking-count">{move || pluralize(count(), "flavor")}</span>
                    </div>
                    <Show
                        when=move || count() != 0
                        fallback=|| view! {
                            <div class="empty-state">
                                <div class="empty-icon">"🥔"</div>
                                <h3>"No flavors yet"</h3>
                                <p>"Add your first chip flavor to start ranking!"</p>
                            </div>
                        }
                    >
                        <p class="hint">"Drag flavors to reorder them. #1 is your favorite."</p>
                        <RankingList />
                    </Show>
                </section>
            </div>
        </div>
    }
}
