//! UI Components
//!
//! Reusable Leptos components.

mod actions_panel;
mod category_selector;
mod flavor_card;
mod flavor_stats_panel;
mod nav_bar;
mod new_flavor_form;
mod ranking_list;
mod toast_host;

pub use actions_panel::ActionsPanel;
pub use category_selector::CategorySelector;
pub use flavor_card::FlavorCard;
pub use flavor_stats_panel::FlavorStatsPanel;
pub use nav_bar::NavBar;
pub use new_flavor_form::NewFlavorForm;
pub use ranking_list::{provide_flavor_dnd, FlavorDnd, GapZone, RankingList};
pub use toast_host::ToastHost;
