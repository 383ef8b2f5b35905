//! Navigation Bar Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::auth::SharedAuth;
use crate::context::{AppContext, Route};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let auth = StoredValue::new(expect_context::<SharedAuth>());

    let on_sign_out = move |_| {
        let provider = auth.get_value();
        spawn_local(async move {
            if let Err(e) = provider.sign_out().await {
                warn!(error = %e, "sign out failed");
                ctx.notify_error("Sign out failed", e.to_string());
            }
        });
    };

    let nav_class = move |route: Route| {
        if ctx.route.get() == route { "nav-link active" } else { "nav-link" }
    };

    view! {
        <nav class="nav-bar">
            <a href=Route::Ranking.hash() class=move || nav_class(Route::Ranking)>"🥔 Chip Ranker"</a>
            <div class="nav-right">
                {move || match ctx.user_email.get() {
                    Some(email) => view! {
                        <span class="nav-user">{email}</span>
                        <button class="link-btn" on:click=on_sign_out>"Sign out"</button>
                    }.into_any(),
                    None => view! {
                        <a href=Route::Auth.hash() class=move || nav_class(Route::Auth)>"Sign in"</a>
                    }.into_any(),
                }}
            </div>
        </nav>
    }
}
