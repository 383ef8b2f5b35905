//! Chip Ranker Frontend App
//!
//! Installs the shared state, wires the auth event stream into the app
//! context and switches between the top-level views.

use std::sync::{Arc, Weak};

use leptos::prelude::*;
use reactive_stores::Store;
use rolling_logger::LogBuffer;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::auth::{AuthEvent, AuthProvider, SharedAuth, SupabaseAuth};
use crate::components::{provide_flavor_dnd, NavBar, ToastHost};
use crate::config::AppConfig;
use crate::context::{AppContext, Route};
use crate::pages::{AuthPage, RankingPage, ResetPasswordPage};
use crate::store::RankingState;

/// Current `(search, hash)` of the page URL
fn current_location() -> (String, String) {
    web_sys::window()
        .map(|win| win.location())
        .map(|loc| (loc.search().unwrap_or_default(), loc.hash().unwrap_or_default()))
        .unwrap_or_default()
}

/// Mirror an auth event into the app context
fn apply_auth_event(ctx: AppContext, auth: &Weak<dyn AuthProvider>, event: AuthEvent) {
    debug!(?event, "auth event");
    match event {
        AuthEvent::SignedIn | AuthEvent::UserUpdated => {
            let email = auth
                .upgrade()
                .and_then(|provider| provider.current_user())
                .and_then(|user| user.email);
            ctx.set_user_email(email);
        }
        AuthEvent::SignedOut => {
            ctx.set_user_email(None);
            ctx.set_recovery_mode(false);
        }
        AuthEvent::PasswordRecovery => {
            ctx.set_recovery_mode(true);
            ctx.navigate(Route::ResetPassword);
        }
    }
}

#[component]
pub fn App(config: AppConfig, logs: LogBuffer) -> impl IntoView {
    provide_context(logs);

    let store = Store::new(RankingState::new(config.seed_demo_flavors));
    provide_context(store);
    provide_flavor_dnd(store);

    let (search, hash) = current_location();
    let ctx = AppContext::new(Route::resolve(&search, &hash), config.toast_duration_ms);
    provide_context(ctx);

    if !config.auth_configured() {
        warn!("auth provider not configured; sign-in is disabled");
    }
    let supabase = Arc::new(SupabaseAuth::from_config(&config));
    let shared: SharedAuth = supabase.clone();
    let weak: Weak<dyn AuthProvider> = Arc::downgrade(&shared);
    let subscription = shared.subscribe(Box::new(move |event| apply_auth_event(ctx, &weak, event)));
    on_cleanup(move || subscription.unsubscribe());
    provide_context(shared);

    // Recovery and confirmation links hand over a session in the fragment
    match supabase.detect_session_in_url(hash.trim_start_matches('#')) {
        Ok(Some(event)) => info!(?event, "redirect session detected"),
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "redirect carried an auth error");
            ctx.notify_error("Link invalid", e.to_string());
        }
    }

    // Follow links and the back button
    let on_hashchange = Closure::<dyn FnMut(web_sys::HashChangeEvent)>::new(move |_ev: web_sys::HashChangeEvent| {
        let (search, hash) = current_location();
        ctx.sync_route(Route::resolve(&search, &hash));
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("hashchange", on_hashchange.as_ref().unchecked_ref());
    }
    on_hashchange.forget();

    let export_filename = config.export_filename;
    info!(route = ?ctx.route.get_untracked(), "app mounted");

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match ctx.route.get() {
                    Route::Ranking => view! { <RankingPage export_filename=export_filename /> }.into_any(),
                    Route::Auth => view! { <AuthPage /> }.into_any(),
                    Route::ResetPassword => view! { <ResetPasswordPage /> }.into_any(),
                }}
            </main>
            <ToastHost />
        </div>
    }
}
