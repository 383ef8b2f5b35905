//! Auth Page
//!
//! Login and sign-up tabs backed by the shared auth provider.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::auth::SharedAuth;
use crate::context::{app_url, AppContext, Route};

use super::MIN_PASSWORD_LEN;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthTab {
    Login,
    SignUp,
}

#[component]
pub fn AuthPage() -> impl IntoView {
    super::set_page_title("Login or Sign Up | Chip Flavor Ranker");
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let auth = StoredValue::new(expect_context::<SharedAuth>());

    let (tab, set_tab) = signal(AuthTab::Login);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);

    // Already signed in: nothing to do here
    Effect::new(move |_| {
        if ctx.user_email.get().is_some() && !ctx.recovery_mode.get_untracked() {
            ctx.navigate(Route::Ranking);
        }
    });

    let on_login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let provider = auth.get_value();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        set_loading.set(true);
        spawn_local(async move {
            match provider.sign_in(&email, &password).await {
                Ok(user) => {
                    info!(user = %user.id, "signed in");
                    ctx.notify("Welcome back!", "You are now signed in.");
                    ctx.navigate(Route::Ranking);
                }
                Err(e) => {
                    warn!(error = %e, "sign in failed");
                    ctx.notify_error("Login failed", e.to_string());
                }
            }
            set_loading.set(false);
        });
    };

    let on_sign_up = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let provider = auth.get_value();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        set_loading.set(true);
        spawn_local(async move {
            match provider.sign_up(&email, &password, &app_url(None)).await {
                Ok(()) => {
                    info!("sign up requested");
                    ctx.notify("Check your email", "We sent you a confirmation link to complete sign up.");
                }
                Err(e) => {
                    warn!(error = %e, "sign up failed");
                    ctx.notify_error("Sign up failed", e.to_string());
                }
            }
            set_loading.set(false);
        });
    };

    let tab_class = move |which: AuthTab| {
        if tab.get() == which { "tab active" } else { "tab" }
    };

    let fields = move |prefix: &'static str| view! {
        <label for=format!("{}-email", prefix)>"Email"</label>
        <input
            id=format!("{}-email", prefix)
            type="email"
            required=true
            autocomplete="email"
            prop:value=move || email.get()
            on:input=move |ev| set_email.set(event_target_value(&ev))
        />
        <label for=format!("{}-password", prefix)>"Password"</label>
        <input
            id=format!("{}-password", prefix)
            type="password"
            required=true
            minlength=MIN_PASSWORD_LEN.to_string()
            prop:value=move || password.get()
            on:input=move |ev| set_password.set(event_target_value(&ev))
        />
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h2 class="card-title">"Account Access"</h2>
                <div class="tabs" role="tablist">
                    <button class=move || tab_class(AuthTab::Login) on:click=move |_| set_tab.set(AuthTab::Login)>
                        "Login"
                    </button>
                    <button class=move || tab_class(AuthTab::SignUp) on:click=move |_| set_tab.set(AuthTab::SignUp)>
                        "Sign Up"
                    </button>
                </div>

                <Show
                    when=move || tab.get() == AuthTab::Login
                    fallback=move || view! {
                        <form class="auth-form" on:submit=on_sign_up>
                            {fields("signup")}
                            <button type="submit" class="primary-btn" disabled=move || loading.get()>
                                {move || if loading.get() { "Creating account..." } else { "Create account" }}
                            </button>
                        </form>
                    }
                >
                    <form class="auth-form" on:submit=on_login>
                        {fields("login")}
                        <button type="submit" class="primary-btn" disabled=move || loading.get()>
                            {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                        <a href=Route::ResetPassword.hash() class="link">"Forgot password?"</a>
                    </form>
                </Show>

                <a href=Route::Ranking.hash() class="link back-link">"Back to home"</a>
            </div>
        </div>
    }
}
