//! Reset Password Page
//!
//! Requests a recovery mail, or sets the new password once the user came
//! back through the recovery link.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::auth::SharedAuth;
use crate::context::{app_url, AppContext, Route};

use super::MIN_PASSWORD_LEN;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    super::set_page_title("Reset Password | Chip Flavor Ranker");
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let auth = StoredValue::new(expect_context::<SharedAuth>());

    let (email, set_email) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (loading, set_loading) = signal(false);

    Effect::new(move |prev: Option<bool>| {
        let recovering = ctx.recovery_mode.get();
        if recovering && prev != Some(true) {
            ctx.notify("Set a new password", "Enter a new password to complete the reset.");
        }
        recovering
    });

    let on_request = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let provider = auth.get_value();
        let email = email.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            match provider
                .send_password_reset(&email, &app_url(Some(Route::ResetPassword)))
                .await
            {
                Ok(()) => {
                    info!("password reset mail requested");
                    ctx.notify("Email sent", "Check your inbox for the password reset link.");
                }
                Err(e) => {
                    warn!(error = %e, "password reset failed");
                    ctx.notify_error("Reset failed", e.to_string());
                }
            }
            set_loading.set(false);
        });
    };

    let on_update = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let password = new_password.get_untracked();
        if password != confirm.get_untracked() {
            ctx.notify_error("Passwords do not match", "Please ensure both passwords are identical.");
            return;
        }
        let provider = auth.get_value();
        set_loading.set(true);
        spawn_local(async move {
            match provider.update_password(&password).await {
                Ok(()) => {
                    info!("password updated");
                    ctx.set_recovery_mode(false);
                    ctx.notify("Password updated", "You can now sign in with your new password.");
                    ctx.navigate(Route::Auth);
                }
                Err(e) => {
                    warn!(error = %e, "password update failed");
                    ctx.notify_error("Update failed", e.to_string());
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h2 class="card-title">"Password Recovery"</h2>
                <Show
                    when=move || ctx.recovery_mode.get()
                    fallback=move || view! {
                        <form class="auth-form" on:submit=on_request>
                            <label for="reset-email">"Email"</label>
                            <input
                                id="reset-email"
                                type="email"
                                required=true
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                            <button type="submit" class="primary-btn" disabled=move || loading.get()>
                                {move || if loading.get() { "Sending..." } else { "Send reset link" }}
                            </button>
                            <a href=Route::Auth.hash() class="link">"Back to login"</a>
                        </form>
                    }
                >
                    <form class="auth-form" on:submit=on_update>
                        <label for="new-password">"New Password"</label>
                        <input
                            id="new-password"
                            type="password"
                            required=true
                            minlength=MIN_PASSWORD_LEN.to_string()
                            prop:value=move || new_password.get()
                            on:input=move |ev| set_new_password.set(event_target_value(&ev))
                        />
                        <label for="confirm-password">"Confirm New Password"</label>
                        <input
                            id="confirm-password"
                            type="password"
                            required=true
                            minlength=MIN_PASSWORD_LEN.to_string()
                            prop:value=move || confirm.get()
                            on:input=move |ev| set_confirm.set(event_target_value(&ev))
                        />
                        <button type="submit" class="primary-btn" disabled=move || loading.get()>
                            {move || if loading.get() { "Updating..." } else { "Update password" }}
                        </button>
                        <a href=Route::Auth.hash() class="link">"Return to login"</a>
                    </form>
                </Show>
            </div>
        </div>
    }
}
