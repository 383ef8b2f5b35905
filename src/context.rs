//! Application Context
//!
//! Shared state provided via Leptos Context API: toasts, the current view
//! and the auth status mirrored from the provider's event stream.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

/// Top-level views, addressed by URL hash (`#/auth`, `#/reset-password`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Ranking,
    Auth,
    ResetPassword,
}

impl Route {
    pub fn hash(&self) -> &'static str {
        match self {
            Route::Ranking => "#/",
            Route::Auth => "#/auth",
            Route::ResetPassword => "#/reset-password",
        }
    }

    /// Query value used in redirect links (`?view=reset-password`)
    pub fn view_param(&self) -> &'static str {
        match self {
            Route::Ranking => "ranking",
            Route::Auth => "auth",
            Route::ResetPassword => "reset-password",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "" | "ranking" | "home" => Some(Route::Ranking),
            "auth" => Some(Route::Auth),
            "reset-password" => Some(Route::ResetPassword),
            _ => None,
        }
    }

    /// Resolve the view from `location.search` and `location.hash`.
    ///
    /// A `#/name` hash wins; otherwise `?view=name`; a recovery token in the
    /// hash always lands on the reset page.
    pub fn resolve(search: &str, hash: &str) -> Self {
        if let Some(path) = hash.strip_prefix("#/") {
            if let Some(route) = Self::from_name(path.trim_end_matches('/')) {
                return route;
            }
        }
        if hash.contains("type=recovery") {
            return Route::ResetPassword;
        }
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "view")
            .and_then(|(_, value)| Self::from_name(value))
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Visible toasts, oldest first - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
    toast_duration_ms: u32,
    /// Current view - read
    pub route: ReadSignal<Route>,
    /// Current view - write
    set_route: WriteSignal<Route>,
    /// Email of the signed-in user, if any - read
    pub user_email: ReadSignal<Option<String>>,
    /// Email of the signed-in user - write
    set_user_email: WriteSignal<Option<String>>,
    /// A recovery link was opened and a new password may be set - read
    pub recovery_mode: ReadSignal<bool>,
    /// Recovery flag - write
    set_recovery_mode: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(initial_route: Route, toast_duration_ms: u32) -> Self {
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        let (route, set_route) = signal(initial_route);
        let (user_email, set_user_email) = signal(None::<String>);
        let (recovery_mode, set_recovery_mode) = signal(false);
        Self {
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(0),
            toast_duration_ms,
            route,
            set_route,
            user_email,
            set_user_email,
            recovery_mode,
            set_recovery_mode,
        }
    }

    /// Show an informational toast
    pub fn notify(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push_toast(title.into(), description.into(), ToastKind::Info);
    }

    /// Show an error toast
    pub fn notify_error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push_toast(title.into(), description.into(), ToastKind::Destructive);
    }

    fn push_toast(&self, title: String, description: String, kind: ToastKind) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        debug!(id, %title, "toast");
        self.set_toasts.update(|toasts| toasts.push(Toast { id, title, description, kind }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(ctx.toast_duration_ms).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Switch view and mirror it into the URL hash
    pub fn navigate(&self, route: Route) {
        if let Some(location) = web_sys::window().map(|win| win.location()) {
            let _ = location.set_hash(route.hash());
        }
        self.set_route.set(route);
    }

    /// Follow a hash change made by the browser (links, back button)
    pub fn sync_route(&self, route: Route) {
        if self.route.get_untracked() != route {
            self.set_route.set(route);
        }
    }

    pub fn set_user_email(&self, email: Option<String>) {
        self.set_user_email.set(email);
    }

    pub fn set_recovery_mode(&self, on: bool) {
        self.set_recovery_mode.set(on);
    }
}

/// Absolute link back into the app, optionally opening `route`
pub fn app_url(route: Option<Route>) -> String {
    let base = web_sys::window()
        .map(|win| win.location())
        .and_then(|loc| Some(format!("{}{}", loc.origin().ok()?, loc.pathname().ok()?)))
        .unwrap_or_default();
    match route {
        Some(route) => format!("{}?view={}", base, route.view_param()),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_hash_routes() {
        assert_eq!(Route::resolve("", ""), Route::Ranking);
        assert_eq!(Route::resolve("", "#/auth"), Route::Auth);
        assert_eq!(Route::resolve("", "#/reset-password/"), Route::ResetPassword);
        assert_eq!(Route::resolve("", "#/nowhere"), Route::Ranking);
    }

    #[test]
    fn test_resolve_view_param() {
        assert_eq!(Route::resolve("?view=reset-password", ""), Route::ResetPassword);
        assert_eq!(Route::resolve("?x=1&view=auth", ""), Route::Auth);
        assert_eq!(Route::resolve("?view=auth", "#/"), Route::Ranking);
    }

    #[test]
    fn test_recovery_token_opens_reset_page() {
        let hash = "#access_token=abc&expires_in=3600&type=recovery";
        assert_eq!(Route::resolve("", hash), Route::ResetPassword);
        assert_eq!(Route::resolve("?view=reset-password", hash), Route::ResetPassword);
    }

    #[test]
    fn test_hash_round_trip() {
        for route in [Route::Ranking, Route::Auth, Route::ResetPassword] {
            assert_eq!(Route::resolve("", route.hash()), route);
            assert_eq!(Route::resolve(&format!("?view={}", route.view_param()), ""), route);
        }
    }
}
