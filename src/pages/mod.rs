//! Top-level views, one per [`Route`](crate::context::Route).

mod auth;
mod ranking;
mod reset_password;

pub use auth::AuthPage;
pub use ranking::RankingPage;
pub use reset_password::ResetPasswordPage;

/// Set the browser tab title
fn set_page_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        doc.set_title(title);
    }
}

/// Minimum accepted password length, matching the auth provider's default
const MIN_PASSWORD_LEN: usize = 6;
