//! Auth Provider Layer
//!
//! The app talks to authentication only through [`AuthProvider`], so the
//! pages never depend on a concrete backend.

mod events;
mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use events::{AuthEventBus, AuthSubscription};
pub use supabase::{parse_fragment, SupabaseAuth};

/// Auth state changes observable through [`AuthProvider::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    /// The user arrived through a password-recovery link
    PasswordRecovery,
    UserUpdated,
}

/// Signed-in user as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Common result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication is not configured")]
    NotConfigured,
    #[error("You need to be signed in to do that")]
    NoSession,
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Redirect(String),
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Capability interface of the external auth service.
///
/// Futures are `?Send`: in the browser they run on the single UI thread.
#[async_trait(?Send)]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser>;

    /// Create an account; the confirmation mail links back to `redirect_to`
    async fn sign_up(&self, email: &str, password: &str, redirect_to: &str) -> AuthResult<()>;

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> AuthResult<()>;

    /// Change the password of the current (or recovering) user
    async fn update_password(&self, new_password: &str) -> AuthResult<()>;

    async fn sign_out(&self) -> AuthResult<()>;

    fn current_user(&self) -> Option<AuthUser>;

    /// Listen for auth state changes until the handle is dropped
    fn subscribe(&self, listener: Box<dyn Fn(AuthEvent) + Send + Sync>) -> AuthSubscription;
}

/// Shared handle provided through Leptos context
pub type SharedAuth = Arc<dyn AuthProvider>;
