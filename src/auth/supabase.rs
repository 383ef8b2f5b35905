//! Supabase Auth Provider
//!
//! Calls the GoTrue REST endpoints directly with `reqwest`. The session lives
//! in memory only, like the rest of the app.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::{AuthError, AuthEvent, AuthEventBus, AuthProvider, AuthResult, AuthSubscription, AuthUser};
use crate::config::AppConfig;

#[derive(Debug, Clone)]
struct Endpoint {
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    user: Option<AuthUser>,
}

pub struct SupabaseAuth {
    endpoint: Option<Endpoint>,
    client: Client,
    session: Mutex<Option<Session>>,
    events: AuthEventBus,
}

impl SupabaseAuth {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let endpoint = Endpoint {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        };
        Self::with_endpoint(Some(endpoint))
    }

    /// Provider whose every call fails with [`AuthError::NotConfigured`]
    pub fn unconfigured() -> Self {
        Self::with_endpoint(None)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        match (&config.supabase_url, &config.supabase_anon_key) {
            (Some(url), Some(key)) => Self::new(url.clone(), key.clone()),
            _ => {
                warn!("supabase settings missing, auth disabled");
                Self::unconfigured()
            }
        }
    }

    fn with_endpoint(endpoint: Option<Endpoint>) -> Self {
        Self {
            endpoint,
            client: Client::new(),
            session: Mutex::new(None),
            events: AuthEventBus::new(),
        }
    }

    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn access_token(&self) -> AuthResult<String> {
        self.session()
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(AuthError::NoSession)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> AuthResult<RequestBuilder> {
        let endpoint = self.endpoint.as_ref().ok_or(AuthError::NotConfigured)?;
        let url = format!("{}/auth/v1/{}", endpoint.base_url, path);
        Ok(self
            .client
            .request(method, url)
            .header("apikey", endpoint.anon_key.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> AuthResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = api_error_message(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        Err(AuthError::Api { status: status.as_u16(), message })
    }

    fn store_session(&self, token: TokenResponse) -> Option<AuthUser> {
        let user = token.user.clone();
        *self.session() = Some(Session {
            access_token: token.access_token,
            user: token.user,
        });
        user
    }

    /// Pick up a session handed over in a redirect URL fragment.
    ///
    /// Returns the event that was emitted, if the fragment carried a session.
    pub fn detect_session_in_url(&self, fragment: &str) -> AuthResult<Option<AuthEvent>> {
        let params = parse_fragment(fragment);
        if let Some(description) = params.get("error_description").or_else(|| params.get("error")) {
            return Err(AuthError::Redirect(description.clone()));
        }
        let Some(access_token) = params.get("access_token") else {
            return Ok(None);
        };

        *self.session() = Some(Session {
            access_token: access_token.clone(),
            user: None,
        });
        let event = match params.get("type").map(String::as_str) {
            Some("recovery") => AuthEvent::PasswordRecovery,
            _ => AuthEvent::SignedIn,
        };
        info!(?event, "session restored from redirect");
        self.events.emit(event);
        Ok(Some(event))
    }
}

#[async_trait(?Send)]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let request = self
            .request(reqwest::Method::POST, "token")?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self.send(request).await?.json().await?;

        let user = self.store_session(token).unwrap_or_else(|| AuthUser {
            id: String::new(),
            email: Some(email.to_string()),
        });
        info!("signed in");
        self.events.emit(AuthEvent::SignedIn);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str, redirect_to: &str) -> AuthResult<()> {
        let request = self
            .request(reqwest::Method::POST, "signup")?
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email, "password": password }));
        let body: serde_json::Value = self.send(request).await?.json().await?;

        // Projects with auto-confirm answer with a session right away
        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)?;
            self.store_session(token);
            self.events.emit(AuthEvent::SignedIn);
        }
        info!("sign-up requested");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> AuthResult<()> {
        let request = self
            .request(reqwest::Method::POST, "recover")?
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }));
        self.send(request).await?;
        info!("password reset mail requested");
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> AuthResult<()> {
        let token = self.access_token()?;
        let request = self
            .request(reqwest::Method::PUT, "user")?
            .bearer_auth(token)
            .json(&json!({ "password": new_password }));
        let user: AuthUser = self.send(request).await?.json().await?;

        if let Some(session) = self.session().as_mut() {
            session.user = Some(user);
        }
        info!("password updated");
        self.events.emit(AuthEvent::UserUpdated);
        Ok(())
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let token = self.access_token();
        self.session().take();
        if let Ok(token) = token {
            let request = self.request(reqwest::Method::POST, "logout")?.bearer_auth(token);
            // The local session is gone either way
            if let Err(err) = self.send(request).await {
                warn!(%err, "remote sign-out failed");
            }
        }
        self.events.emit(AuthEvent::SignedOut);
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session().as_ref().and_then(|s| s.user.clone())
    }

    fn subscribe(&self, listener: Box<dyn Fn(AuthEvent) + Send + Sync>) -> AuthSubscription {
        self.events.subscribe(listener)
    }
}

/// Human-readable message from a GoTrue error body
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Decode `#key=value&...` into a map
pub fn parse_fragment(fragment: &str) -> HashMap<String, String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| {
            let value = value.replace('+', " ");
            (
                key.to_string(),
                percent_decode_str(&value).decode_utf8_lossy().into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_parse_fragment() {
        let params = parse_fragment("#access_token=abc.def&type=recovery&error_description=Email+link%20expired");
        assert_eq!(params.get("access_token").map(String::as_str), Some("abc.def"));
        assert_eq!(params.get("type").map(String::as_str), Some("recovery"));
        assert_eq!(params.get("error_description").map(String::as_str), Some("Email link expired"));
        assert!(parse_fragment("").is_empty());
        assert!(parse_fragment("#/auth").is_empty());
    }

    #[test]
    fn test_api_error_message_prefers_msg() {
        assert_eq!(
            api_error_message(r#"{"code":400,"msg":"Invalid login credentials"}"#).as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(
            api_error_message(r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#).as_deref(),
            Some("Email not confirmed")
        );
        assert_eq!(api_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_recovery_fragment_emits_event() {
        let auth = SupabaseAuth::new("https://demo.supabase.co/", "anon");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = auth.subscribe(Box::new(move |event| sink.lock().unwrap().push(event)));

        let event = auth.detect_session_in_url("#access_token=tok&type=recovery").unwrap();

        assert_eq!(event, Some(AuthEvent::PasswordRecovery));
        assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::PasswordRecovery]);
        assert_eq!(auth.access_token().unwrap(), "tok");
    }

    #[test]
    fn test_fragment_without_token_is_ignored() {
        let auth = SupabaseAuth::new("https://demo.supabase.co", "anon");
        assert_eq!(auth.detect_session_in_url("#/reset-password").unwrap(), None);
        assert!(matches!(auth.access_token(), Err(AuthError::NoSession)));
    }

    #[test]
    fn test_fragment_error_is_reported() {
        let auth = SupabaseAuth::new("https://demo.supabase.co", "anon");
        let err = auth
            .detect_session_in_url("#error=access_denied&error_description=Email+link+is+invalid")
            .unwrap_err();
        assert_eq!(err.to_string(), "Email link is invalid");
    }

    #[test]
    fn test_unconfigured_provider_refuses_requests() {
        let auth = SupabaseAuth::unconfigured();
        assert!(matches!(
            auth.request(reqwest::Method::POST, "token"),
            Err(AuthError::NotConfigured)
        ));
        assert!(auth.current_user().is_none());
    }
}
