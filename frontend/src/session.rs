use gloo_storage::{LocalStorage, Storage};
use yew::prelude::*;

/// Storage key for the bearer token issued by the auth gateway.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Whether a user is signed in, derived from the persisted token. The token
/// is never validated locally; a stale one is rejected server-side on first
/// use.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn restore() -> Self {
        Session {
            token: LocalStorage::get(TOKEN_STORAGE_KEY).ok(),
        }
    }

    pub fn login(token: String) -> Self {
        if let Err(err) = LocalStorage::set(TOKEN_STORAGE_KEY, &token) {
            log::error!("Failed to persist auth token: {err:?}");
        }
        Session { token: Some(token) }
    }

    pub fn logout() -> Self {
        LocalStorage::delete(TOKEN_STORAGE_KEY);
        Session { token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer value for outgoing requests. An absent token goes out as an
    /// empty string rather than being treated as an error.
    pub fn bearer(&self) -> String {
        self.token.clone().unwrap_or_default()
    }
}

/// Session context passed explicitly to views; the change callback is owned
/// by the app root.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    pub session: Session,
    pub on_token_change: Callback<Option<String>>,
}
